use std::path::PathBuf;

use clap::{Parser, Subcommand};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// One invocation is one session: the shell opens the store, performs the
/// requested operations through the control center, and flushes on the way
/// out where the command mutates state.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// The location of the marketplace database (if omitted, use an in-memory db)
    #[arg(long, env = "DATABASE")]
    pub database: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    pub fn import() -> Result<Self, clap::Error> {
        // Attempt to load a .env file, but don't sweat it if one is not found.
        let _ = dotenvy::dotenv();
        Self::try_parse()
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List auctions that have not started yet
    Upcoming,

    /// List auctions that already ended
    Past,

    /// Check whether a candidate slot is legal to request and free to book
    Check {
        /// Requested opening instant (RFC3339)
        #[arg(long, value_parser = parse_instant)]
        start: OffsetDateTime,

        /// Requested closing instant (RFC3339)
        #[arg(long, value_parser = parse_instant)]
        end: OffsetDateTime,
    },

    /// Submit an auction request as a nonprofit contact and log out
    Submit {
        /// Username of the nonprofit contact
        #[arg(long)]
        contact: String,

        /// Requested opening instant (RFC3339)
        #[arg(long, value_parser = parse_instant)]
        start: OffsetDateTime,

        /// Requested closing instant (RFC3339)
        #[arg(long, value_parser = parse_instant)]
        end: OffsetDateTime,

        /// Item to list; repeat the flag for several items
        #[arg(long = "item", required = true)]
        items: Vec<String>,
    },

    /// Place a bid as a bidder and log out
    Bid {
        /// Username of the bidder
        #[arg(long)]
        bidder: String,

        /// Id of the auction holding the item
        #[arg(long)]
        auction: i64,

        /// Name of the item to bid on
        #[arg(long)]
        item: String,

        /// Offered amount, in dollars
        #[arg(long)]
        amount: f64,
    },

    /// Cancel a bid-free auction as an administrator and log out
    Cancel {
        /// Username of the administrator
        #[arg(long)]
        admin: String,

        /// Id of the auction to cancel
        #[arg(long)]
        auction: i64,
    },

    /// Adjust the number of upcoming auctions the marketplace accepts
    SetMax {
        /// Username of the administrator
        #[arg(long)]
        admin: String,

        /// The new limit
        #[arg(long)]
        max: u32,
    },

    /// Populate the store with a demonstration population
    Seed,
}

pub fn parse_instant(value: &str) -> Result<OffsetDateTime, String> {
    OffsetDateTime::parse(value, &Rfc3339)
        .map_err(|e| format!("{value:?} is not an RFC3339 timestamp: {e}"))
}
