use ac_core::control::{ControlCenter, sort_by_end, sort_by_start_descending};
use ac_core::models::{Auction, Bid, Bidder, Employee, Item, NpContact};
use ac_core::ports::AccountRepository;
use ac_sqlite::Db;
use anyhow::{Context, bail};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::cli::Command;
use crate::screen::{Event, Screen};

pub fn run(command: Command, db: Db) -> anyhow::Result<()> {
    match command {
        Command::Seed => seed(db),
        Command::Upcoming => upcoming(ControlCenter::open(db)?),
        Command::Past => past(ControlCenter::open(db)?),
        Command::Check { start, end } => check(ControlCenter::open(db)?, start, end),
        Command::Submit {
            contact,
            start,
            end,
            items,
        } => submit(ControlCenter::open(db)?, &contact, start, end, items),
        Command::Bid {
            bidder,
            auction,
            item,
            amount,
        } => bid(ControlCenter::open(db)?, &bidder, auction, &item, amount),
        Command::Cancel { admin, auction } => cancel(ControlCenter::open(db)?, &admin, auction),
        Command::SetMax { admin, max } => set_max(ControlCenter::open(db)?, &admin, max),
    }
}

fn seed(mut db: Db) -> anyhow::Result<()> {
    db.replace_bidders(&[
        Bidder::new("Ada Lovelace", "ada"),
        Bidder::new("Grace Hopper", "grace"),
    ])?;
    db.replace_contacts(&[
        NpContact::new("Helping Hands", "hands"),
        NpContact::new("Paws For A Cause", "paws"),
    ])?;
    db.replace_employees(&[Employee::new("Casey Park", "casey")])?;
    println!("seeded 2 bidders, 2 nonprofit contacts, 1 administrator");
    Ok(())
}

fn upcoming(center: ControlCenter<Db>) -> anyhow::Result<()> {
    let now = OffsetDateTime::now_utc();
    let auctions = sort_by_end(center.future_auctions(now)?);
    render(&auctions)
}

fn past(center: ControlCenter<Db>) -> anyhow::Result<()> {
    let now = OffsetDateTime::now_utc();
    let auctions = sort_by_start_descending(center.past_auctions(now)?);
    render(&auctions)
}

fn check(
    center: ControlCenter<Db>,
    start: OffsetDateTime,
    end: OffsetDateTime,
) -> anyhow::Result<()> {
    let now = OffsetDateTime::now_utc();
    println!(
        "within request window: {}",
        center.requested_date_valid(start, now)
    );
    println!(
        "slot available:        {}",
        center.requested_date_available(start, end)
    );
    println!("capacity remaining:    {}", center.is_auction_allowed());
    Ok(())
}

fn submit(
    mut center: ControlCenter<Db>,
    contact: &str,
    start: OffsetDateTime,
    end: OffsetDateTime,
    items: Vec<String>,
) -> anyhow::Result<()> {
    let contact = center
        .contact_by_username(contact)?
        .with_context(|| format!("unknown nonprofit contact {contact:?}"))?;
    let screen = Screen::Login.apply(Event::ContactAuthenticated);
    tracing::debug!(?screen, contact = %contact.username, "session started");

    if end <= start {
        bail!("the auction must end after it starts");
    }
    let now = OffsetDateTime::now_utc();
    if !center.requested_date_valid(start, now) {
        bail!("the requested date is outside the booking window");
    }
    if !center.requested_date_available(start, end) {
        bail!("the requested slot conflicts with another auction");
    }
    if !center.is_auction_allowed() {
        bail!("the marketplace is not accepting further auctions");
    }

    let id = center.next_auction_id();
    let mut auction = Auction::new(id, contact.name.clone(), start, end);
    auction.items = items.into_iter().map(Item::new).collect();
    center.add_auction(auction);
    center.flush_contact_session()?;

    let screen = screen.apply(Event::LoggedOut);
    tracing::debug!(?screen, "session closed");
    println!("auction #{id} submitted for {}", contact.name);
    Ok(())
}

fn bid(
    mut center: ControlCenter<Db>,
    bidder: &str,
    auction: i64,
    item: &str,
    amount: f64,
) -> anyhow::Result<()> {
    let bidder = center
        .bidder_by_username(bidder)?
        .with_context(|| format!("unknown bidder {bidder:?}"))?;
    let screen = Screen::Login.apply(Event::BidderAuthenticated);
    tracing::debug!(?screen, bidder = %bidder.username, "session started");

    let auction = center
        .auction_by_id(auction.into())?
        .with_context(|| format!("no auction #{auction}"))?;
    let item = auction
        .item(item)
        .with_context(|| format!("auction #{} lists no item {item:?}", auction.id))?
        .clone();

    center.place_bid(item, Bid::new(bidder.name.clone(), amount, auction.id));
    center.flush_bidder_session(&bidder)?;

    let screen = screen.apply(Event::LoggedOut);
    tracing::debug!(?screen, "session closed");
    println!("bid of ${amount:.2} placed on auction #{}", auction.id);
    Ok(())
}

fn cancel(mut center: ControlCenter<Db>, admin: &str, auction: i64) -> anyhow::Result<()> {
    let admin = center
        .employee_by_username(admin)?
        .with_context(|| format!("unknown administrator {admin:?}"))?;
    let screen = Screen::Login.apply(Event::AdminAuthenticated);
    tracing::debug!(?screen, admin = %admin.username, "session started");

    let auction = center
        .auction_by_id(auction.into())?
        .with_context(|| format!("no auction #{auction}"))?;
    if !center.cancel_auction(&auction) {
        bail!("auction #{} already holds bids and cannot be cancelled", auction.id);
    }
    center.flush_admin_session()?;

    let screen = screen.apply(Event::LoggedOut);
    tracing::debug!(?screen, "session closed");
    println!("auction #{} cancelled", auction.id);
    Ok(())
}

fn set_max(mut center: ControlCenter<Db>, admin: &str, max: u32) -> anyhow::Result<()> {
    let admin = center
        .employee_by_username(admin)?
        .with_context(|| format!("unknown administrator {admin:?}"))?;

    center.set_max_auctions_allowed(max);
    center.flush_admin_session()?;
    tracing::debug!(admin = %admin.username, max, "limit updated");
    println!("the marketplace now accepts up to {max} upcoming auctions");
    Ok(())
}

fn render(auctions: &[Auction]) -> anyhow::Result<()> {
    if auctions.is_empty() {
        println!("no auctions");
        return Ok(());
    }
    for auction in auctions {
        println!(
            "#{} {}: {} through {} ({} items, {} bids)",
            auction.id,
            auction.organization,
            auction.start.format(&Rfc3339)?,
            auction.end.format(&Rfc3339)?,
            auction.items.len(),
            auction.bid_count(),
        );
    }
    Ok(())
}
