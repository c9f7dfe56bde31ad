#![warn(missing_docs)]
//! A simple, reference storage backend for the Auction Central engine,
//! implemented with SQLite.
//!
//! The storage ports ask for whole-collection loads and replacements, so
//! the relational layer stays a document store: each
//! collection is one JSON document in a keyed two-column table, swapped
//! wholesale inside a transaction. The engine assumes exactly one active
//! session per database; the adapter enforces that assumption by holding
//! SQLite's exclusive file lock for the life of the connection, so a second
//! session fails to open instead of silently racing the first.

use rusqlite::{Connection, OpenFlags, OptionalExtension, TransactionBehavior};
use serde::{Serialize, de::DeserializeOwned};

pub mod config;
mod impls;

pub use config::StoreConfig;

// This manages our database setup/migrations
mod embedded {
    use refinery::embed_migrations;
    embed_migrations!("./sql");
}

/// The max-upcoming setting a freshly seeded store starts out with.
pub const DEFAULT_MAX_UPCOMING: u32 = 25;

const COLLECTIONS: [&str; 4] = ["auctions", "bidders", "contacts", "employees"];
const MAX_UPCOMING: &str = "max_upcoming";

/// Storage faults surfaced by the SQLite adapter.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The named collection has not been initialized in this database
    #[error("collection {0:?} is unavailable")]
    MissingCollection(&'static str),

    /// Error in JSON serialization or deserialization
    #[error("deserialization error: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// Error during database migrations
    #[error("migration error: {0}")]
    Migration(#[from] refinery::Error),

    /// Error from SQLite operations
    #[error("sql error: {0}")]
    Sql(#[from] rusqlite::Error),
}

/// Single-connection SQLite store.
///
/// # Examples
///
/// ```
/// use ac_sqlite::{Db, StoreConfig};
///
/// // In-memory store, seeded with empty collections
/// let db = Db::open(&StoreConfig::default())?;
/// # Ok::<(), ac_sqlite::Error>(())
/// ```
#[derive(Debug)]
pub struct Db {
    conn: Connection,
}

impl Db {
    /// Opens (and, when configured to, initializes) a store.
    ///
    /// Applies pending migrations, seeds empty collections and the default
    /// max-upcoming setting when `create_if_missing` is set, and then takes
    /// the exclusive file lock for the rest of the session.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] when the database cannot be opened or locked,
    /// or when migrations fail to apply.
    pub fn open(config: &StoreConfig) -> Result<Self, Error> {
        let mut conn = match &config.database_path {
            Some(path) => {
                let mut flags = OpenFlags::default();
                if !config.create_if_missing {
                    flags.remove(OpenFlags::SQLITE_OPEN_CREATE);
                }
                Connection::open_with_flags(path, flags)?
            }
            None => Connection::open_in_memory()?,
        };

        conn.execute_batch(
            r#"
            PRAGMA journal_mode = WAL;
            PRAGMA busy_timeout = 5000;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = true;
            PRAGMA locking_mode = EXCLUSIVE;
            "#,
        )?;

        embedded::migrations::runner().run(&mut conn)?;

        if config.create_if_missing {
            seed(&conn)?;
        }

        // locking_mode only takes effect on the next lock acquisition;
        // claim the exclusive lock now and hold it until the session ends.
        conn.execute_batch("begin exclusive; commit;")?;

        tracing::debug!(path = ?config.database_path, "store opened");

        Ok(Self { conn })
    }

    fn load_value<T: DeserializeOwned>(&self, name: &'static str) -> Result<T, Error> {
        let data: Option<serde_json::Value> = self
            .conn
            .query_row(
                "select data from collection where name = ?1",
                (name,),
                |row| row.get(0),
            )
            .optional()?;
        let data = data.ok_or(Error::MissingCollection(name))?;
        Ok(serde_json::from_value(data)?)
    }

    fn replace_value<T: Serialize>(&mut self, name: &'static str, value: &T) -> Result<(), Error> {
        let data = serde_json::to_value(value)?;
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        tx.execute(
            "insert into collection (name, data) values (?1, ?2) \
             on conflict (name) do update set data = excluded.data",
            (name, data),
        )?;
        tx.commit()?;
        tracing::debug!(collection = name, "collection replaced");
        Ok(())
    }
}

/// Inserts empty collections and the default setting where absent, leaving
/// existing rows untouched.
fn seed(conn: &Connection) -> Result<(), Error> {
    for name in COLLECTIONS {
        conn.execute(
            "insert into collection (name, data) values (?1, ?2) on conflict do nothing",
            (name, serde_json::json!([])),
        )?;
    }
    conn.execute(
        "insert into collection (name, data) values (?1, ?2) on conflict do nothing",
        (MAX_UPCOMING, serde_json::json!(DEFAULT_MAX_UPCOMING)),
    )?;
    Ok(())
}
