use ac_core::models::{Auction, AuctionId, Bidder, Item, NpContact};
use ac_core::ports::{AccountRepository, AuctionRepository, SettingsRepository};
use ac_sqlite::{DEFAULT_MAX_UPCOMING, Db, Error, StoreConfig};
use time::macros::datetime;

fn sample_auction() -> Auction {
    let mut auction = Auction::new(
        AuctionId::from(1),
        "Helping Hands",
        datetime!(2024-06-01 10:00 UTC),
        datetime!(2024-06-01 12:00 UTC),
    );
    auction.items.push(Item::new("Quilt"));
    auction
}

#[test]
fn a_fresh_store_is_seeded_with_empty_collections() -> anyhow::Result<()> {
    let db = Db::open(&StoreConfig::default())?;

    assert!(db.load_auctions()?.is_empty());
    assert!(db.load_bidders()?.is_empty());
    assert!(db.load_contacts()?.is_empty());
    assert!(db.load_employees()?.is_empty());
    assert_eq!(db.load_max_upcoming()?, DEFAULT_MAX_UPCOMING);
    Ok(())
}

#[test]
fn collections_replace_wholesale_and_read_back() -> anyhow::Result<()> {
    let mut db = Db::open(&StoreConfig::default())?;

    let auctions = vec![sample_auction()];
    db.replace_auctions(&auctions)?;
    assert_eq!(db.load_auctions()?, auctions);

    // a second replacement swaps the whole document, not a delta
    db.replace_auctions(&[])?;
    assert!(db.load_auctions()?.is_empty());

    let bidders = vec![Bidder::new("Ada Lovelace", "ada")];
    db.replace_bidders(&bidders)?;
    assert_eq!(db.load_bidders()?, bidders);

    let contacts = vec![NpContact::new("Helping Hands", "hands")];
    db.replace_contacts(&contacts)?;
    assert_eq!(db.load_contacts()?, contacts);

    db.replace_max_upcoming(40)?;
    assert_eq!(db.load_max_upcoming()?, 40);
    Ok(())
}

#[test]
fn an_unseeded_store_reports_missing_collections() -> anyhow::Result<()> {
    let db = Db::open(&StoreConfig {
        database_path: None,
        create_if_missing: false,
    })?;

    match db.load_auctions() {
        Err(Error::MissingCollection("auctions")) => Ok(()),
        other => panic!("expected a missing collection, got {other:?}"),
    }
}

#[test]
fn timestamps_round_trip_through_the_document_store() -> anyhow::Result<()> {
    let mut db = Db::open(&StoreConfig::default())?;

    let auction = sample_auction();
    db.replace_auctions(std::slice::from_ref(&auction))?;

    let loaded = db.load_auctions()?.remove(0);
    assert_eq!(loaded.start, datetime!(2024-06-01 10:00 UTC));
    assert_eq!(loaded.end, datetime!(2024-06-01 12:00 UTC));
    Ok(())
}

#[test]
fn a_corrupt_collection_surfaces_as_a_deserialization_error() -> anyhow::Result<()> {
    let path = std::env::temp_dir().join(format!("ac-sqlite-{}-corrupt.db", std::process::id()));
    let _ = std::fs::remove_file(&path);

    let config = StoreConfig {
        database_path: Some(path.clone()),
        create_if_missing: true,
    };

    {
        let mut db = Db::open(&config)?;
        db.replace_auctions(&[sample_auction()])?;
    } // dropped: the exclusive lock is released

    // Scribble over the stored document from outside the adapter: still
    // JSON, but no longer an auction collection.
    let raw = rusqlite::Connection::open(&path)?;
    raw.execute(
        "update collection set data = '{}' where name = 'auctions'",
        (),
    )?;
    drop(raw);

    let db = Db::open(&config)?;
    match db.load_auctions() {
        Err(Error::Deserialization(_)) => {}
        other => panic!("expected a deserialization error, got {other:?}"),
    }

    drop(db);
    let _ = std::fs::remove_file(&path);
    Ok(())
}

#[test]
fn a_second_session_cannot_open_a_locked_store() -> anyhow::Result<()> {
    let path = std::env::temp_dir().join(format!("ac-sqlite-{}-locked.db", std::process::id()));
    let _ = std::fs::remove_file(&path);

    let config = StoreConfig {
        database_path: Some(path.clone()),
        create_if_missing: true,
    };

    let first = Db::open(&config)?;
    // the first session holds the exclusive lock, so this waits out the
    // busy timeout and then fails
    assert!(Db::open(&config).is_err());

    drop(first);
    let _ = std::fs::remove_file(&path);
    Ok(())
}
