//! End-to-end session flows over the SQLite store: one control center per
//! session, flush on logout, reload in the next session.

use ac_core::control::ControlCenter;
use ac_core::models::{Auction, Bid, Bidder, Item, NpContact};
use ac_core::ports::{AccountRepository, AuctionRepository};
use ac_sqlite::{Db, StoreConfig};
use time::macros::datetime;

fn seeded_db() -> anyhow::Result<Db> {
    let mut db = Db::open(&StoreConfig::default())?;
    db.replace_bidders(&[Bidder::new("Ada Lovelace", "ada")])?;
    db.replace_contacts(&[NpContact::new("Helping Hands", "hands")])?;
    Ok(db)
}

#[test]
fn a_contact_session_merges_its_submissions_on_logout() -> anyhow::Result<()> {
    let db = seeded_db()?;

    // Session one: a nonprofit contact submits a request and logs out.
    let mut center = ControlCenter::open(db)?;
    let as_of = datetime!(2024-06-01 09:00 UTC);
    let start = datetime!(2024-06-20 10:00 UTC);
    let end = datetime!(2024-06-20 12:00 UTC);

    assert!(center.requested_date_valid(start, as_of));
    assert!(center.requested_date_available(start, end));
    assert!(center.is_auction_allowed());

    let id = center.next_auction_id();
    let mut submission = Auction::new(id, "Helping Hands", start, end);
    submission.items.push(Item::new("Quilt"));
    center.add_auction(submission);
    center.flush_contact_session()?;

    // Session two: the snapshot now carries the submission.
    let center = ControlCenter::open(center.into_store())?;
    let persisted = center.auction_by_id(id)?.expect("submission was committed");
    assert_eq!(persisted.organization, "Helping Hands");
    assert!(center.pending_auctions().is_empty());
    Ok(())
}

#[test]
fn a_bidder_session_commits_the_pending_bid_on_logout() -> anyhow::Result<()> {
    let mut db = seeded_db()?;
    let mut listed = Auction::new(
        1.into(),
        "Helping Hands",
        datetime!(2024-06-20 10:00 UTC),
        datetime!(2024-06-20 12:00 UTC),
    );
    listed.items.push(Item::new("Quilt"));
    db.replace_auctions(&[listed])?;

    let mut center = ControlCenter::open(db)?;
    let bidder = center.bidder_by_username("ada")?.expect("seeded bidder");
    let auction = center.auction_by_id(1.into())?.unwrap();
    let item = auction.item("Quilt").unwrap().clone();

    center.place_bid(item, Bid::new(bidder.name.clone(), 45.0, auction.id));

    // dirty read before the flush, untouched snapshot underneath
    assert_eq!(center.all_auctions()?[0].bid_count(), 1);
    assert_eq!(center.store().load_auctions()?[0].bid_count(), 0);

    center.flush_bidder_session(&bidder)?;

    let center = ControlCenter::open(center.into_store())?;
    let committed = center.auction_by_id(1.into())?.unwrap();
    assert_eq!(committed.bid_count(), 1);
    assert_eq!(
        committed.item("Quilt").unwrap().highest_bid().unwrap().amount,
        45.0
    );

    // a bid pins the auction: the next session cannot cancel it
    let mut center = center;
    assert!(!center.cancel_auction(&committed));
    Ok(())
}

#[test]
fn an_admin_session_purges_cancelled_auctions_on_logout() -> anyhow::Result<()> {
    let mut db = seeded_db()?;
    let keep = Auction::new(
        1.into(),
        "Helping Hands",
        datetime!(2024-06-20 10:00 UTC),
        datetime!(2024-06-20 12:00 UTC),
    );
    let doomed = Auction::new(
        2.into(),
        "Helping Hands",
        datetime!(2024-06-21 10:00 UTC),
        datetime!(2024-06-21 12:00 UTC),
    );
    db.replace_auctions(&[keep, doomed.clone()])?;

    let mut center = ControlCenter::open(db)?;
    assert!(center.cancel_auction(&doomed));
    center.set_max_auctions_allowed(12);
    center.flush_admin_session()?;

    let center = ControlCenter::open(center.into_store())?;
    assert!(center.auction_by_id(2.into())?.is_none());
    assert!(center.auction_by_id(1.into())?.is_some());
    assert_eq!(center.max_auctions_allowed(), 12);
    Ok(())
}

#[test]
fn id_assignment_never_collides_across_sessions() -> anyhow::Result<()> {
    let db = seeded_db()?;
    let mut center = ControlCenter::open(db)?;

    let first = center.next_auction_id();
    center.add_auction(Auction::new(
        first,
        "Helping Hands",
        datetime!(2024-06-20 10:00 UTC),
        datetime!(2024-06-20 12:00 UTC),
    ));
    center.flush_contact_session()?;

    let mut center = ControlCenter::open(center.into_store())?;
    let second = center.next_auction_id();
    assert_ne!(first, second);
    assert!(center.auction_by_id(second)?.is_none());
    Ok(())
}
