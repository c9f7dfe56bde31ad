//! The control center merges the persisted auction snapshot with this
//! session's pending mutations: auctions added, auctions cancelled, and the
//! single-slot pending item update produced by bidding. Exactly one control
//! center exists per session process; it is the only writer against the
//! storage ports for the lifetime of that session.

use std::collections::{BTreeMap, BTreeSet};

use time::OffsetDateTime;

use crate::models::{Auction, AuctionId, Bid, Bidder, Employee, Item, NpContact};
use crate::ports::MarketRepository;
use crate::scheduling::SchedulePolicy;

/// Faults surfaced by control-center operations.
///
/// Expected negative outcomes such as an unavailable slot or a refused
/// cancellation are booleans on the individual operations, never errors.
/// There is no retry logic: a storage fault is fatal to the current
/// operation.
#[derive(Debug, thiserror::Error)]
pub enum Error<E> {
    /// The backing collection could not be read or written.
    #[error("storage unavailable")]
    StorageUnavailable(#[source] E),

    /// A range query was issued with its end before its start.
    #[error("invalid range: end precedes start")]
    InvalidRange,
}

/// The single writer-per-session authority over the auction population.
///
/// Construction loads the persisted snapshot once to seed the id counter and
/// the max-upcoming setting; every query thereafter re-reads storage so the
/// views always reflect a fresh snapshot merged with the session's pending
/// state. Session-pending state leaves the process only through the flush
/// operations, which replace the stored collections wholesale.
pub struct ControlCenter<S: MarketRepository> {
    store: S,
    policy: SchedulePolicy,
    added: Vec<Auction>,
    cancelled: BTreeSet<AuctionId>,
    pending_item: Option<Item>,
    next_auction_id: i64,
    max_upcoming: u32,
}

impl<S: MarketRepository> ControlCenter<S> {
    /// Opens a session over the given storage adapter.
    ///
    /// Seeds the id counter at `persisted count + 1` and reads the
    /// max-upcoming setting.
    pub fn open(store: S) -> Result<Self, Error<S::Error>> {
        let max_upcoming = store
            .load_max_upcoming()
            .map_err(Error::StorageUnavailable)?;
        let persisted = store.load_auctions().map_err(Error::StorageUnavailable)?;
        Ok(Self {
            next_auction_id: persisted.len() as i64 + 1,
            max_upcoming,
            store,
            policy: SchedulePolicy::default(),
            added: Vec::new(),
            cancelled: BTreeSet::new(),
            pending_item: None,
        })
    }

    /// The booking policy in force for this session.
    pub fn policy(&self) -> &SchedulePolicy {
        &self.policy
    }

    /// Read access to the underlying storage adapter.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consumes the session, returning the storage adapter.
    pub fn into_store(self) -> S {
        self.store
    }

    fn load_persisted(&self) -> Result<Vec<Auction>, Error<S::Error>> {
        self.store.load_auctions().map_err(Error::StorageUnavailable)
    }

    // ---- queries over the auction population ----

    /// The persisted set, overlaid with the pending item update.
    ///
    /// When a bid has been placed this session, the owning auction (found
    /// through the pending item's highest bid) is reconstructed with the
    /// updated item substituted in, giving readers the latest bid before any
    /// flush commits it.
    pub fn all_auctions(&self) -> Result<Vec<Auction>, Error<S::Error>> {
        let persisted = self.load_persisted()?;
        let Some(item) = &self.pending_item else {
            return Ok(persisted);
        };
        let Some(owner) = item.highest_bid().map(|bid| bid.auction_id) else {
            return Ok(persisted);
        };
        Ok(persisted
            .into_iter()
            .map(|auction| {
                if auction.id == owner {
                    auction.with_item(item.clone())
                } else {
                    auction
                }
            })
            .collect())
    }

    /// Persisted auctions that already ended (`end <= as_of`), minus the
    /// session's cancellations.
    pub fn past_auctions(&self, as_of: OffsetDateTime) -> Result<Vec<Auction>, Error<S::Error>> {
        let mut past: Vec<Auction> = self
            .load_persisted()?
            .into_iter()
            .filter(|auction| auction.end <= as_of)
            .collect();
        past.retain(|auction| !self.cancelled.contains(&auction.id));
        Ok(past)
    }

    /// Persisted auctions currently running (`start <= as_of < end`).
    ///
    /// Session-cancelled auctions are first marked cancelled and then
    /// filtered on the flag, so an auction whose persisted copy already
    /// carries the flag disappears from this view as well.
    pub fn active_auctions(&self, as_of: OffsetDateTime) -> Result<Vec<Auction>, Error<S::Error>> {
        self.classify(|auction| auction.start <= as_of && as_of < auction.end)
    }

    /// Persisted auctions that have not started yet (`start > as_of`),
    /// marked and filtered the same way as [`Self::active_auctions`].
    pub fn future_auctions(&self, as_of: OffsetDateTime) -> Result<Vec<Auction>, Error<S::Error>> {
        self.classify(|auction| auction.start > as_of)
    }

    fn classify(
        &self,
        keep: impl Fn(&Auction) -> bool,
    ) -> Result<Vec<Auction>, Error<S::Error>> {
        let mut matching = Vec::new();
        for mut auction in self.load_persisted()? {
            if keep(&auction) {
                if self.cancelled.contains(&auction.id) {
                    auction.cancelled = true;
                }
                matching.push(auction);
            }
        }
        matching.retain(|auction| !auction.cancelled);
        Ok(matching)
    }

    /// Every auction an administrator could still cancel: the union of the
    /// active, future and past views with this session's cancellations
    /// removed, deduplicated by id.
    pub fn cancelable_auctions(
        &self,
        as_of: OffsetDateTime,
    ) -> Result<Vec<Auction>, Error<S::Error>> {
        let mut by_id = BTreeMap::new();
        for auction in self
            .active_auctions(as_of)?
            .into_iter()
            .chain(self.future_auctions(as_of)?)
            .chain(self.past_auctions(as_of)?)
        {
            by_id.entry(auction.id).or_insert(auction);
        }
        Ok(by_id
            .into_values()
            .filter(|auction| !self.cancelled.contains(&auction.id))
            .collect())
    }

    /// Looks up a persisted auction by id.
    pub fn auction_by_id(&self, id: AuctionId) -> Result<Option<Auction>, Error<S::Error>> {
        Ok(self
            .load_persisted()?
            .into_iter()
            .find(|auction| auction.id == id))
    }

    /// The first persisted auction listing an item with the given name.
    pub fn auction_by_item_name(&self, name: &str) -> Result<Option<Auction>, Error<S::Error>> {
        Ok(self
            .load_persisted()?
            .into_iter()
            .find(|auction| auction.item(name).is_some()))
    }

    /// Persisted auctions fully inside `[start, end]`, bounds inclusive,
    /// minus the session's cancellations.
    ///
    /// An inverted range is a usage error, not an empty result.
    pub fn auctions_in_range(
        &self,
        start: OffsetDateTime,
        end: OffsetDateTime,
    ) -> Result<Vec<Auction>, Error<S::Error>> {
        if end < start {
            return Err(Error::InvalidRange);
        }
        let mut hits: Vec<Auction> = self
            .load_persisted()?
            .into_iter()
            .filter(|auction| auction.start >= start && auction.end <= end)
            .collect();
        hits.retain(|auction| !self.cancelled.contains(&auction.id));
        Ok(hits)
    }

    /// Auctions a bidder may still join: everything starting strictly after
    /// `as_of`, including the pending item overlay.
    pub fn open_for_bidding(
        &self,
        as_of: OffsetDateTime,
    ) -> Result<Vec<Auction>, Error<S::Error>> {
        Ok(self
            .all_auctions()?
            .into_iter()
            .filter(|auction| auction.start > as_of)
            .collect())
    }

    /// The auctions submitted during this session, not yet persisted.
    pub fn pending_auctions(&self) -> Vec<Auction> {
        self.added.clone()
    }

    /// Persisted auctions held by the contact's organization, plus this
    /// session's submissions.
    pub fn submitted_by(&self, contact: &NpContact) -> Result<Vec<Auction>, Error<S::Error>> {
        let mut submitted: Vec<Auction> = self
            .load_persisted()?
            .into_iter()
            .filter(|auction| auction.organization == contact.name)
            .collect();
        submitted.extend(self.added.iter().cloned());
        Ok(submitted)
    }

    /// Persisted auctions in which the bidder holds at least one bid.
    pub fn auctions_with_bids_by(
        &self,
        bidder: &Bidder,
    ) -> Result<Vec<Auction>, Error<S::Error>> {
        Ok(self
            .load_persisted()?
            .into_iter()
            .filter(|auction| auction.items.iter().any(|item| item.has_bid_by(&bidder.name)))
            .collect())
    }

    /// Items of the given auction carrying at least one bid by the bidder.
    pub fn items_bid_on(
        &self,
        bidder: &Bidder,
        auction: &Auction,
    ) -> Result<Vec<Item>, Error<S::Error>> {
        Ok(self
            .auction_by_id(auction.id)?
            .map(|persisted| {
                persisted
                    .items
                    .into_iter()
                    .filter(|item| item.has_bid_by(&bidder.name))
                    .collect()
            })
            .unwrap_or_default())
    }

    /// Every bid by the bidder across the persisted population.
    pub fn collected_bids(&self, bidder: &Bidder) -> Result<Vec<Bid>, Error<S::Error>> {
        let mut bids = Vec::new();
        for auction in self.load_persisted()? {
            for item in &auction.items {
                bids.extend(
                    item.bids
                        .iter()
                        .filter(|bid| bid.bidder == bidder.name)
                        .cloned(),
                );
            }
        }
        Ok(bids)
    }

    // ---- account lookups ----

    /// Looks up a bidder by username.
    pub fn bidder_by_username(&self, username: &str) -> Result<Option<Bidder>, Error<S::Error>> {
        let bidders = self.store.load_bidders().map_err(Error::StorageUnavailable)?;
        Ok(bidders.into_iter().find(|bidder| bidder.username == username))
    }

    /// Looks up a nonprofit contact by username.
    pub fn contact_by_username(
        &self,
        username: &str,
    ) -> Result<Option<NpContact>, Error<S::Error>> {
        let contacts = self
            .store
            .load_contacts()
            .map_err(Error::StorageUnavailable)?;
        Ok(contacts
            .into_iter()
            .find(|contact| contact.username == username))
    }

    /// Looks up an employee by username.
    pub fn employee_by_username(
        &self,
        username: &str,
    ) -> Result<Option<Employee>, Error<S::Error>> {
        let employees = self
            .store
            .load_employees()
            .map_err(Error::StorageUnavailable)?;
        Ok(employees
            .into_iter()
            .find(|employee| employee.username == username))
    }

    /// Whether a bidder with the given username exists.
    pub fn is_bidder_valid(&self, username: &str) -> Result<bool, Error<S::Error>> {
        Ok(self.bidder_by_username(username)?.is_some())
    }

    /// Whether a nonprofit contact with the given username exists.
    pub fn is_contact_valid(&self, username: &str) -> Result<bool, Error<S::Error>> {
        Ok(self.contact_by_username(username)?.is_some())
    }

    /// Whether an employee with the given username exists.
    pub fn is_employee_valid(&self, username: &str) -> Result<bool, Error<S::Error>> {
        Ok(self.employee_by_username(username)?.is_some())
    }

    // ---- scheduling ----

    /// Whether the candidate start falls inside the request window.
    pub fn requested_date_valid(
        &self,
        candidate_start: OffsetDateTime,
        as_of: OffsetDateTime,
    ) -> bool {
        self.policy
            .is_date_within_request_window(candidate_start, as_of)
    }

    /// Whether the candidate slot is free to book.
    ///
    /// Only this session's submissions are consulted.
    pub fn requested_date_available(
        &self,
        candidate_start: OffsetDateTime,
        candidate_end: OffsetDateTime,
    ) -> bool {
        self.policy
            .is_slot_available(candidate_start, candidate_end, &self.added)
    }

    /// Whether the marketplace accepts another auction this session.
    ///
    /// Compares the max-upcoming setting against the session-added count.
    pub fn is_auction_allowed(&self) -> bool {
        self.max_upcoming as usize > self.added.len()
    }

    /// The number of upcoming auctions the marketplace accepts.
    pub fn max_auctions_allowed(&self) -> u32 {
        self.max_upcoming
    }

    /// Adjusts the number of upcoming auctions the marketplace accepts.
    /// Committed to storage by the administrative flush.
    pub fn set_max_auctions_allowed(&mut self, max: u32) {
        self.max_upcoming = max;
    }

    // ---- commands ----

    /// Returns the next available auction id and advances the counter.
    pub fn next_auction_id(&mut self) -> AuctionId {
        let id = self.next_auction_id;
        self.next_auction_id += 1;
        AuctionId::from(id)
    }

    /// Records an auction submission in the session's added set. Storage is
    /// untouched until the contact's flush.
    pub fn add_auction(&mut self, auction: Auction) {
        self.added.push(auction);
    }

    /// Marks an auction cancelled, provided it holds no bids.
    ///
    /// Returns false, leaving all state untouched, when any item of the
    /// auction carries a bid. A recorded cancellation drops the auction from
    /// the classification views immediately; permanent removal from the
    /// snapshot happens on the administrative flush.
    pub fn cancel_auction(&mut self, auction: &Auction) -> bool {
        if auction.bid_count() == 0 {
            self.cancelled.insert(auction.id);
            true
        } else {
            false
        }
    }

    /// Appends the bid to the item and records the item as the session's
    /// pending mutation. The slot holds at most one item: a later bid on a
    /// different item overwrites it.
    pub fn place_bid(&mut self, mut item: Item, bid: Bid) {
        item.bids.push(bid);
        self.pending_item = Some(item);
    }

    // ---- session flushes ----

    /// Commits a bidder session: the merged auction view (including the
    /// pending item update) becomes the new snapshot, and the bidder
    /// population is rewritten unchanged.
    pub fn flush_bidder_session(&mut self, _bidder: &Bidder) -> Result<(), Error<S::Error>> {
        let auctions = self.all_auctions()?;
        let bidders = self.store.load_bidders().map_err(Error::StorageUnavailable)?;
        self.store
            .replace_auctions(&auctions)
            .map_err(Error::StorageUnavailable)?;
        self.store
            .replace_bidders(&bidders)
            .map_err(Error::StorageUnavailable)?;
        self.pending_item = None;
        Ok(())
    }

    /// Commits a nonprofit-contact session: this session's submissions are
    /// merged into the snapshot and the added set drains.
    pub fn flush_contact_session(&mut self) -> Result<(), Error<S::Error>> {
        let mut snapshot = self.load_persisted()?;
        snapshot.extend(self.added.iter().cloned());
        self.store
            .replace_auctions(&snapshot)
            .map_err(Error::StorageUnavailable)?;
        self.added.clear();
        Ok(())
    }

    /// Commits an administrative session: the max-upcoming setting is
    /// persisted, session-cancelled auctions are removed from the snapshot
    /// for good, and the cancelled set drains.
    pub fn flush_admin_session(&mut self) -> Result<(), Error<S::Error>> {
        self.store
            .replace_max_upcoming(self.max_upcoming)
            .map_err(Error::StorageUnavailable)?;
        let snapshot: Vec<Auction> = self
            .load_persisted()?
            .into_iter()
            .filter(|auction| !self.cancelled.contains(&auction.id))
            .collect();
        self.store
            .replace_auctions(&snapshot)
            .map_err(Error::StorageUnavailable)?;
        self.cancelled.clear();
        Ok(())
    }
}

/// Orders auctions by ascending end instant. The sort is stable, so
/// same-instant auctions keep their relative order.
pub fn sort_by_end(mut auctions: Vec<Auction>) -> Vec<Auction> {
    auctions.sort_by(|a, b| a.end.cmp(&b.end));
    auctions
}

/// Orders auctions by descending start instant.
pub fn sort_by_start_descending(mut auctions: Vec<Auction>) -> Vec<Auction> {
    auctions.sort_by(|a, b| b.start.cmp(&a.start));
    auctions
}
