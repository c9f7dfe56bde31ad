use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::Item;

/// The sequentially-assigned identifier of an auction.
///
/// Identifiers are dense: the next available id is always the persisted
/// count plus the session-added count plus one, so they double as a
/// human-friendly reference number in presentation layers.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
#[repr(transparent)]
pub struct AuctionId(i64);

impl From<i64> for AuctionId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<AuctionId> for i64 {
    fn from(value: AuctionId) -> Self {
        value.0
    }
}

impl std::fmt::Display for AuctionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A scheduled, time-boxed event during which donated items accept bids.
///
/// An auction starts life as a submission request held in the session's
/// pending set and becomes committed once a flush writes it into the
/// persisted snapshot. It is cancellable only while it holds zero bids
/// across all of its items. Invariant: `start < end`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Auction {
    /// Unique identifier, assigned by the control center at submission time
    pub id: AuctionId,

    /// The nonprofit organization holding the auction
    pub organization: String,

    /// The scheduled opening instant
    #[serde(with = "time::serde::rfc3339")]
    pub start: OffsetDateTime,

    /// The scheduled closing instant
    #[serde(with = "time::serde::rfc3339")]
    pub end: OffsetDateTime,

    /// The donated goods listed under this auction
    pub items: Vec<Item>,

    /// Cancellation marker. Session-cancelled auctions carry this flag in
    /// the classification views until an administrative flush removes them
    /// from the persisted snapshot for good.
    #[serde(default)]
    pub cancelled: bool,
}

impl Auction {
    /// Creates a new, bid-free auction request with no items yet.
    pub fn new(
        id: AuctionId,
        organization: impl Into<String>,
        start: OffsetDateTime,
        end: OffsetDateTime,
    ) -> Self {
        debug_assert!(start < end, "auction must end after it starts");
        Self {
            id,
            organization: organization.into(),
            start,
            end,
            items: Vec::new(),
            cancelled: false,
        }
    }

    /// Total number of bids across all of the auction's items.
    pub fn bid_count(&self) -> usize {
        self.items.iter().map(|item| item.bids.len()).sum()
    }

    /// Looks up an item by name.
    pub fn item(&self, name: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.name == name)
    }

    /// Clones the auction, substituting `item` for the original item of the
    /// same name and carrying every other item over unchanged.
    pub fn with_item(&self, item: Item) -> Auction {
        let mut items = Vec::with_capacity(self.items.len() + 1);
        let name = item.name.clone();
        items.push(item);
        items.extend(
            self.items
                .iter()
                .filter(|existing| existing.name != name)
                .cloned(),
        );
        Auction {
            id: self.id,
            organization: self.organization.clone(),
            start: self.start,
            end: self.end,
            items,
            cancelled: self.cancelled,
        }
    }
}
