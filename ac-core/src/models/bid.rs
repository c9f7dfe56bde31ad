use serde::{Deserialize, Serialize};

use super::AuctionId;

/// A bidder's offer on an item. Immutable once placed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bid {
    /// The bidder's display name
    pub bidder: String,

    /// The offered amount, in dollars
    pub amount: f64,

    /// The auction the bid-on item belongs to. This is a back-reference,
    /// not an ownership edge; items own their bids.
    pub auction_id: AuctionId,
}

impl Bid {
    /// Creates a bid on an item of the given auction.
    pub fn new(bidder: impl Into<String>, amount: f64, auction_id: AuctionId) -> Self {
        Self {
            bidder: bidder.into(),
            amount,
            auction_id,
        }
    }
}
