use serde::{Deserialize, Serialize};

use super::Bid;

/// A donated good listed under exactly one auction, targeted by zero or
/// more bids. An item holding at least one bid pins its auction: the
/// auction can no longer be cancelled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Display name; also the key used when a pending item mutation is
    /// merged back into its auction
    pub name: String,

    /// Bids received so far, in placement order
    #[serde(default)]
    pub bids: Vec<Bid>,
}

impl Item {
    /// Creates an item with no bids.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bids: Vec::new(),
        }
    }

    /// The bid with the highest amount, if any bid has been placed.
    pub fn highest_bid(&self) -> Option<&Bid> {
        self.bids
            .iter()
            .max_by(|a, b| a.amount.total_cmp(&b.amount))
    }

    /// Whether the named bidder has placed at least one bid on this item.
    pub fn has_bid_by(&self, bidder: &str) -> bool {
        self.bids.iter().any(|bid| bid.bidder == bidder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AuctionId;

    #[test]
    fn highest_bid_picks_the_largest_amount() {
        let mut item = Item::new("Quilt");
        assert!(item.highest_bid().is_none());

        let auction = AuctionId::from(1);
        item.bids.push(Bid::new("Ada Lovelace", 25.0, auction));
        item.bids.push(Bid::new("Grace Hopper", 55.0, auction));
        item.bids.push(Bid::new("Ada Lovelace", 40.0, auction));

        let highest = item.highest_bid().unwrap();
        assert_eq!(highest.bidder, "Grace Hopper");
        assert_eq!(highest.amount, 55.0);
    }

    #[test]
    fn has_bid_by_matches_the_bidder_name() {
        let mut item = Item::new("Quilt");
        item.bids
            .push(Bid::new("Ada Lovelace", 25.0, AuctionId::from(1)));
        assert!(item.has_bid_by("Ada Lovelace"));
        assert!(!item.has_bid_by("Grace Hopper"));
    }
}
