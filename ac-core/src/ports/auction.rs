use crate::models::Auction;

/// Whole-collection contract for the auction population.
///
/// There are no row-level operations: a load returns the entire persisted
/// set and a replacement swaps it wholesale and atomically. A load fails
/// when the backing collection is absent or unreadable.
pub trait AuctionRepository: super::Repository {
    /// Returns the full persisted auction set.
    fn load_auctions(&self) -> Result<Vec<Auction>, Self::Error>;

    /// Atomically replaces the persisted auction set.
    fn replace_auctions(&mut self, auctions: &[Auction]) -> Result<(), Self::Error>;
}
