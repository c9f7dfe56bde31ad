mod account;
mod auction;
mod settings;

pub use account::AccountRepository;
pub use auction::AuctionRepository;
pub use settings::SettingsRepository;

/// Base trait for storage adapters.
///
/// Every port surfaces the adapter's own failure type; the control center
/// wraps it into its `StorageUnavailable` variant. Validation outcomes are
/// never errors, so adapters only report genuine storage faults here.
pub trait Repository {
    /// The adapter-specific failure type surfaced through every port.
    type Error: std::error::Error + Send + Sync + 'static;
}

/// The marker trait the control center is generic over, implying every
/// collection contract.
pub trait MarketRepository: AuctionRepository + AccountRepository + SettingsRepository {}
