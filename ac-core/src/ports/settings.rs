/// Contract for the single marketplace setting: the number of upcoming
/// auctions the marketplace is willing to accept.
pub trait SettingsRepository: super::Repository {
    /// Returns the persisted max-upcoming-auctions setting.
    fn load_max_upcoming(&self) -> Result<u32, Self::Error>;

    /// Replaces the persisted max-upcoming-auctions setting.
    fn replace_max_upcoming(&mut self, max: u32) -> Result<(), Self::Error>;
}
