use crate::models::{Bidder, Employee, NpContact};

/// Whole-collection contracts for the three account populations.
///
/// The control center treats these as passthrough sets: it scans them for
/// lookups and rewrites them wholesale on flush, applying no account-level
/// merge logic of its own.
pub trait AccountRepository: super::Repository {
    /// Returns the full bidder population.
    fn load_bidders(&self) -> Result<Vec<Bidder>, Self::Error>;

    /// Atomically replaces the bidder population.
    fn replace_bidders(&mut self, bidders: &[Bidder]) -> Result<(), Self::Error>;

    /// Returns the full nonprofit-contact population.
    fn load_contacts(&self) -> Result<Vec<NpContact>, Self::Error>;

    /// Atomically replaces the nonprofit-contact population.
    fn replace_contacts(&mut self, contacts: &[NpContact]) -> Result<(), Self::Error>;

    /// Returns the full employee population.
    fn load_employees(&self) -> Result<Vec<Employee>, Self::Error>;

    /// Atomically replaces the employee population.
    fn replace_employees(&mut self, employees: &[Employee]) -> Result<(), Self::Error>;
}
