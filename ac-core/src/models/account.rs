use serde::{Deserialize, Serialize};

use super::Bid;

/// A marketplace bidder, keyed by username.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bidder {
    /// Display name; bids reference bidders by this name
    pub name: String,

    /// Login name, unique across the bidder population
    pub username: String,

    /// The bidder's own bids, as collected from the auction population
    #[serde(default)]
    pub bids: Vec<Bid>,
}

impl Bidder {
    /// Creates a bidder with no collected bids.
    pub fn new(name: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            username: username.into(),
            bids: Vec::new(),
        }
    }
}

/// A nonprofit contact, the role that submits auction requests. The
/// organization field of a submitted auction carries the contact's name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NpContact {
    /// Display name, doubling as the represented organization's name
    pub name: String,

    /// Login name, unique across the contact population
    pub username: String,
}

impl NpContact {
    /// Creates a nonprofit contact.
    pub fn new(name: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            username: username.into(),
        }
    }
}

/// A marketplace employee with administrative privileges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Display name
    pub name: String,

    /// Login name, unique across the employee population
    pub username: String,
}

impl Employee {
    /// Creates an employee record.
    pub fn new(name: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            username: username.into(),
        }
    }
}
