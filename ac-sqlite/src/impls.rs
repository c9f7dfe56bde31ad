use ac_core::models::{Auction, Bidder, Employee, NpContact};
use ac_core::ports::{
    AccountRepository, AuctionRepository, MarketRepository, Repository, SettingsRepository,
};

use crate::{Db, Error, MAX_UPCOMING};

impl Repository for Db {
    type Error = Error;
}

impl AuctionRepository for Db {
    fn load_auctions(&self) -> Result<Vec<Auction>, Error> {
        self.load_value("auctions")
    }

    fn replace_auctions(&mut self, auctions: &[Auction]) -> Result<(), Error> {
        self.replace_value("auctions", &auctions)
    }
}

impl AccountRepository for Db {
    fn load_bidders(&self) -> Result<Vec<Bidder>, Error> {
        self.load_value("bidders")
    }

    fn replace_bidders(&mut self, bidders: &[Bidder]) -> Result<(), Error> {
        self.replace_value("bidders", &bidders)
    }

    fn load_contacts(&self) -> Result<Vec<NpContact>, Error> {
        self.load_value("contacts")
    }

    fn replace_contacts(&mut self, contacts: &[NpContact]) -> Result<(), Error> {
        self.replace_value("contacts", &contacts)
    }

    fn load_employees(&self) -> Result<Vec<Employee>, Error> {
        self.load_value("employees")
    }

    fn replace_employees(&mut self, employees: &[Employee]) -> Result<(), Error> {
        self.replace_value("employees", &employees)
    }
}

impl SettingsRepository for Db {
    fn load_max_upcoming(&self) -> Result<u32, Error> {
        self.load_value(MAX_UPCOMING)
    }

    fn replace_max_upcoming(&mut self, max: u32) -> Result<(), Error> {
        self.replace_value(MAX_UPCOMING, &max)
    }
}

impl MarketRepository for Db {}
