pub mod account;
pub mod catalog;
pub mod period;
pub mod plan;
pub mod status;
pub mod store;
pub mod sweep;
pub mod sync;
#[cfg(test)]
pub mod test_utils;

pub use account::Account;
pub use catalog::{Catalog, PlanLookup, PlanTable};
pub use plan::Plan;
pub use status::{Derived, Status};
pub use store::{AccountKind, AccountRow, AccountStore};
pub use sweep::Sweep;
pub use sync::{SyncReport, Synchronizer};

use crate::prelude::*;

pub struct Services<'a> {
  pub account: Account<'a>,
  pub plan: Plan<'a>,
}

impl<'a> Services<'a> {
  pub fn new(db: &'a DatabaseConnection, plans: &'a PlanTable) -> Self {
    Self { account: Account::new(db, plans), plan: Plan::new(db, plans) }
  }
}
