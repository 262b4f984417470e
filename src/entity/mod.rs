pub mod client;
pub mod plan;
pub mod profile;
pub mod reseller;

pub use profile::{AccountStatus, Role};
