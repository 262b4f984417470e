pub mod entity;
pub mod error;
pub mod plugins;
pub mod prelude;
pub mod state;
pub mod sv;
pub mod utils;
