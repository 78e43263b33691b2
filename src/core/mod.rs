//! Application services: the ledger controller, derived views, and shared helpers.

pub mod ledger_manager;
pub mod services;
pub mod time;
pub mod utils;

pub use ledger_manager::LedgerManager;
pub use time::{Clock, FixedClock, SystemClock};
