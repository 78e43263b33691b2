//! Expense ledger domain models and persistence-friendly types.

pub mod category;
pub mod expense;
#[allow(clippy::module_inception)]
pub mod ledger;

pub use category::Category;
pub use expense::{CreationStamp, ExpenseRecord, DEFAULT_DATE_FORMAT};
pub use ledger::{parse_amount, AddOutcome, Ledger, Rejection};
