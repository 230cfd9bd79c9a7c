pub mod format;
pub mod ledger_manager;
pub mod services;
pub mod time;
pub mod utils;
pub mod validation;

pub use ledger_manager::LedgerManager;
pub use time::{Clock, FixedClock, SystemClock};
pub use validation::{validate_category, validate_transaction};
