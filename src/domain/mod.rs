pub mod category;
pub mod common;
pub mod ledger;
pub mod transaction;

pub use category::{Category, CategoryDraft, CategoryPatch};
pub use common::{Displayable, Identifiable, NamedEntity, TransactionKind};
pub use ledger::{DateWindow, Ledger, Settings, Theme};
pub use transaction::{Transaction, TransactionDraft, TransactionPatch};
