pub mod json_backend;
pub mod memory;

use crate::{errors::LedgerResult, domain::Ledger};

/// Load/save port through which the ledger is persisted.
///
/// Retries and concurrent-writer policy belong to the caller; the last `save` wins.
pub trait LedgerStore: Send + Sync {
    /// Returns `Ok(None)` when nothing has been stored yet.
    fn load(&self) -> LedgerResult<Option<Ledger>>;
    fn save(&self, ledger: &Ledger) -> LedgerResult<()>;
}

pub use json_backend::{load_ledger_from_path, save_ledger_to_path, tmp_path, JsonFileStore};
pub use memory::MemoryStore;
