use std::sync::Mutex;

use crate::{
    domain::Ledger,
    errors::{LedgerError, LedgerResult},
};

use super::LedgerStore;

/// In-process store, handy for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: Mutex<Option<Ledger>>,
    saves: Mutex<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ledger(ledger: Ledger) -> Self {
        Self {
            slot: Mutex::new(Some(ledger)),
            saves: Mutex::new(0),
        }
    }

    /// Number of successful `save` calls.
    pub fn save_count(&self) -> usize {
        self.saves.lock().map(|count| *count).unwrap_or_default()
    }
}

impl LedgerStore for MemoryStore {
    fn load(&self) -> LedgerResult<Option<Ledger>> {
        let slot = self.slot.lock().map_err(|_| poisoned())?;
        Ok(slot.clone())
    }

    fn save(&self, ledger: &Ledger) -> LedgerResult<()> {
        *self.slot.lock().map_err(|_| poisoned())? = Some(ledger.clone());
        *self.saves.lock().map_err(|_| poisoned())? += 1;
        Ok(())
    }
}

fn poisoned() -> LedgerError {
    LedgerError::Io(std::io::Error::new(
        std::io::ErrorKind::Other,
        "memory store lock poisoned",
    ))
}
