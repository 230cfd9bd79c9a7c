use tracing::{info, warn};

use crate::core::time::{Clock, SystemClock};
use crate::errors::LedgerResult;
use crate::domain::Ledger;
use crate::storage::LedgerStore;

/// Holds the current ledger snapshot and persists every derived snapshot through the store.
pub struct LedgerManager {
    store: Box<dyn LedgerStore>,
    clock: Box<dyn Clock>,
    current: Ledger,
}

impl LedgerManager {
    /// Loads the stored ledger, seeding and saving the default one when nothing is stored yet.
    pub fn open(store: Box<dyn LedgerStore>) -> LedgerResult<Self> {
        Self::open_with_clock(store, Box::new(SystemClock))
    }

    pub fn open_with_clock(store: Box<dyn LedgerStore>, clock: Box<dyn Clock>) -> LedgerResult<Self> {
        let current = match store.load()? {
            Some(ledger) => ledger,
            None => {
                warn!("no stored ledger found; seeding default categories");
                let seeded = Ledger::with_default_categories(clock.now());
                store.save(&seeded)?;
                seeded
            }
        };
        info!(
            transactions = current.transactions.len(),
            categories = current.categories.len(),
            "ledger opened"
        );
        Ok(Self {
            store,
            clock,
            current,
        })
    }

    pub fn current(&self) -> &Ledger {
        &self.current
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Derives the next snapshot with `mutation`, saves it and only then makes it current.
    ///
    /// A failed save leaves the current snapshot untouched and is returned unchanged.
    pub fn apply<F>(&mut self, mutation: F) -> LedgerResult<&Ledger>
    where
        F: FnOnce(&Ledger) -> Ledger,
    {
        let next = mutation(&self.current);
        self.store.save(&next)?;
        self.current = next;
        Ok(&self.current)
    }

    /// Replaces the current snapshot wholesale, e.g. after an import.
    pub fn replace(&mut self, ledger: Ledger) -> LedgerResult<&Ledger> {
        self.apply(move |_| ledger)
    }
}
