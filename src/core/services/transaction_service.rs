//! Non-destructive create/update/delete helpers for ledger transactions.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::core::utils::generate_id_at;
use crate::domain::{Ledger, Transaction, TransactionDraft, TransactionPatch};

/// Every operation borrows the input ledger and returns a new snapshot.
pub struct TransactionService;

impl TransactionService {
    /// Inserts a new transaction at the head of the sequence.
    pub fn add(ledger: &Ledger, draft: TransactionDraft) -> Ledger {
        Self::add_at(ledger, draft, Utc::now())
    }

    pub fn add_at(ledger: &Ledger, draft: TransactionDraft, now: DateTime<Utc>) -> Ledger {
        let transaction = Transaction::from_draft(generate_id_at(now), draft, now);
        debug!(id = %transaction.id, date = %transaction.date, "adding transaction");

        let mut transactions = Vec::with_capacity(ledger.transactions.len() + 1);
        transactions.push(transaction);
        transactions.extend(ledger.transactions.iter().cloned());

        let mut next = Ledger {
            transactions,
            ..ledger.clone()
        };
        next.touch(now);
        next
    }

    /// Applies `patch` to the transaction with `id`.
    ///
    /// An unknown id leaves the transactions untouched, but `last_updated` still advances.
    pub fn update(ledger: &Ledger, id: &str, patch: &TransactionPatch) -> Ledger {
        Self::update_at(ledger, id, patch, Utc::now())
    }

    pub fn update_at(
        ledger: &Ledger,
        id: &str,
        patch: &TransactionPatch,
        now: DateTime<Utc>,
    ) -> Ledger {
        let mut next = ledger.clone();
        match next.transactions.iter_mut().find(|txn| txn.id == id) {
            Some(txn) => {
                txn.apply_patch(patch, now);
                debug!(id, "updated transaction");
            }
            None => debug!(id, "update skipped: transaction not found"),
        }
        next.touch(now);
        next
    }

    /// Removes the transaction with `id`. `last_updated` advances even when nothing matched.
    pub fn delete(ledger: &Ledger, id: &str) -> Ledger {
        Self::delete_at(ledger, id, Utc::now())
    }

    pub fn delete_at(ledger: &Ledger, id: &str, now: DateTime<Utc>) -> Ledger {
        let mut next = ledger.clone();
        let before = next.transactions.len();
        next.transactions.retain(|txn| txn.id != id);
        debug!(id, removed = before - next.transactions.len(), "deleted transaction");
        next.touch(now);
        next
    }
}
