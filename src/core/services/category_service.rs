use chrono::{DateTime, Utc};
use tracing::debug;

use crate::core::utils::generate_id_at;
use crate::domain::{Category, CategoryDraft, CategoryPatch, Ledger};

/// Category counterpart of [`super::TransactionService`]. Deletions never cascade.
pub struct CategoryService;

impl CategoryService {
    /// Appends a new category with a freshly generated id.
    pub fn add(ledger: &Ledger, draft: CategoryDraft) -> Ledger {
        Self::add_at(ledger, draft, Utc::now())
    }

    pub fn add_at(ledger: &Ledger, draft: CategoryDraft, now: DateTime<Utc>) -> Ledger {
        let category = Category::from_draft(generate_id_at(now), draft);
        debug!(id = %category.id, name = %category.name, "adding category");
        let mut next = ledger.clone();
        next.categories.push(category);
        next.touch(now);
        next
    }

    pub fn update(ledger: &Ledger, id: &str, patch: &CategoryPatch) -> Ledger {
        Self::update_at(ledger, id, patch, Utc::now())
    }

    pub fn update_at(
        ledger: &Ledger,
        id: &str,
        patch: &CategoryPatch,
        now: DateTime<Utc>,
    ) -> Ledger {
        let mut next = ledger.clone();
        if let Some(category) = next.categories.iter_mut().find(|cat| cat.id == id) {
            category.apply_patch(patch);
            debug!(id, "updated category");
        }
        next.touch(now);
        next
    }

    /// Removes the category; transactions referencing it keep the now dangling id.
    pub fn delete(ledger: &Ledger, id: &str) -> Ledger {
        Self::delete_at(ledger, id, Utc::now())
    }

    pub fn delete_at(ledger: &Ledger, id: &str, now: DateTime<Utc>) -> Ledger {
        let mut next = ledger.clone();
        next.categories.retain(|category| category.id != id);
        debug!(id, "deleted category");
        next.touch(now);
        next
    }
}
