use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::common::{Displayable, Identifiable, TransactionKind};

/// A single dated money movement recorded in the ledger.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: f64,
    /// Category id. Not guaranteed to resolve.
    pub category: String,
    #[serde(default)]
    pub description: String,
    /// Missing timestamps in imported documents decode as the Unix epoch.
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Materialises a draft with the supplied identifier and timestamp.
    ///
    /// A non-finite amount is stored as `0.0` so the record stays JSON-representable.
    pub fn from_draft(id: impl Into<String>, draft: TransactionDraft, now: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            date: draft.date,
            kind: draft.kind,
            amount: finite_or_zero(draft.amount),
            category: draft.category,
            description: draft.description,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrites every field present in `patch` and stamps `updated_at`.
    ///
    /// Non-finite amounts are ignored.
    pub fn apply_patch(&mut self, patch: &TransactionPatch, now: DateTime<Utc>) {
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(amount) = patch.amount.filter(|amount| amount.is_finite()) {
            self.amount = amount;
        }
        if let Some(category) = &patch.category {
            self.category = category.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        self.updated_at = now;
    }

    /// `YYYY-MM` bucket used by monthly statistics.
    pub fn month_key(&self) -> String {
        self.date.format("%Y-%m").to_string()
    }
}

// JSON has no encoding for NaN or infinities; serde_json would write `null`.
fn finite_or_zero(amount: f64) -> f64 {
    if amount.is_finite() {
        amount
    } else {
        0.0
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Displayable for Transaction {
    fn display_label(&self) -> String {
        format!("txn:{} [{} {}]", self.id, self.kind, self.date)
    }
}

/// Caller-supplied fields for a new transaction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDraft {
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: f64,
    pub category: String,
    #[serde(default)]
    pub description: String,
}

impl TransactionDraft {
    pub fn new(
        date: NaiveDate,
        kind: TransactionKind,
        amount: f64,
        category: impl Into<String>,
    ) -> Self {
        Self {
            date,
            kind,
            amount,
            category: category.into(),
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Partial transaction used for updates and form validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<TransactionKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TransactionPatch {
    pub fn amount(amount: f64) -> Self {
        Self {
            amount: Some(amount),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl From<&TransactionDraft> for TransactionPatch {
    fn from(draft: &TransactionDraft) -> Self {
        Self {
            date: Some(draft.date),
            kind: Some(draft.kind),
            amount: Some(draft.amount),
            category: Some(draft.category.clone()),
            description: Some(draft.description.clone()),
        }
    }
}
