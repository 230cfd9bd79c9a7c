use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    category::Category,
    common::{Identifiable, NamedEntity, TransactionKind},
    transaction::Transaction,
};

pub const CURRENT_LEDGER_VERSION: &str = "1.0.0";
pub const DEFAULT_CURRENCY_SYMBOL: &str = "¥";
pub const DEFAULT_DATE_FORMAT: &str = "YYYY-MM-DD";

/// Inclusive range of calendar dates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    /// Builds a window, swapping the bounds when they arrive reversed.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        if end < start {
            Self {
                start: end,
                end: start,
            }
        } else {
            Self { start, end }
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}


/// Display preferences stored alongside the ledger. The core never interprets them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub currency: String,
    pub date_format: String,
    #[serde(default)]
    pub theme: Theme,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency: DEFAULT_CURRENCY_SYMBOL.into(),
            date_format: DEFAULT_DATE_FORMAT.into(),
            theme: Theme::default(),
        }
    }
}

/// Aggregate root: every mutation produces a fresh `Ledger` value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Ledger {
    /// Newest first.
    pub transactions: Vec<Transaction>,
    pub categories: Vec<Category>,
    #[serde(default)]
    pub settings: Settings,
    #[serde(default = "Ledger::version_default")]
    pub version: String,
    #[serde(default = "Ledger::last_updated_default")]
    pub last_updated: DateTime<Utc>,
}

impl Ledger {
    /// Empty ledger with no categories.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            transactions: Vec::new(),
            categories: Vec::new(),
            settings: Settings::default(),
            version: Self::version_default(),
            last_updated: now,
        }
    }

    /// First-run ledger seeded with the stock income and expense categories.
    pub fn with_default_categories(now: DateTime<Utc>) -> Self {
        Self {
            categories: default_categories(),
            ..Self::new(now)
        }
    }

    pub fn transaction(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id() == id)
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|category| category.id() == id)
    }

    /// Resolves a category id to its display name, if the reference is live.
    pub fn category_name(&self, id: &str) -> Option<&str> {
        self.category(id).map(NamedEntity::name)
    }

    pub fn categories_of(&self, kind: TransactionKind) -> Vec<&Category> {
        self.categories
            .iter()
            .filter(|category| category.kind == kind)
            .collect()
    }

    /// Transactions whose category id resolves to nothing.
    pub fn dangling_transactions(&self) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .filter(|txn| self.category(&txn.category).is_none())
            .collect()
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.last_updated = now;
    }

    pub fn version_default() -> String {
        CURRENT_LEDGER_VERSION.into()
    }

    pub fn last_updated_default() -> DateTime<Utc> {
        Utc::now()
    }
}

/// Stock categories created on first run.
pub fn default_categories() -> Vec<Category> {
    vec![
        Category::new("income-salary", "給与", TransactionKind::Income, "#10b981"),
        Category::new("income-bonus", "ボーナス", TransactionKind::Income, "#059669"),
        Category::new("expense-food", "食費", TransactionKind::Expense, "#ef4444"),
        Category::new("expense-transport", "交通費", TransactionKind::Expense, "#f97316"),
        Category::new("expense-utilities", "光熱費", TransactionKind::Expense, "#8b5cf6"),
        Category::new(
            "expense-entertainment",
            "娯楽",
            TransactionKind::Expense,
            "#06b6d4",
        ),
    ]
}
