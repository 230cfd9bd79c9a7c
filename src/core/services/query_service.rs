//! Predicate filtering and stable sorting over transaction sequences.

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{Transaction, TransactionKind};

/// Transaction type predicate; `All` disables the check.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum KindFilter {
    All,
    Income,
    Expense,
}

impl KindFilter {
    pub fn matches(&self, kind: TransactionKind) -> bool {
        match self {
            KindFilter::All => true,
            KindFilter::Income => kind == TransactionKind::Income,
            KindFilter::Expense => kind == TransactionKind::Expense,
        }
    }
}

/// Optional predicates combined with logical AND. Bounds are inclusive.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_from: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_to: Option<NaiveDate>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<KindFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TransactionFilters {
    pub fn between(date_from: NaiveDate, date_to: NaiveDate) -> Self {
        Self {
            date_from: Some(date_from),
            date_to: Some(date_to),
            ..Self::default()
        }
    }

    pub fn matches(&self, txn: &Transaction) -> bool {
        if self.date_from.map_or(false, |from| txn.date < from) {
            return false;
        }
        if self.date_to.map_or(false, |to| txn.date > to) {
            return false;
        }
        if self.kind.map_or(false, |kind| !kind.matches(txn.kind)) {
            return false;
        }
        if let Some(category) = non_empty(&self.category) {
            if txn.category != category {
                return false;
            }
        }
        if self.amount_min.map_or(false, |min| txn.amount < min) {
            return false;
        }
        if self.amount_max.map_or(false, |max| txn.amount > max) {
            return false;
        }
        if let Some(needle) = non_empty(&self.description) {
            if !txn
                .description
                .to_lowercase()
                .contains(&needle.to_lowercase())
            {
                return false;
            }
        }
        true
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Date,
    Amount,
    Category,
    Description,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

pub struct QueryService;

impl QueryService {
    /// Keeps the transactions matching every present predicate, preserving their order.
    pub fn filter(transactions: &[Transaction], filters: &TransactionFilters) -> Vec<Transaction> {
        transactions
            .iter()
            .filter(|txn| filters.matches(txn))
            .cloned()
            .collect()
    }

    /// Stable sort by `field`; equal keys keep their original relative order in both directions.
    pub fn sort(transactions: &[Transaction], field: SortField, order: SortOrder) -> Vec<Transaction> {
        let mut sorted = transactions.to_vec();
        sorted.sort_by(|a, b| {
            let ordering = compare_by(a, b, field);
            match order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });
        sorted
    }
}

fn compare_by(a: &Transaction, b: &Transaction, field: SortField) -> Ordering {
    match field {
        SortField::Date => a.date.cmp(&b.date),
        SortField::Amount => a.amount.total_cmp(&b.amount),
        SortField::Category => locale_compare(&a.category, &b.category),
        SortField::Description => locale_compare(&a.description, &b.description),
    }
}

/// Case-folded comparison with raw code points as tie-break, approximating a collator.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}
