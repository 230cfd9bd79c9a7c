//! JSON and CSV serialisation of ledgers.

use std::str::FromStr;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::domain::{Ledger, TransactionKind};
use crate::errors::{LedgerError, LedgerResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl FromStr for ExportFormat {
    type Err = LedgerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(LedgerError::Format(format!(
                "unsupported export format `{other}`"
            ))),
        }
    }
}

/// Language of the CSV header and type labels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CsvLocale {
    #[default]
    Japanese,
    English,
}

impl CsvLocale {
    pub fn labels(&self) -> CsvLabels {
        match self {
            CsvLocale::Japanese => CsvLabels::japanese(),
            CsvLocale::English => CsvLabels::english(),
        }
    }
}

/// Fixed column and type labels written by the CSV exporter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvLabels {
    pub date: &'static str,
    pub kind: &'static str,
    pub amount: &'static str,
    pub category: &'static str,
    pub description: &'static str,
    pub income: &'static str,
    pub expense: &'static str,
}

impl CsvLabels {
    pub fn japanese() -> Self {
        Self {
            date: "日付",
            kind: "種類",
            amount: "金額",
            category: "カテゴリ",
            description: "説明",
            income: "収入",
            expense: "支出",
        }
    }

    pub fn english() -> Self {
        Self {
            date: "Date",
            kind: "Type",
            amount: "Amount",
            category: "Category",
            description: "Description",
            income: "Income",
            expense: "Expense",
        }
    }

    fn header(&self) -> [&'static str; 5] {
        [
            self.date,
            self.kind,
            self.amount,
            self.category,
            self.description,
        ]
    }

    fn kind_label(&self, kind: TransactionKind) -> &'static str {
        match kind {
            TransactionKind::Income => self.income,
            TransactionKind::Expense => self.expense,
        }
    }
}

impl Default for CsvLabels {
    fn default() -> Self {
        Self::japanese()
    }
}

pub struct ExportService;

impl ExportService {
    pub fn export(ledger: &Ledger, format: ExportFormat) -> LedgerResult<String> {
        match format {
            ExportFormat::Json => Self::export_json(ledger),
            ExportFormat::Csv => Ok(Self::export_csv(ledger)),
        }
    }

    /// Pretty-printed dump; field order is fixed so unchanged ledgers export byte-identically.
    pub fn export_json(ledger: &Ledger) -> LedgerResult<String> {
        let json = serde_json::to_string_pretty(ledger)?;
        info!(
            transactions = ledger.transactions.len(),
            bytes = json.len(),
            "exported ledger as JSON"
        );
        Ok(json)
    }

    pub fn export_csv(ledger: &Ledger) -> String {
        Self::export_csv_with_labels(ledger, &CsvLabels::default())
    }

    /// Header plus one row per transaction in sequence order.
    ///
    /// Fields are joined with a bare comma. Embedded commas, quotes and newlines are not escaped.
    pub fn export_csv_with_labels(ledger: &Ledger, labels: &CsvLabels) -> String {
        let mut lines = Vec::with_capacity(ledger.transactions.len() + 1);
        lines.push(labels.header().join(","));
        for txn in &ledger.transactions {
            let row = [
                txn.date.format("%Y-%m-%d").to_string(),
                labels.kind_label(txn.kind).to_string(),
                txn.amount.to_string(),
                ledger.category_name(&txn.category).unwrap_or_default().to_string(),
                txn.description.clone(),
            ];
            lines.push(row.join(","));
        }
        info!(rows = ledger.transactions.len(), "exported ledger as CSV");
        lines.join("\n")
    }

    /// Decodes a JSON document into a ledger.
    ///
    /// Only the top-level shape is enforced: the text must be JSON with `transactions`
    /// and `categories` arrays. Missing entry fields take their defaults, entries that
    /// still cannot be represented are skipped, and absent metadata is defaulted.
    pub fn import(text: &str) -> LedgerResult<Ledger> {
        let value: Value = serde_json::from_str(text).map_err(|err| {
            warn!(error = %err, "import rejected: not JSON");
            LedgerError::Format(format!("invalid JSON: {err}"))
        })?;
        let transactions = array_field(&value, "transactions")?;
        let categories = array_field(&value, "categories")?;

        let ledger = Ledger {
            transactions: decode_entries(transactions, "transactions"),
            categories: decode_entries(categories, "categories"),
            settings: decode_field(&value, "settings").unwrap_or_default(),
            version: decode_field(&value, "version").unwrap_or_else(Ledger::version_default),
            last_updated: decode_field(&value, "lastUpdated")
                .unwrap_or_else(Ledger::last_updated_default),
        };
        info!(
            transactions = ledger.transactions.len(),
            skipped = transactions.len() - ledger.transactions.len(),
            categories = ledger.categories.len(),
            "imported ledger"
        );
        Ok(ledger)
    }
}

fn array_field<'a>(value: &'a Value, field: &str) -> LedgerResult<&'a [Value]> {
    match value.get(field).and_then(Value::as_array) {
        Some(items) => Ok(items),
        None => {
            warn!(field, "import rejected: missing array");
            Err(LedgerError::Format(format!("invalid {field} data")))
        }
    }
}

fn decode_entries<T: DeserializeOwned>(items: &[Value], field: &str) -> Vec<T> {
    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| match T::deserialize(item) {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!(field, index, error = %err, "skipping undecodable entry");
                None
            }
        })
        .collect()
}

fn decode_field<T: DeserializeOwned>(value: &Value, field: &str) -> Option<T> {
    value.get(field).and_then(|raw| T::deserialize(raw).ok())
}
