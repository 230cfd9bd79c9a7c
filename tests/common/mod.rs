#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Mutex;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use kakeibo_core::{
    core::{FixedClock, LedgerManager},
    domain::{Ledger, TransactionDraft, TransactionKind},
    storage::JsonFileStore,
    TransactionService,
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates a unique directory that outlives the calling test.
pub fn temp_dir() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 24, 9, 30, 0).unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Manager backed by a JSON file in a fresh directory, pinned to 2025-06-24.
pub fn setup_test_env() -> (LedgerManager, PathBuf) {
    let path = temp_dir().join("ledger.json");
    let manager = LedgerManager::open_with_clock(
        Box::new(JsonFileStore::new(&path)),
        Box::new(FixedClock(fixed_now())),
    )
    .expect("open ledger manager");
    (manager, path)
}

/// Seeded ledger with a handful of June and July entries, newest first.
pub fn sample_ledger() -> Ledger {
    let drafts = [
        TransactionDraft::new(date(2025, 6, 1), TransactionKind::Income, 1000.0, "income-salary")
            .with_description("June pay"),
        TransactionDraft::new(date(2025, 6, 15), TransactionKind::Expense, 400.0, "expense-food")
            .with_description("Groceries"),
        TransactionDraft::new(date(2025, 7, 1), TransactionKind::Income, 500.0, "income-bonus"),
    ];
    drafts
        .into_iter()
        .fold(Ledger::with_default_categories(fixed_now()), |ledger, draft| {
            TransactionService::add_at(&ledger, draft, fixed_now())
        })
}
