mod common;

use std::fs;
use common::{date, fixed_now, sample_ledger, setup_test_env, temp_dir};
use kakeibo_core::{
    core::{FixedClock, LedgerManager},
    domain::{Ledger, TransactionDraft, TransactionKind, TransactionPatch},
    storage::{
        load_ledger_from_path, save_ledger_to_path, tmp_path, JsonFileStore, LedgerStore,
        MemoryStore,
    },
    ExportService, LedgerError, TransactionService,
};

#[test]
fn first_open_seeds_and_saves_default_categories() {
    let (manager, path) = setup_test_env();

    assert!(path.exists());
    assert_eq!(manager.current().categories.len(), 6);
    assert!(manager.current().transactions.is_empty());
    assert_eq!(manager.current().last_updated, fixed_now());

    let stored = load_ledger_from_path(&path).expect("load seeded file");
    assert_eq!(&stored, manager.current());
}

#[test]
fn applied_mutations_survive_reopen() {
    let (mut manager, path) = setup_test_env();
    let draft = TransactionDraft::new(date(2025, 6, 24), TransactionKind::Expense, 1500.0, "expense-food")
        .with_description("Lunch");
    let expected = manager
        .apply(|ledger| TransactionService::add_at(ledger, draft, fixed_now()))
        .expect("apply")
        .clone();

    let reopened = LedgerManager::open_with_clock(
        Box::new(JsonFileStore::new(&path)),
        Box::new(FixedClock(fixed_now())),
    )
    .expect("reopen");
    assert_eq!(reopened.current(), &expected);
    assert_eq!(reopened.current().transactions[0].description, "Lunch");
}

#[test]
fn atomic_save_failure_preserves_original_file() {
    let (mut manager, path) = setup_test_env();
    let original = fs::read_to_string(&path).expect("read original file");
    let before = manager.current().clone();

    // A directory squatting on the staging name makes File::create fail.
    fs::create_dir_all(tmp_path(&path)).unwrap();

    let result = manager.apply(|ledger| {
        TransactionService::add_at(
            ledger,
            TransactionDraft::new(date(2025, 6, 24), TransactionKind::Income, 10.0, "income-salary"),
            fixed_now(),
        )
    });
    assert!(matches!(result, Err(LedgerError::Io(_))));
    assert_eq!(fs::read_to_string(&path).expect("reread"), original);
    assert_eq!(manager.current(), &before);
}

#[test]
fn non_finite_update_keeps_the_stored_file_loadable() {
    let (mut manager, path) = setup_test_env();
    manager
        .apply(|ledger| {
            TransactionService::add_at(
                ledger,
                TransactionDraft::new(date(2025, 6, 24), TransactionKind::Expense, 1500.0, "expense-food"),
                fixed_now(),
            )
        })
        .expect("add");
    let id = manager.current().transactions[0].id.clone();
    manager
        .apply(|ledger| {
            let patch = TransactionPatch::amount(f64::INFINITY);
            TransactionService::update_at(ledger, &id, &patch, fixed_now())
        })
        .expect("update");

    let reopened = LedgerManager::open_with_clock(
        Box::new(JsonFileStore::new(&path)),
        Box::new(FixedClock(fixed_now())),
    )
    .expect("stored ledger still decodes");
    assert_eq!(reopened.current().transactions[0].amount, 1500.0);

    let json = ExportService::export_json(reopened.current()).expect("export");
    assert!(!json.contains("null"));
    assert_eq!(&ExportService::import(&json).expect("reimport"), reopened.current());
}

#[test]
fn corrupt_file_is_reported_instead_of_reseeded() {
    let path = temp_dir().join("ledger.json");
    fs::write(&path, "{ not json").unwrap();

    let result = LedgerManager::open(Box::new(JsonFileStore::new(&path)));
    assert!(matches!(result, Err(LedgerError::Serde(_))));
    assert_eq!(fs::read_to_string(&path).unwrap(), "{ not json");
}

#[test]
fn legacy_document_without_settings_loads_with_defaults() {
    let path = temp_dir().join("legacy.json");
    fs::write(
        &path,
        r#"{
            "transactions": [{
                "id": "abc",
                "date": "2025-06-01",
                "type": "income",
                "amount": 1000,
                "category": "income-salary",
                "createdAt": "2025-06-01T00:00:00Z",
                "updatedAt": "2025-06-01T00:00:00Z"
            }],
            "categories": []
        }"#,
    )
    .unwrap();

    let ledger = load_ledger_from_path(&path).expect("load legacy file");
    assert_eq!(ledger.version, "1.0.0");
    assert_eq!(ledger.settings.currency, "¥");
    assert_eq!(ledger.transactions[0].description, "");
    assert_eq!(ledger.transactions[0].amount, 1000.0);
}

#[test]
fn direct_path_helpers_roundtrip() {
    let path = temp_dir().join("nested").join("books.json");
    let ledger = sample_ledger();
    save_ledger_to_path(&ledger, &path).expect("save");
    assert_eq!(load_ledger_from_path(&path).expect("load"), ledger);
    assert!(!tmp_path(&path).exists());
}

#[test]
fn memory_store_counts_saves() {
    let store = MemoryStore::new();
    assert!(store.load().expect("load").is_none());

    let mut manager = LedgerManager::open(Box::new(MemoryStore::with_ledger(Ledger::new(fixed_now()))))
        .expect("open with stored ledger");
    assert!(manager.current().categories.is_empty());
    manager.replace(sample_ledger()).expect("replace");
    assert_eq!(manager.current().transactions.len(), 3);

    store.save(&sample_ledger()).expect("save");
    assert_eq!(store.save_count(), 1);
}
