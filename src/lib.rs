#![doc(test(attr(deny(warnings))))]

//! Kakeibo Core keeps a personal ledger of income and expense records and derives
//! monthly trends, category breakdowns and dashboard snapshots from it.
//!
//! Every mutation returns a fresh [`domain::Ledger`]; persistence goes through the
//! [`storage::LedgerStore`] port.

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod storage;
pub mod utils;

pub use crate::core::services::{
    CategoryService, ExportFormat, ExportService, QueryService, SummaryService, TransactionService,
};
pub use crate::domain::{Category, Ledger, Transaction, TransactionKind};
pub use crate::errors::{LedgerError, LedgerResult};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Kakeibo Core tracing initialized.");
    });
}
