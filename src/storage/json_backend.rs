use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use tracing::info;

use crate::{domain::Ledger, errors::LedgerResult};

use super::LedgerStore;

const TMP_SUFFIX: &str = "tmp";

/// Single JSON document on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LedgerStore for JsonFileStore {
    fn load(&self) -> LedgerResult<Option<Ledger>> {
        if !self.path.exists() {
            info!(path = %self.path.display(), "no ledger file yet");
            return Ok(None);
        }
        load_ledger_from_path(&self.path).map(Some)
    }

    fn save(&self, ledger: &Ledger) -> LedgerResult<()> {
        save_ledger_to_path(ledger, &self.path)
    }
}

/// Saves a ledger to an arbitrary path by staging to a temporary sibling file.
pub fn save_ledger_to_path(ledger: &Ledger, path: &Path) -> LedgerResult<()> {
    write_file_atomic(path, &serde_json::to_string_pretty(ledger)?)?;
    info!(
        path = %path.display(),
        transactions = ledger.transactions.len(),
        "saved ledger"
    );
    Ok(())
}

/// Loads a ledger from the provided filesystem path.
pub fn load_ledger_from_path(path: &Path) -> LedgerResult<Ledger> {
    let data = fs::read_to_string(path)?;
    let ledger: Ledger = serde_json::from_str(&data)?;
    info!(
        path = %path.display(),
        transactions = ledger.transactions.len(),
        "loaded ledger"
    );
    Ok(ledger)
}

/// Staging sibling written before a file is replaced, e.g. `ledger.json.tmp`.
pub fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

/// Writes `data` to the staging sibling, then renames it over `path`.
///
/// Parent directories are created. A failure before the rename leaves `path` untouched.
pub(crate) fn write_file_atomic(path: &Path, data: &str) -> LedgerResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp = tmp_path(path);
    let mut file = File::create(&tmp)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    fs::rename(&tmp, path)?;
    Ok(())
}
