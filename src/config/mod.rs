use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::debug;

use crate::core::services::CsvLocale;
use crate::core::utils::{config_file, ledger_file};
use crate::domain::ledger::{DEFAULT_CURRENCY_SYMBOL, DEFAULT_DATE_FORMAT};
use crate::errors::{LedgerError, LedgerResult};
use crate::storage::json_backend::write_file_atomic;

/// User preferences for the command-line front end.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default = "Config::default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default = "Config::default_date_format")]
    pub date_format: String,
    #[serde(default)]
    pub csv_locale: CsvLocale,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Optional custom ledger location. Defaults to `<app data dir>/ledger.json`.
    pub data_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency_symbol: Self::default_currency_symbol(),
            date_format: Self::default_date_format(),
            csv_locale: CsvLocale::default(),
            data_file: None,
        }
    }
}

impl Config {
    pub fn default_currency_symbol() -> String {
        DEFAULT_CURRENCY_SYMBOL.into()
    }

    pub fn default_date_format() -> String {
        DEFAULT_DATE_FORMAT.into()
    }

    pub fn resolve_data_file(&self) -> PathBuf {
        self.data_file.clone().unwrap_or_else(ledger_file)
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Manager for the default configuration file under the app data directory.
    pub fn from_default_location() -> Self {
        Self::new(config_file())
    }

    pub fn load(&self) -> LedgerResult<Config> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            serde_json::from_str(&data).map_err(|err| LedgerError::Config(err.to_string()))
        } else {
            debug!(path = %self.path.display(), "config file missing; using defaults");
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> LedgerResult<()> {
        write_file_atomic(&self.path, &serde_json::to_string_pretty(config)?)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
