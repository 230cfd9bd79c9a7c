use chrono::{DateTime, Utc};
use dirs::{data_dir, home_dir};
use std::{env, path::PathBuf};
use uuid::Uuid;

const HOME_ENV: &str = "KAKEIBO_HOME";
const DEFAULT_DIR_NAME: &str = "kakeibo";
const LEDGER_FILE: &str = "ledger.json";
const CONFIG_FILE: &str = "config.json";
const ID_SUFFIX_LEN: usize = 11;

/// Returns the application data directory, honouring `KAKEIBO_HOME` when set.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    data_dir()
        .or_else(home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Default location of the persisted ledger.
pub fn ledger_file() -> PathBuf {
    app_data_dir().join(LEDGER_FILE)
}

/// Default location of the configuration file.
pub fn config_file() -> PathBuf {
    app_data_dir().join(CONFIG_FILE)
}

/// Generates an opaque id: base-36 millisecond timestamp followed by a random base-36 suffix.
///
/// Uniqueness is probabilistic; no shared counter is involved.
pub fn generate_id() -> String {
    generate_id_at(Utc::now())
}

pub fn generate_id_at(now: DateTime<Utc>) -> String {
    let millis = now.timestamp_millis().max(0) as u128;
    let mut suffix = to_base36(Uuid::new_v4().as_u128());
    suffix.truncate(ID_SUFFIX_LEN);
    format!("{}{}", to_base36(millis), suffix)
}

fn to_base36(mut value: u128) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".into();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}
