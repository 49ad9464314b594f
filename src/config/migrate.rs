//! Configuration file upgrades: report and fill keys added by newer
//! releases, keeping every value the user already set.

use super::{
    default_card_width, default_expand_delay_ms, default_separator_char, default_zoom,
};
use crate::errors::{AppError, AppResult};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

/// Keys every current config file carries, in file order.
pub const EXPECTED_KEYS: [&str; 5] = [
    "database",
    "default_zoom",
    "expand_delay_ms",
    "separator_char",
    "card_width",
];

fn default_value(key: &str) -> Option<Value> {
    match key {
        "default_zoom" => Some(Value::from(default_zoom())),
        "expand_delay_ms" => Some(Value::from(default_expand_delay_ms())),
        "separator_char" => Some(Value::from(default_separator_char())),
        "card_width" => Some(Value::from(default_card_width() as u64)),
        "database" => Some(Value::from(
            super::Config::database_file().to_string_lossy().to_string(),
        )),
        _ => None,
    }
}

fn read_mapping(path: &Path) -> AppResult<Mapping> {
    let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
    let yaml: Value = serde_yaml::from_str(&content)
        .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;

    match yaml {
        Value::Mapping(m) => Ok(m),
        Value::Null => Ok(Mapping::new()),
        _ => Err(AppError::Config(format!(
            "{}: top level must be a mapping",
            path.display()
        ))),
    }
}

/// Keys absent from the file at `path`.
pub fn missing_keys(path: &Path) -> AppResult<Vec<&'static str>> {
    let map = read_mapping(path)?;
    Ok(EXPECTED_KEYS
        .into_iter()
        .filter(|k| !map.contains_key(*k))
        .collect())
}

/// Write defaults for the missing keys. Returns the keys that were added;
/// the file is left untouched when nothing is missing.
pub fn migrate_config_file(path: &Path) -> AppResult<Vec<&'static str>> {
    let mut map = read_mapping(path)?;
    let mut added = Vec::new();

    for key in EXPECTED_KEYS {
        let k = Value::from(key);
        if map.contains_key(&k) {
            continue;
        }
        if let Some(v) = default_value(key) {
            map.insert(k, v);
            added.push(key);
        }
    }

    if !added.is_empty() {
        let serialized =
            serde_yaml::to_string(&Value::Mapping(map)).map_err(|_| AppError::ConfigSave)?;
        fs::write(path, serialized).map_err(|_| AppError::ConfigSave)?;
    }

    Ok(added)
}
