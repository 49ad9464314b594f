use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub mod migrate;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    /// Timeline slot length in minutes (60, 30, 15 or 10).
    #[serde(default = "default_zoom")]
    pub default_zoom: u32,
    /// Hover time before a collapsed range opens during a drag.
    #[serde(default = "default_expand_delay_ms")]
    pub expand_delay_ms: u64,
    #[serde(default = "default_separator_char")]
    pub separator_char: String,
    #[serde(default = "default_card_width")]
    pub card_width: usize,
}

pub(crate) fn default_zoom() -> u32 {
    60
}
pub(crate) fn default_expand_delay_ms() -> u64 {
    crate::core::timeline::timer::DEFAULT_EXPAND_DELAY_MS
}
pub(crate) fn default_separator_char() -> String {
    "-".to_string()
}
pub(crate) fn default_card_width() -> usize {
    60
}

impl Default for Config {
    fn default() -> Self {
        Self::with_database(Self::database_file())
    }
}

impl Config {
    fn with_database(db_path: PathBuf) -> Self {
        Self {
            database: db_path.to_string_lossy().to_string(),
            default_zoom: default_zoom(),
            expand_delay_ms: default_expand_delay_ms(),
            separator_char: default_separator_char(),
            card_width: default_card_width(),
        }
    }

    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("tripplanner")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".tripplanner")
        }
    }

    pub fn config_file() -> PathBuf {
        Self::config_dir().join("tripplanner.conf")
    }

    pub fn database_file() -> PathBuf {
        Self::config_dir().join("tripplanner.sqlite")
    }

    /// Load the configuration file, or defaults when there is none.
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        let yaml = serde_yaml::to_string(self).map_err(|_| AppError::ConfigSave)?;
        fs::write(path, yaml).map_err(|_| AppError::ConfigSave)
    }

    /// Create the config directory, the config file (outside test mode)
    /// and an empty database file. Returns the database path.
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();

        let db_path = match custom_db {
            Some(name) => {
                let p = Path::new(&name);
                if p.is_absolute() {
                    p.to_path_buf()
                } else {
                    dir.join(p)
                }
            }
            None => Self::database_file(),
        };

        if !is_test {
            fs::create_dir_all(&dir)?;
            Self::with_database(db_path.clone()).save_to(&Self::config_file())?;
            println!("✅ Config file: {}", Self::config_file().display());
        }

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }
        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        Ok(db_path)
    }
}
