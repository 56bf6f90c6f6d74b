//! User preferences persisted next to the data directory.

pub mod paths;

use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::debug;

use crate::errors::Result;
use crate::utils::fs::replace_file;

pub use paths::{app_home, HOME_ENV};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub currency_symbol: String,
    /// When false, balances render as a mask until toggled.
    pub show_balance: bool,
    pub ui_color_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency_symbol: "R$".into(),
            show_balance: true,
            ui_color_enabled: true,
            data_dir: None,
            backup_dir: None,
        }
    }
}

pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base)?;
        let path = paths::config_file_in(&base);
        Ok(Self { base, path })
    }

    pub fn load(&self) -> Result<Config> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        let json = serde_json::to_string_pretty(config)?;
        replace_file(&self.path, &json)?;
        debug!(path = %self.path.display(), "saved configuration");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory holding the key-value entries, honoring an override in `config`.
    pub fn data_dir(&self, config: &Config) -> PathBuf {
        config
            .data_dir
            .clone()
            .unwrap_or_else(|| paths::data_dir_in(&self.base))
    }

    pub fn backup_dir(&self, config: &Config) -> PathBuf {
        config
            .backup_dir
            .clone()
            .unwrap_or_else(|| paths::backup_dir_in(&self.base))
    }
}
