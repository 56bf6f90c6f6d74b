use dirs::home_dir;
use std::{env, path::PathBuf};

pub const HOME_ENV: &str = "FINANCAS_HOME";

const DEFAULT_DIR_NAME: &str = ".financas";
const DATA_DIR: &str = "data";
const BACKUP_DIR: &str = "backups";
const CONFIG_DIR: &str = "config";
const CONFIG_FILE: &str = "config.json";

/// Application home: `$FINANCAS_HOME`, falling back to `~/.financas`.
pub fn app_home() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

pub fn data_dir_in(base: &std::path::Path) -> PathBuf {
    base.join(DATA_DIR)
}

pub fn backup_dir_in(base: &std::path::Path) -> PathBuf {
    base.join(BACKUP_DIR)
}

pub fn config_file_in(base: &std::path::Path) -> PathBuf {
    base.join(CONFIG_DIR).join(CONFIG_FILE)
}
