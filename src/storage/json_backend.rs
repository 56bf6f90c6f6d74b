use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use chrono::NaiveDate;
use tracing::debug;

use super::KeyValueStore;
use crate::errors::{FinanceError, Result};
use crate::utils::fs::replace_file;

const VALUE_EXTENSION: &str = "json";
const BACKUP_PREFIX: &str = "financas-backup";

/// Directory-backed store: each key lives in `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: PathBuf) -> Result<Self> {
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn value_path(&self, key: &str) -> PathBuf {
        self.root
            .join(format!("{}.{}", canonical_key(key), VALUE_EXTENSION))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.value_path(key)) {
            Ok(data) => Ok(Some(data)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.value_path(key);
        replace_file(&path, value)?;
        debug!(key, path = %path.display(), "stored value");
        Ok(())
    }
}

/// Default file name for a manual backup taken on `date`.
pub fn backup_file_name(date: NaiveDate) -> String {
    format!("{}-{}.{}", BACKUP_PREFIX, date.format("%Y-%m-%d"), VALUE_EXTENSION)
}

/// Writes a backup document to `path`, staging through a temporary file.
pub fn write_backup_file(path: &Path, document: &str) -> Result<()> {
    Ok(replace_file(path, document)?)
}

pub fn read_backup_file(path: &Path) -> Result<Vec<u8>> {
    if !path.exists() {
        return Err(FinanceError::Storage(format!(
            "backup `{}` not found",
            path.display()
        )));
    }
    Ok(fs::read(path)?)
}

fn canonical_key(key: &str) -> String {
    key.chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '_' || ch == '-' {
                ch.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}
