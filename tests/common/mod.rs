#![allow(dead_code)]

use std::{
    path::{Path, PathBuf},
    sync::Mutex,
};

use chrono::NaiveDate;
use financas_core::{
    core::{FinanceSession, FixedClock},
    storage::JsonFileStore,
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// A fresh directory that outlives the calling test.
pub fn scratch_dir() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn clock() -> FixedClock {
    FixedClock::new(date(2024, 3, 20))
}

/// Opens a session over a file store rooted at `dir`.
pub fn open_session(dir: &Path) -> FinanceSession<JsonFileStore> {
    let store = JsonFileStore::new(dir.join("data")).expect("create json store");
    FinanceSession::open(store, &clock())
}
