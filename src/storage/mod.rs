pub mod json_backend;
pub mod memory;
pub mod persistence;

use crate::errors::Result;

pub const PIN_KEY: &str = "pin";
pub const TRANSACTIONS_KEY: &str = "transactions";
pub const GOALS_KEY: &str = "goals";
pub const INVESTMENTS_KEY: &str = "investments";

/// Opaque string store keyed by a handful of fixed names.
pub trait KeyValueStore {
    /// Returns `Ok(None)` when nothing has been stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

pub use json_backend::JsonFileStore;
pub use memory::MemoryStore;
pub use persistence::{BackupDocument, LoadedState, PersistenceAdapter, BACKUP_VERSION};
