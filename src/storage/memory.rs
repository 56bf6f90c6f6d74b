use std::{cell::RefCell, collections::HashMap};

use super::KeyValueStore;
use crate::errors::{FinanceError, Result};

/// In-process store for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: RefCell::new(
                entries
                    .into_iter()
                    .map(|(key, value)| (key.into(), value.into()))
                    .collect(),
            ),
            fail_writes: false,
        }
    }

    /// A store whose writes always fail, for exercising error paths.
    pub fn read_only() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.raw(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes {
            return Err(FinanceError::Storage(format!(
                "store is read-only, cannot write `{key}`"
            )));
        }
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
