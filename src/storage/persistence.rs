//! Moves snapshots in and out of a [`KeyValueStore`], plus the versioned backup
//! document used for manual export and restore.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::{KeyValueStore, GOALS_KEY, INVESTMENTS_KEY, PIN_KEY, TRANSACTIONS_KEY};
use crate::core::services::RecordStore;
use crate::errors::{FinanceError, Result};
use crate::ledger::{compat, Goal, InvestmentLedger, Snapshot, Transaction};

pub const BACKUP_VERSION: &str = "1.0";
const SUPPORTED_MAJOR: u32 = 1;

/// On-disk shape of a manual backup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupDocument {
    #[serde(default, deserialize_with = "compat::null_as_default")]
    pub transactions: Vec<Transaction>,
    #[serde(default, deserialize_with = "compat::null_as_default")]
    pub goals: Vec<Goal>,
    #[serde(default, deserialize_with = "compat::null_as_default")]
    pub investments: InvestmentLedger,
    #[serde(default = "BackupDocument::default_version")]
    pub version: String,
}

impl BackupDocument {
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        Self {
            transactions: snapshot.transactions.clone(),
            goals: snapshot.goals.clone(),
            investments: snapshot.investments,
            version: BACKUP_VERSION.to_string(),
        }
    }

    pub fn into_snapshot(self) -> Snapshot {
        Snapshot::new(self.transactions, self.goals, self.investments)
    }

    pub fn default_version() -> String {
        BACKUP_VERSION.to_string()
    }

    fn ensure_supported(&self) -> Result<()> {
        let major = self
            .version
            .trim()
            .split('.')
            .next()
            .and_then(|part| part.parse::<u32>().ok())
            .ok_or_else(|| {
                FinanceError::Restore(format!("unrecognised backup version `{}`", self.version))
            })?;
        if major > SUPPORTED_MAJOR {
            return Err(FinanceError::Restore(format!(
                "backup version {} is newer than supported version {}",
                self.version, BACKUP_VERSION
            )));
        }
        Ok(())
    }
}

/// State recovered at startup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedState {
    pub pin: Option<String>,
    pub snapshot: Snapshot,
}

/// Reads and writes the four fixed keys. Write failures are logged and
/// swallowed; the in-memory snapshot stays authoritative.
pub struct PersistenceAdapter<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> PersistenceAdapter<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Never fails: absent or malformed keys fall back to their defaults.
    pub fn load(&self) -> LoadedState {
        let pin = match self.store.get(PIN_KEY) {
            Ok(value) => value.filter(|pin| !pin.is_empty()),
            Err(err) => {
                warn!(key = PIN_KEY, error = %err, "failed to read key; treating as absent");
                None
            }
        };
        let transactions: Vec<Transaction> = self.read_json(TRANSACTIONS_KEY).unwrap_or_default();
        let goals: Vec<Goal> = self.read_json(GOALS_KEY).unwrap_or_default();
        let investments: InvestmentLedger = self.read_json(INVESTMENTS_KEY).unwrap_or_default();

        info!(
            transactions = transactions.len(),
            goals = goals.len(),
            has_pin = pin.is_some(),
            "loaded stored state"
        );

        LoadedState {
            pin,
            snapshot: Snapshot::new(transactions, goals, investments.sanitized()),
        }
    }

    /// Writes transactions, goals and investments as independent entries.
    pub fn save(&self, snapshot: &Snapshot) {
        self.write_json(TRANSACTIONS_KEY, &snapshot.transactions);
        self.write_json(GOALS_KEY, &snapshot.goals);
        self.write_json(INVESTMENTS_KEY, &snapshot.investments);
    }

    pub fn save_pin(&self, pin: &str) {
        if let Err(err) = self.store.set(PIN_KEY, pin) {
            warn!(key = PIN_KEY, error = %err, "failed to persist pin");
        }
    }

    pub fn export_snapshot(&self, snapshot: &Snapshot) -> Result<String> {
        export_snapshot(snapshot)
    }

    pub fn import_snapshot(&self, bytes: &[u8]) -> Result<Snapshot> {
        import_snapshot(bytes)
    }

    fn read_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                warn!(key, error = %err, "failed to read key; treating as absent");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(key, error = %err, "stored value is malformed; treating as absent");
                None
            }
        }
    }

    fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(err) => {
                warn!(key, error = %err, "failed to serialize value");
                return;
            }
        };
        match self.store.set(key, &json) {
            Ok(()) => debug!(key, bytes = json.len(), "persisted key"),
            Err(err) => warn!(key, error = %err, "failed to persist key"),
        }
    }
}

/// Serializes the snapshot as a pretty-printed backup document.
pub fn export_snapshot(snapshot: &Snapshot) -> Result<String> {
    Ok(serde_json::to_string_pretty(&BackupDocument::from_snapshot(
        snapshot,
    ))?)
}

/// Decodes a backup document. Either the whole document is accepted or nothing is.
pub fn import_snapshot(bytes: &[u8]) -> Result<Snapshot> {
    let text = std::str::from_utf8(bytes)
        .map_err(|err| FinanceError::Restore(format!("backup is not valid UTF-8: {err}")))?;
    let document: BackupDocument = serde_json::from_str(text)
        .map_err(|err| FinanceError::Restore(format!("backup is not a valid document: {err}")))?;
    document.ensure_supported()?;
    Ok(RecordStore::replace_all(document.into_snapshot()))
}
