//! PIN gate in front of every view.
//!
//! This is a visibility lock for a shared screen, not a security boundary: the
//! PIN is stored in plain text next to the data it hides, comparisons are plain
//! string equality, and there is no lockout or attempt counting.

use tracing::{debug, warn};

use crate::errors::{FinanceError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Locked,
    Unlocked,
}

/// Result of a successful unlock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnlockOutcome {
    /// First use: the submitted value became the PIN and must be persisted.
    Created(String),
    /// The submitted value matched the stored PIN.
    Verified,
}

#[derive(Debug, Clone)]
pub struct AccessGate {
    state: GateState,
    pin: Option<String>,
}

impl AccessGate {
    /// Starts locked, with whatever PIN was loaded from storage.
    pub fn new(pin: Option<String>) -> Self {
        Self {
            state: GateState::Locked,
            pin: pin.filter(|value| !value.is_empty()),
        }
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn is_unlocked(&self) -> bool {
        self.state == GateState::Unlocked
    }

    pub fn has_pin(&self) -> bool {
        self.pin.is_some()
    }

    pub fn submit(&mut self, input: &str) -> Result<UnlockOutcome> {
        match &self.pin {
            None => {
                if input.is_empty() {
                    return Err(FinanceError::Validation("PIN must not be empty".into()));
                }
                self.pin = Some(input.to_string());
                self.state = GateState::Unlocked;
                debug!("pin created on first use");
                Ok(UnlockOutcome::Created(input.to_string()))
            }
            Some(stored) if stored == input => {
                self.state = GateState::Unlocked;
                Ok(UnlockOutcome::Verified)
            }
            Some(_) => {
                warn!("pin verification failed");
                Err(FinanceError::Authentication)
            }
        }
    }

    pub fn lock(&mut self) {
        self.state = GateState::Locked;
    }

    /// Fails with [`FinanceError::Locked`] unless the gate is open.
    pub fn ensure_unlocked(&self) -> Result<()> {
        if self.is_unlocked() {
            Ok(())
        } else {
            Err(FinanceError::Locked)
        }
    }
}
