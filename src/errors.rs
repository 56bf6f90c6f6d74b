use thiserror::Error;

/// Error type shared by the record store, access gate and persistence layers.
#[derive(Debug, Error)]
pub enum FinanceError {
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Incorrect PIN")]
    Authentication,
    #[error("Session is locked")]
    Locked,
    #[error("Persistence error: {0}")]
    Storage(String),
    #[error("Restore failed: {0}")]
    Restore(String),
}

pub type Result<T> = std::result::Result<T, FinanceError>;

impl From<std::io::Error> for FinanceError {
    fn from(err: std::io::Error) -> Self {
        FinanceError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for FinanceError {
    fn from(err: serde_json::Error) -> Self {
        FinanceError::Storage(err.to_string())
    }
}
