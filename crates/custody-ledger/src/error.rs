use custody_crypto::ChainError;
use custody_types::TypeError;

/// Errors produced by ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("no entry found for unit `{name}`")]
    NotFound { name: String },

    #[error("invalid input: {0}")]
    InvalidInput(#[from] TypeError),

    #[error("refusing tampered entries: {0}")]
    Tampered(#[from] ChainError),
}

impl LedgerError {
    /// Returns `true` for the recoverable lookup miss.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
