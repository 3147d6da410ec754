use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoanCalcError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("A maximum of {capacity} comparison scenarios are allowed.")]
    CapacityExceeded { capacity: usize },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for LoanCalcError {
    fn from(e: serde_json::Error) -> Self {
        LoanCalcError::SerializationError(e.to_string())
    }
}

impl From<std::io::Error> for LoanCalcError {
    fn from(e: std::io::Error) -> Self {
        LoanCalcError::Storage(e.to_string())
    }
}

impl LoanCalcError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        LoanCalcError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
