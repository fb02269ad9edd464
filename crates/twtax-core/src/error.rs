use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaxError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Filing method missing or unrecognized: {0}")]
    UnspecifiedFilingMethod(String),

    #[error("Invalid calculator configuration: {reason}")]
    InvalidConfiguration { reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for TaxError {
    fn from(e: serde_json::Error) -> Self {
        TaxError::SerializationError(e.to_string())
    }
}
