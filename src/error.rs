//! Solsieve error types

/// Solsieve error types
#[derive(Debug, thiserror::Error)]
pub enum SolsieveError {
    // Submission errors
    #[error("validation error: {0}")]
    Validation(String),

    #[error("a classification request is already in flight")]
    SubmissionInFlight,

    // Oracle errors
    /// Any failure to obtain a response from the oracle.
    ///
    /// The message is detail for the logs. Transport, credential and
    /// oracle-side faults all collapse into this one variant.
    #[error("failed to communicate with the classification oracle: {0}")]
    Communication(String),

    #[error("malformed oracle response: {0}")]
    MalformedResponse(String),

    // Data errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Configuration errors
    #[error("configuration error: {0}")]
    Configuration(String),

    // Presentation errors
    #[error("clipboard error: {0}")]
    Clipboard(String),
}

impl SolsieveError {
    /// Whether this error must abort startup.
    ///
    /// Only configuration problems (a missing API key above all) are fatal;
    /// everything else is absorbed into the session state.
    pub fn is_fatal(&self) -> bool {
        matches!(self, SolsieveError::Configuration(_))
    }
}

/// Result type alias for Solsieve operations
pub type Result<T> = std::result::Result<T, SolsieveError>;
