//! Session state

/// Where the session currently stands.
///
/// Exactly one state holds at a time. Only [`crate::Session`] moves
/// between them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Idle,
    Loading,
    /// Holds the oracle payload re-serialized with indentation.
    Succeeded(String),
    /// Holds a user-facing message, never the underlying error.
    Failed(String),
}

impl SessionState {
    pub fn is_loading(&self) -> bool {
        matches!(self, SessionState::Loading)
    }

    /// The displayed payload, if the last submission succeeded.
    pub fn payload(&self) -> Option<&str> {
        match self {
            SessionState::Succeeded(payload) => Some(payload),
            _ => None,
        }
    }

    /// The user-facing error message, if the last submission failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            SessionState::Failed(message) => Some(message),
            _ => None,
        }
    }
}
