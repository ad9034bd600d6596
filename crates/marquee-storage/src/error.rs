//! Error types for storage backends.

use marquee_core::CoreError;

/// Errors that can occur while talking to a storage backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Failed to reach the backend at all.
    #[error("Connection error: {message}")]
    Connection {
        /// Description of the connection failure.
        message: String,
    },

    /// The backend did not answer within the configured timeout.
    #[error("Timeout: {message}")]
    Timeout {
        /// Description of what timed out.
        message: String,
    },

    /// The backend rejected or failed a command.
    #[error("Command error: {message}")]
    Command {
        /// Description of the command failure.
        message: String,
    },
}

impl StoreError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    pub fn command(message: impl Into<String>) -> Self {
        Self::Command {
            message: message.into(),
        }
    }
}

/// Every storage failure surfaces to callers as `Unavailable`; callers own
/// any retry policy, this layer never retries.
impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        CoreError::unavailable(err.to_string())
    }
}
