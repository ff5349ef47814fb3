//! Error types for the pension lookup client.

use thiserror::Error;

/// Reasons a pension lookup produced no identifier.
#[derive(Error, Debug)]
pub enum LookupError {
    /// The lookup did not complete within its time bound
    #[error("pension lookup timed out")]
    Timeout,

    /// The service answered with a non-success status
    #[error("pension service returned status {status}")]
    Status {
        /// HTTP status code
        status: u16,
    },

    /// Connection, DNS or body transfer failure
    #[error("pension service unreachable: {0}")]
    Transport(reqwest::Error),

    /// The name is a dot segment and cannot be sent as a path segment
    #[error("name {0:?} cannot be sent as a path segment")]
    UnaddressableName(String),

    /// The HTTP client could not be built
    #[error("failed to create HTTP client: {0}")]
    Client(String),
}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Transport(err)
        }
    }
}

/// Result type alias for lookup operations.
pub type Result<T> = std::result::Result<T, LookupError>;
