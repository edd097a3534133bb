use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Closed set of failures the repository can report.
///
/// Transport and HTTP failures are translated into these variants at the
/// remote data source boundary; nothing above it sees a `reqwest::Error`.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum UserError {
    /// No response from the server (connect failure, timeout, broken body)
    #[error("connectivity error: {0}")]
    Connectivity(String),
    /// The server responded, but with a failure status or an unreadable body
    #[error("server error: {0}")]
    Server(String),
    /// Point lookup miss in the local cache
    #[error("user not found: {0}")]
    NotFound(String),
    /// The local cache could not be read or written
    #[error("storage error: {0}")]
    Storage(String),
}

impl UserError {
    /// Message shown to the user for this error
    pub fn user_message(&self) -> String {
        match self {
            UserError::Connectivity(_) => {
                "Network connection error. Please check your connection.".to_string()
            }
            UserError::Server(_) => "Server error. Please try again later.".to_string(),
            UserError::NotFound(_) => "User not found".to_string(),
            UserError::Storage(_) => "Failed to load users. Please try again.".to_string(),
        }
    }
}

impl From<rusqlite::Error> for UserError {
    fn from(err: rusqlite::Error) -> Self {
        UserError::Storage(err.to_string())
    }
}
