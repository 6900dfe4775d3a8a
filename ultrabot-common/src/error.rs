// ================================================================
// File: ultrabot-common/src/error.rs
// ================================================================

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Not found error: {0}")]
    NotFound(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The account file could not be read or written.
    #[error("Account file error ({path}): {source}")]
    Storage {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Platform error: {0}")]
    Platform(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Parse error: {0}")]
    Parse(String),
}
