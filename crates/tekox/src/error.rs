use std::path::PathBuf;
use thiserror::Error;

use crate::email::EmailError;

/// Failures a harvest can run into, fatal or absorbed.
#[derive(Error, Debug)]
pub enum HarvestError {
    #[error("Missing input: {0}")]
    MissingInput(&'static str),

    #[error("Unsupported email server: '{0}'")]
    UnsupportedProvider(String),

    /// Covers bad credentials and an unreachable server alike.
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Mailbox folder '{folder}' could not be selected: {reason}")]
    Folder { folder: String, reason: String },

    /// The server rejected a command after login (search, fetch stream).
    #[error("Mail server error: {0}")]
    Protocol(String),

    #[error("Failed to fetch message {id}: {reason}")]
    Fetch { id: String, reason: String },

    #[error("Failed to decode message {id}: {reason}")]
    Decode { id: String, reason: String },

    #[error("Failed to write report '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl HarvestError {
    /// True for failures that end the whole invocation.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, HarvestError::Fetch { .. } | HarvestError::Decode { .. })
    }
}

impl From<EmailError> for HarvestError {
    fn from(err: EmailError) -> Self {
        match err {
            EmailError::FolderNotFound { folder, reason } => HarvestError::Folder { folder, reason },
            EmailError::FetchFailed { id, reason } => HarvestError::Fetch {
                id: id.to_string(),
                reason,
            },
            EmailError::ProtocolError(reason) => HarvestError::Protocol(reason),
            EmailError::SessionClosed => {
                HarvestError::Protocol(EmailError::SessionClosed.to_string())
            }
            // Connection, TLS and login failures are reported as one class.
            other => HarvestError::Auth(other.to_string()),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config JSON: {0}")]
    ParseJson(#[from] serde_json::Error),

    #[error("Config validation failed: {message}")]
    Validation { message: String },
}

pub type Result<T> = std::result::Result<T, HarvestError>;
