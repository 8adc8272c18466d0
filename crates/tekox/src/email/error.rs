//! Mailbox access error types.

use thiserror::Error;

use super::session::MessageId;

/// Errors that can occur while talking to the mail server.
#[derive(Error, Debug)]
pub enum EmailError {
    /// Failed to reach the IMAP server.
    #[error("IMAP connection failed: {0}")]
    ConnectionFailed(String),

    /// TLS/SSL error during connection.
    #[error("TLS error: {0}")]
    TlsError(String),

    /// Login was rejected.
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Folder missing or SELECT rejected.
    #[error("IMAP folder '{folder}' could not be selected: {reason}")]
    FolderNotFound { folder: String, reason: String },

    /// A single message could not be retrieved.
    #[error("Failed to fetch message {id}: {reason}")]
    FetchFailed { id: MessageId, reason: String },

    /// IMAP protocol error.
    #[error("IMAP protocol error: {0}")]
    ProtocolError(String),

    /// Failed to parse a raw message.
    #[error("Failed to parse email: {0}")]
    ParseError(String),

    /// The session was already logged out.
    #[error("IMAP session is closed")]
    SessionClosed,
}

impl From<async_native_tls::Error> for EmailError {
    fn from(err: async_native_tls::Error) -> Self {
        EmailError::TlsError(err.to_string())
    }
}

/// Result type for mailbox operations.
pub type Result<T> = std::result::Result<T, EmailError>;
