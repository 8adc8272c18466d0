//! The session seam between the pipeline and a mail backend.

use std::fmt;

use async_trait::async_trait;
use log::warn;

use crate::credentials::Credentials;
use crate::sanitize::redact_address;

use super::error::Result;

/// Server-assigned identifier of one message (its UID).
///
/// Only meaningful within the session whose search produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MessageId(pub u32);

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Undecoded RFC 5322 content of one fetched message.
#[derive(Debug, Clone)]
pub struct RawMessage {
    pub id: MessageId,
    pub bytes: Vec<u8>,
}

/// A live, authenticated mailbox session.
///
/// Once `logout` has been called every other operation fails with
/// [`EmailError::SessionClosed`](super::EmailError::SessionClosed).
#[async_trait]
pub trait MailSession: Send {
    /// Selects the folder subsequent searches and fetches apply to.
    async fn select(&mut self, folder: &str) -> Result<()>;

    /// Runs a SEARCH with the server-native `filter`, returning ids in
    /// ascending order.
    async fn search(&mut self, filter: &str) -> Result<Vec<MessageId>>;

    /// Retrieves the full raw content of one message.
    async fn fetch(&mut self, id: MessageId) -> Result<RawMessage>;

    /// Closes the session. A second call is a no-op.
    async fn logout(&mut self) -> Result<()>;

    fn is_open(&self) -> bool;
}

/// Opens authenticated sessions.
#[async_trait]
pub trait Connector: Send + Sync {
    type Session: MailSession;

    /// Connects to the provider's endpoint and logs in. The caller owns the
    /// returned session and must log it out.
    async fn connect(&self, credentials: &Credentials) -> Result<Self::Session>;

    /// Opens a session and immediately closes it again.
    async fn verify(&self, credentials: &Credentials) -> Result<()> {
        let mut session = self.connect(credentials).await?;
        if let Err(e) = session.logout().await {
            warn!(
                "Logout after credential check for {} failed: {}",
                redact_address(credentials.address()),
                e
            );
        }
        Ok(())
    }

    /// Pre-flight check: whether a session could be opened at all.
    async fn verify_credentials(&self, credentials: &Credentials) -> bool {
        self.verify(credentials).await.is_ok()
    }
}
