//! Sequential retrieval of every message matching a search.

use log::{debug, info, warn};

use super::error::{EmailError, Result};
use super::session::{MailSession, MessageId, RawMessage};

pub const DEFAULT_FOLDER: &str = "inbox";

/// Matches everything in the selected folder.
pub const DEFAULT_FILTER: &str = "ALL";

/// Counts from one pass over a folder.
#[derive(Debug, Default)]
pub struct FetchSummary {
    /// Ids returned by the search.
    pub matched: usize,
    /// Messages handed to the visitor.
    pub fetched: usize,
    /// Per-message failures that were skipped.
    pub failures: Vec<EmailError>,
}

/// Fetches the messages of one folder, one at a time.
///
/// Both entry points take ownership of the session and log it out exactly
/// once before returning, whether the pass succeeded or not.
#[derive(Debug, Clone)]
pub struct MessageFetcher {
    folder: String,
    filter: String,
}

impl Default for MessageFetcher {
    fn default() -> Self {
        Self::new(DEFAULT_FOLDER, DEFAULT_FILTER)
    }
}

impl MessageFetcher {
    pub fn new(folder: impl Into<String>, filter: impl Into<String>) -> Self {
        Self {
            folder: folder.into(),
            filter: filter.into(),
        }
    }

    pub fn folder(&self) -> &str {
        &self.folder
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Fetches every matching message into memory.
    pub async fn fetch_all<S: MailSession>(&self, session: S) -> Result<Vec<RawMessage>> {
        let mut messages = Vec::new();
        self.fetch_each(session, |message| messages.push(message))
            .await?;
        Ok(messages)
    }

    /// Fetches matching messages in search order, handing each to `visit`
    /// before the next fetch starts.
    ///
    /// Selection and search failures abort the pass. A message that fails to
    /// fetch is logged, recorded in the summary and skipped.
    pub async fn fetch_each<S, F>(&self, mut session: S, mut visit: F) -> Result<FetchSummary>
    where
        S: MailSession,
        F: FnMut(RawMessage) + Send,
    {
        let result = self.fetch_into(&mut session, &mut visit).await;

        if session.is_open() {
            if let Err(e) = session.logout().await {
                warn!("Logout after fetching from '{}' failed: {}", self.folder, e);
            }
        }

        result
    }

    async fn fetch_into<S, F>(&self, session: &mut S, visit: &mut F) -> Result<FetchSummary>
    where
        S: MailSession,
        F: FnMut(RawMessage) + Send,
    {
        session.select(&self.folder).await?;
        let ids: Vec<MessageId> = session.search(&self.filter).await?;

        let mut summary = FetchSummary {
            matched: ids.len(),
            ..FetchSummary::default()
        };

        if ids.is_empty() {
            info!("No messages in '{}' match '{}'", self.folder, self.filter);
            return Ok(summary);
        }

        info!(
            "Fetching {} messages from '{}' matching '{}'",
            ids.len(),
            self.folder,
            self.filter
        );

        for id in ids {
            match session.fetch(id).await {
                Ok(message) => {
                    debug!("Fetched message {} ({} bytes)", id, message.bytes.len());
                    summary.fetched += 1;
                    visit(message);
                }
                Err(EmailError::SessionClosed) => return Err(EmailError::SessionClosed),
                Err(e) => {
                    warn!("Skipping message {}: {}", id, e);
                    summary.failures.push(e);
                }
            }
        }

        info!(
            "Fetched {} of {} messages ({} skipped)",
            summary.fetched,
            summary.matched,
            summary.failures.len()
        );
        Ok(summary)
    }
}
