//! IMAP backend for connecting to the supported providers.

use async_imap::Session;
use async_native_tls::TlsConnector;
use async_trait::async_trait;
use futures_util::StreamExt;
use log::{debug, info, warn};
use secrecy::ExposeSecret;

use crate::credentials::Credentials;
use crate::sanitize::redact_address;

use super::error::{EmailError, Result};
use super::session::{Connector, MailSession, MessageId, RawMessage};

/// Type alias for the underlying async stream (using async-std compatible TcpStream).
type AsyncTcpStream = async_io::Async<std::net::TcpStream>;

/// Type alias for the TLS stream used by the IMAP session.
type TlsStream = async_native_tls::TlsStream<AsyncTcpStream>;

/// Fetch item for the full message without setting `\Seen`.
const FETCH_ITEMS: &str = "BODY.PEEK[]";

/// Opens TLS-wrapped IMAP sessions to the provider named in the credentials.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImapConnector;

impl ImapConnector {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Connector for ImapConnector {
    type Session = ImapSession;

    async fn connect(&self, credentials: &Credentials) -> Result<ImapSession> {
        let provider = credentials.provider();
        let host = provider.host();
        let addr = format!("{}:{}", host, provider.port());
        info!("Connecting to {} IMAP server at {}", provider, addr);

        // Establish TCP connection using std::net and wrap with async-io
        let std_stream = std::net::TcpStream::connect(&addr)
            .map_err(|e| EmailError::ConnectionFailed(e.to_string()))?;
        std_stream
            .set_nonblocking(true)
            .map_err(|e| EmailError::ConnectionFailed(e.to_string()))?;
        let tcp_stream = async_io::Async::new(std_stream)
            .map_err(|e| EmailError::ConnectionFailed(e.to_string()))?;

        let tls_stream = TlsConnector::new().connect(host, tcp_stream).await?;

        let client = async_imap::Client::new(tls_stream);
        let session = client
            .login(credentials.address(), credentials.secret().expose_secret())
            .await
            .map_err(|(e, _)| EmailError::AuthenticationFailed(e.to_string()))?;

        info!(
            "Authenticated to {} as {}",
            provider,
            redact_address(credentials.address())
        );
        Ok(ImapSession::new(session))
    }
}

/// An authenticated IMAP session.
pub struct ImapSession {
    session: Option<Session<TlsStream>>,
}

impl ImapSession {
    fn new(session: Session<TlsStream>) -> Self {
        Self {
            session: Some(session),
        }
    }

    fn live(&mut self) -> Result<&mut Session<TlsStream>> {
        self.session.as_mut().ok_or(EmailError::SessionClosed)
    }
}

#[async_trait]
impl MailSession for ImapSession {
    async fn select(&mut self, folder: &str) -> Result<()> {
        let session = self.live()?;
        info!("Selecting folder: {}", folder);

        let mailbox = session
            .select(folder)
            .await
            .map_err(|e| EmailError::FolderNotFound {
                folder: folder.to_string(),
                reason: e.to_string(),
            })?;

        debug!("Folder '{}' holds {} messages", folder, mailbox.exists);
        Ok(())
    }

    async fn search(&mut self, filter: &str) -> Result<Vec<MessageId>> {
        let session = self.live()?;
        debug!("Searching with query: {}", filter);

        let uids = session
            .uid_search(filter)
            .await
            .map_err(|e| EmailError::ProtocolError(e.to_string()))?;

        // The server answers with a set; ascending UID is arrival order.
        let mut ids: Vec<MessageId> = uids.into_iter().map(MessageId).collect();
        ids.sort_unstable();
        debug!("Found {} messages matching search", ids.len());
        Ok(ids)
    }

    async fn fetch(&mut self, id: MessageId) -> Result<RawMessage> {
        let session = self.live()?;
        debug!("Fetching email with UID {}", id);

        // Drain the whole response so the next command starts on a clean stream.
        let responses: Vec<_> = session
            .uid_fetch(id.to_string(), FETCH_ITEMS)
            .await
            .map_err(|e| EmailError::FetchFailed {
                id,
                reason: e.to_string(),
            })?
            .collect()
            .await;

        let mut bytes = None;
        for response in responses {
            match response {
                Ok(fetch) => {
                    if bytes.is_none() {
                        bytes = fetch.body().map(|body| body.to_vec());
                    }
                }
                Err(e) => {
                    return Err(EmailError::FetchFailed {
                        id,
                        reason: e.to_string(),
                    })
                }
            }
        }

        let bytes = bytes.ok_or_else(|| EmailError::FetchFailed {
            id,
            reason: "server returned no message body".to_string(),
        })?;
        Ok(RawMessage { id, bytes })
    }

    async fn logout(&mut self) -> Result<()> {
        if let Some(mut session) = self.session.take() {
            info!("Disconnecting from IMAP server");
            session
                .logout()
                .await
                .map_err(|e| EmailError::ProtocolError(e.to_string()))?;
        }
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.session.is_some()
    }
}

impl Drop for ImapSession {
    fn drop(&mut self) {
        if self.session.is_some() {
            warn!("ImapSession dropped without explicit logout - connection will be closed");
        }
    }
}
