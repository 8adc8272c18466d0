//! In-memory mail backend.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use secrecy::ExposeSecret;

use tekox::email::error::Result;
use tekox::email::{Connector, EmailError, MailSession, MessageId, RawMessage};
use tekox::{Credentials, ProgressEvent, ProgressReporter};

/// Counts session lifecycle events across every session a connector opens.
#[derive(Debug, Default)]
pub struct SessionLedger {
    pub connect_attempts: AtomicUsize,
    pub opened: AtomicUsize,
    pub closed: AtomicUsize,
    /// Operations attempted on an already closed session.
    pub used_after_close: AtomicUsize,
    pub fetched: Mutex<Vec<u32>>,
}

impl SessionLedger {
    pub fn connect_attempts(&self) -> usize {
        self.connect_attempts.load(Ordering::SeqCst)
    }

    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }

    pub fn open_sessions(&self) -> usize {
        self.opened() - self.closed()
    }

    pub fn used_after_close(&self) -> usize {
        self.used_after_close.load(Ordering::SeqCst)
    }

    pub fn fetched(&self) -> Vec<u32> {
        self.fetched.lock().unwrap().clone()
    }
}

/// Contents of the fake server.
#[derive(Debug, Clone)]
pub struct Mailbox {
    pub folders: Vec<String>,
    pub messages: Vec<(u32, Vec<u8>)>,
    /// UIDs whose FETCH fails.
    pub unfetchable: HashSet<u32>,
}

impl Default for Mailbox {
    fn default() -> Self {
        Self {
            folders: vec!["inbox".to_string()],
            messages: Vec::new(),
            unfetchable: HashSet::new(),
        }
    }
}

impl Mailbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a message with the next free UID.
    pub fn with_message(mut self, raw: impl Into<Vec<u8>>) -> Self {
        let uid = self.messages.last().map_or(1, |(uid, _)| uid + 1);
        self.messages.push((uid, raw.into()));
        self
    }

    pub fn with_unfetchable(mut self, uid: u32) -> Self {
        self.unfetchable.insert(uid);
        self
    }

    pub fn without_folders(mut self) -> Self {
        self.folders.clear();
        self
    }
}

/// Connector that accepts exactly one password.
pub struct FakeConnector {
    mailbox: Arc<Mailbox>,
    password: String,
    reachable: bool,
    pub ledger: Arc<SessionLedger>,
}

impl FakeConnector {
    pub fn new(mailbox: Mailbox, password: &str) -> Self {
        Self {
            mailbox: Arc::new(mailbox),
            password: password.to_string(),
            reachable: true,
            ledger: Arc::new(SessionLedger::default()),
        }
    }

    pub fn unreachable(mut self) -> Self {
        self.reachable = false;
        self
    }
}

#[async_trait]
impl Connector for FakeConnector {
    type Session = FakeSession;

    async fn connect(&self, credentials: &Credentials) -> Result<FakeSession> {
        self.ledger.connect_attempts.fetch_add(1, Ordering::SeqCst);

        if !self.reachable {
            return Err(EmailError::ConnectionFailed(format!(
                "failed to lookup address information for {}",
                credentials.provider().host()
            )));
        }
        if credentials.secret().expose_secret() != self.password {
            return Err(EmailError::AuthenticationFailed(
                "[AUTHENTICATIONFAILED] Invalid credentials".to_string(),
            ));
        }

        self.ledger.opened.fetch_add(1, Ordering::SeqCst);
        Ok(FakeSession {
            mailbox: Arc::clone(&self.mailbox),
            ledger: Arc::clone(&self.ledger),
            open: true,
            selected: false,
        })
    }
}

pub struct FakeSession {
    mailbox: Arc<Mailbox>,
    ledger: Arc<SessionLedger>,
    open: bool,
    selected: bool,
}

impl FakeSession {
    fn ensure_open(&self) -> Result<()> {
        if self.open {
            Ok(())
        } else {
            self.ledger.used_after_close.fetch_add(1, Ordering::SeqCst);
            Err(EmailError::SessionClosed)
        }
    }
}

#[async_trait]
impl MailSession for FakeSession {
    async fn select(&mut self, folder: &str) -> Result<()> {
        self.ensure_open()?;
        if !self.mailbox.folders.iter().any(|f| f.eq_ignore_ascii_case(folder)) {
            return Err(EmailError::FolderNotFound {
                folder: folder.to_string(),
                reason: "NO [NONEXISTENT] Unknown Mailbox".to_string(),
            });
        }
        self.selected = true;
        Ok(())
    }

    /// Understands `ALL`; any other filter matches nothing.
    async fn search(&mut self, filter: &str) -> Result<Vec<MessageId>> {
        self.ensure_open()?;
        if !self.selected {
            return Err(EmailError::ProtocolError("BAD no mailbox selected".to_string()));
        }
        if !filter.eq_ignore_ascii_case("ALL") {
            return Ok(Vec::new());
        }
        Ok(self
            .mailbox
            .messages
            .iter()
            .map(|(uid, _)| MessageId(*uid))
            .collect())
    }

    async fn fetch(&mut self, id: MessageId) -> Result<RawMessage> {
        self.ensure_open()?;
        if self.mailbox.unfetchable.contains(&id.0) {
            return Err(EmailError::FetchFailed {
                id,
                reason: "NO message body unavailable".to_string(),
            });
        }
        let bytes = self
            .mailbox
            .messages
            .iter()
            .find(|(uid, _)| *uid == id.0)
            .map(|(_, raw)| raw.clone())
            .ok_or_else(|| EmailError::FetchFailed {
                id,
                reason: "no such message".to_string(),
            })?;
        self.ledger.fetched.lock().unwrap().push(id.0);
        Ok(RawMessage { id, bytes })
    }

    async fn logout(&mut self) -> Result<()> {
        if self.open {
            self.open = false;
            self.ledger.closed.fetch_add(1, Ordering::SeqCst);
        }
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.open
    }
}

/// Records every progress event in order.
#[derive(Default)]
pub struct RecordingProgress {
    events: Mutex<Vec<ProgressEvent>>,
}

impl RecordingProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl ProgressReporter for RecordingProgress {
    fn report(&self, event: ProgressEvent) {
        self.events.lock().unwrap().push(event);
    }
}
