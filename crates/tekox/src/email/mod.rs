//! Mailbox access: connecting, fetching raw messages and walking their MIME
//! structure for HTML bodies.

pub mod client;
pub mod error;
pub mod fetcher;
pub mod parser;
pub mod session;

pub use client::{ImapConnector, ImapSession};
pub use error::EmailError;
pub use fetcher::{FetchSummary, MessageFetcher, DEFAULT_FILTER, DEFAULT_FOLDER};
pub use parser::{HtmlPart, HtmlParts};
pub use session::{Connector, MailSession, MessageId, RawMessage};
