pub mod config;
pub mod credentials;
pub mod email;
pub mod error;
pub mod links;
pub mod pipeline;
pub mod provider;
pub mod sanitize;
pub mod secrets;
pub mod storage;

pub use config::{load_config, Config};
pub use credentials::{Credentials, HarvestRequest};
pub use email::{Connector, EmailError, HtmlParts, ImapConnector, MailSession, MessageFetcher};
pub use error::{ConfigError, HarvestError, Result};
pub use links::{extract_links, Link};
pub use pipeline::{
    ChannelProgress, HarvestConfig, HarvestOutcome, HarvestState, Harvester, NoopProgress,
    ProgressEvent, ProgressReporter, Severity, Status,
};
pub use provider::Provider;
pub use secrets::{resolve_password, SecretError};
pub use storage::ReportWriter;
