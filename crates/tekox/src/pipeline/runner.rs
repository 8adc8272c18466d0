use std::path::PathBuf;

use tracing::{debug, info, info_span, warn, Instrument};

use crate::credentials::{Credentials, HarvestRequest};
use crate::email::{Connector, HtmlParts, MessageFetcher, RawMessage};
use crate::error::HarvestError;
use crate::links::{extract_links, Link};
use crate::sanitize::redact_address;
use crate::storage::ReportWriter;

use super::config::HarvestConfig;
use super::progress::{ProgressEvent, ProgressReporter, Status};
use super::state::HarvestState;

pub const STATUS_MISSING_INPUT: &str = "Please provide both email address and password.";
pub const STATUS_VERIFYING: &str = "Verifying password...";
pub const STATUS_AUTH_FAILED: &str = "Incorrect password. Please enter the correct password.";
pub const STATUS_FETCHING: &str = "Fetching emails...";
pub const STATUS_SAVED: &str = "Hyperlinks extracted and saved as HTML file.";
pub const STATUS_NO_LINKS: &str = "No hyperlinks found in the emails.";

/// Result of one harvest, handed back to the front end.
#[derive(Debug)]
pub struct HarvestOutcome {
    /// Terminal state: `Done` or `Error`.
    pub state: HarvestState,
    /// Last status shown to the user.
    pub status: Status,
    /// Every link found, in processing order.
    pub links: Vec<Link>,
    pub report_path: Option<PathBuf>,
    /// The failure that ended the run, if any.
    pub error: Option<HarvestError>,
    /// Per-message failures that were skipped along the way.
    pub absorbed: Vec<HarvestError>,
}

impl HarvestOutcome {
    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn is_done(&self) -> bool {
        self.state == HarvestState::Done
    }

    /// Text for a link counter, empty when nothing was written.
    pub fn link_count_text(&self) -> String {
        if self.report_path.is_some() {
            format!("Number of hyperlinks found: {}", self.link_count())
        } else {
            String::new()
        }
    }
}

/// Drives connect → verify → fetch → walk → extract → write for a single
/// set of credentials. A harvester is consumed by [`Harvester::run`]; start
/// a new one for every invocation.
pub struct Harvester<C: Connector> {
    connector: C,
    config: HarvestConfig,
    state: HarvestState,
    links: Vec<Link>,
    absorbed: Vec<HarvestError>,
}

impl<C: Connector> Harvester<C> {
    pub fn new(connector: C, config: HarvestConfig) -> Self {
        Self {
            connector,
            config,
            state: HarvestState::Idle,
            links: Vec::new(),
            absorbed: Vec::new(),
        }
    }

    /// Runs the whole pipeline to completion or failure.
    pub async fn run(
        mut self,
        request: HarvestRequest,
        progress: &dyn ProgressReporter,
    ) -> HarvestOutcome {
        let span = info_span!(
            "harvest",
            address = %redact_address(&request.address),
            provider = %request.provider,
        );

        async move {
            let outcome = match self.execute(request, progress).await {
                Ok(outcome) => outcome,
                Err((status, error)) => self.fail(status, error, progress),
            };
            debug_assert!(outcome.state.is_terminal());
            outcome
        }
        .instrument(span)
        .await
    }

    async fn execute(
        &mut self,
        request: HarvestRequest,
        progress: &dyn ProgressReporter,
    ) -> Result<HarvestOutcome, (Status, HarvestError)> {
        // Verifying
        self.transition(HarvestState::Verifying, progress);
        let credentials = Credentials::from_request(request).map_err(|e| {
            let status = match e {
                HarvestError::MissingInput(_) => Status::error(STATUS_MISSING_INPUT),
                _ => Status::error(e.to_string()),
            };
            (status, e)
        })?;

        progress.report(ProgressEvent::Status(Status::info(STATUS_VERIFYING)));
        // Let the front end render the status before the first blocking call.
        tokio::task::yield_now().await;

        self.verify(&credentials)
            .instrument(info_span!("verify"))
            .await?;

        // Fetching
        self.transition(HarvestState::Fetching, progress);
        progress.report(ProgressEvent::Status(Status::info(STATUS_FETCHING)));
        let fetch_span = info_span!("fetch", folder = %self.config.folder);
        self.fetch(&credentials).instrument(fetch_span).await?;

        // Extracting
        self.transition(HarvestState::Extracting, progress);
        info!(
            "Collected {} links ({} messages skipped)",
            self.links.len(),
            self.absorbed.len()
        );
        if self.links.is_empty() {
            return Ok(self.finish(Status::error(STATUS_NO_LINKS), None, progress));
        }

        // Writing
        self.transition(HarvestState::Writing, progress);
        let report_path = {
            let _span = info_span!("write_report").entered();
            ReportWriter::new(&self.config.output_directory)
                .write(&self.links)
                .map_err(|e| (Status::error(e.to_string()), e))?
        };

        progress.report(ProgressEvent::LinkCount(self.links.len()));
        Ok(self.finish(Status::success(STATUS_SAVED), Some(report_path), progress))
    }

    async fn verify(&self, credentials: &Credentials) -> Result<(), (Status, HarvestError)> {
        self.connector.verify(credentials).await.map_err(|e| {
            warn!("Credential check failed: {}", e);
            (Status::error(STATUS_AUTH_FAILED), HarvestError::Auth(e.to_string()))
        })
    }

    async fn fetch(&mut self, credentials: &Credentials) -> Result<(), (Status, HarvestError)> {
        let session = self.connector.connect(credentials).await.map_err(|e| {
            warn!("Reconnect after successful check failed: {}", e);
            (Status::error(STATUS_AUTH_FAILED), HarvestError::Auth(e.to_string()))
        })?;

        let fetcher = MessageFetcher::new(&self.config.folder, &self.config.search_filter);
        let links = &mut self.links;
        let absorbed = &mut self.absorbed;

        let summary = fetcher
            .fetch_each(session, |message| {
                collect_links(message, links, absorbed);
            })
            .await
            .map_err(|e| {
                let error = HarvestError::from(e);
                (Status::error(error.to_string()), error)
            })?;

        self.absorbed
            .extend(summary.failures.into_iter().map(HarvestError::from));
        Ok(())
    }

    fn transition(&mut self, next: HarvestState, progress: &dyn ProgressReporter) {
        debug_assert!(
            self.state.can_transition_to(next),
            "invalid transition {} -> {}",
            self.state,
            next
        );
        debug!("Harvest state {} -> {}", self.state, next);
        self.state = next;
        progress.report(ProgressEvent::State(next));
    }

    fn finish(
        &mut self,
        status: Status,
        report_path: Option<PathBuf>,
        progress: &dyn ProgressReporter,
    ) -> HarvestOutcome {
        self.transition(HarvestState::Done, progress);
        progress.report(ProgressEvent::Status(status.clone()));
        HarvestOutcome {
            state: self.state,
            status,
            links: std::mem::take(&mut self.links),
            report_path,
            error: None,
            absorbed: std::mem::take(&mut self.absorbed),
        }
    }

    fn fail(
        &mut self,
        status: Status,
        error: HarvestError,
        progress: &dyn ProgressReporter,
    ) -> HarvestOutcome {
        warn!("Harvest failed while {}: {}", self.state, error);
        self.transition(HarvestState::Error, progress);
        progress.report(ProgressEvent::Status(status.clone()));
        HarvestOutcome {
            state: self.state,
            status,
            links: std::mem::take(&mut self.links),
            report_path: None,
            error: Some(error),
            absorbed: std::mem::take(&mut self.absorbed),
        }
    }
}

/// Walks one message and appends its links. Failures are recorded, never
/// propagated.
fn collect_links(message: RawMessage, links: &mut Vec<Link>, absorbed: &mut Vec<HarvestError>) {
    let parts = match HtmlParts::parse(&message.bytes) {
        Ok(parts) => parts,
        Err(e) => {
            warn!("Skipping message {}: {}", message.id, e);
            absorbed.push(HarvestError::Decode {
                id: message.id.to_string(),
                reason: e.to_string(),
            });
            return;
        }
    };

    let before = links.len();
    for part in parts {
        links.extend(extract_links(part.as_str()));
    }
    debug!("Message {} yielded {} links", message.id, links.len() - before);
}
