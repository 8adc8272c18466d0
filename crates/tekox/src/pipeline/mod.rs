pub mod config;
pub mod progress;
pub mod runner;
pub mod state;

pub use config::HarvestConfig;
pub use progress::{ChannelProgress, NoopProgress, ProgressEvent, ProgressReporter, Severity, Status};
pub use runner::{HarvestOutcome, Harvester};
pub use state::HarvestState;
