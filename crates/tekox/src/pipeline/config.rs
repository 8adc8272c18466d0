use std::path::PathBuf;

use crate::config::Config;
use crate::email::{DEFAULT_FILTER, DEFAULT_FOLDER};

/// Runtime settings for one harvest.
#[derive(Debug, Clone)]
pub struct HarvestConfig {
    pub output_directory: PathBuf,
    pub folder: String,
    pub search_filter: String,
}

impl HarvestConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            output_directory: PathBuf::from(&config.output_directory),
            folder: config.folder.clone(),
            search_filter: config.search_filter.clone(),
        }
    }

    /// Default folder and filter, writing into `output_directory`.
    pub fn with_output_directory(output_directory: impl Into<PathBuf>) -> Self {
        Self {
            output_directory: output_directory.into(),
            folder: DEFAULT_FOLDER.to_string(),
            search_filter: DEFAULT_FILTER.to_string(),
        }
    }
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}
