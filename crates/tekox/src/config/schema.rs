use serde::{Deserialize, Serialize};

pub const CONFIG_VERSION: &str = "1.0";

/// Settings file for the extractor. Every field may be omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: String,
    /// Directory receiving `output.html`.
    #[serde(default = "default_output_directory")]
    pub output_directory: String,
    /// Mailbox folder to harvest.
    #[serde(default = "default_folder")]
    pub folder: String,
    /// Passed verbatim to the server's SEARCH command.
    #[serde(default = "default_search_filter")]
    pub search_filter: String,
}

fn default_version() -> String {
    CONFIG_VERSION.to_string()
}

fn default_output_directory() -> String {
    "TekOx_Output".to_string()
}

fn default_folder() -> String {
    "inbox".to_string()
}

fn default_search_filter() -> String {
    "ALL".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            output_directory: default_output_directory(),
            folder: default_folder(),
            search_filter: default_search_filter(),
        }
    }
}
