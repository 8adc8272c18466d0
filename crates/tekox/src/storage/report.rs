use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::error::HarvestError;
use crate::links::Link;
use crate::sanitize::redact_path;

pub const REPORT_FILENAME: &str = "output.html";

/// Writes the collected links as a static HTML page.
pub struct ReportWriter {
    output_directory: PathBuf,
}

impl ReportWriter {
    pub fn new<P: AsRef<Path>>(output_directory: P) -> Self {
        Self {
            output_directory: output_directory.as_ref().to_path_buf(),
        }
    }

    /// Path the report is written to.
    pub fn report_path(&self) -> PathBuf {
        self.output_directory.join(REPORT_FILENAME)
    }

    /// Writes `links` to `<output_directory>/output.html`, creating the
    /// directory if needed and replacing any earlier report.
    pub fn write(&self, links: &[Link]) -> Result<PathBuf, HarvestError> {
        std::fs::create_dir_all(&self.output_directory).map_err(|e| HarvestError::Io {
            path: self.output_directory.clone(),
            source: e,
        })?;

        let path = self.report_path();
        std::fs::write(&path, render_report(links)).map_err(|e| HarvestError::Io {
            path: path.clone(),
            source: e,
        })?;

        info!("Wrote {} links to {}", links.len(), redact_path(&path));
        debug!("Report path: {}", path.display());
        Ok(path)
    }
}

/// Renders the report document: one `<a href="L">L</a><br>` line per link.
/// Each link is HTML-escaped in both the target and the label.
pub fn render_report(links: &[Link]) -> String {
    let mut html = String::from("<html><body>\n");
    for link in links {
        let escaped = escape_html(link);
        // Writing into a String cannot fail.
        let _ = writeln!(html, "<a href=\"{escaped}\">{escaped}</a><br>");
    }
    html.push_str("</body></html>");
    html
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
