pub mod report;

pub use report::{render_report, ReportWriter, REPORT_FILENAME};
