use chrono::NaiveDate;
use std::path::PathBuf;

/// The log file selected for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFile {
    pub path: PathBuf,
    pub date: NaiveDate,
    pub compressed: bool,
    /// Where the report for `date` lives, whether or not it exists yet
    pub report_path: PathBuf,
}

/// Result of extracting a single access log line
///
/// A line that does not fit the grammar is a regular value, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum LineSample<'a> {
    Parsed { url: &'a str, latency: f64 },
    Unparsed,
}

impl LineSample<'_> {
    pub fn is_parsed(&self) -> bool {
        matches!(self, LineSample::Parsed { .. })
    }
}
