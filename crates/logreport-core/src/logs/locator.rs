use super::types::LogFile;
use crate::{Error, Result};
use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// Extension of generated reports
pub const REPORT_EXTENSION: &str = "html";

lazy_static! {
    static ref LOG_NAME_PATTERN: Regex = Regex::new(
        r"^[\w-]+(?:\.[\w-]+)*\.log-(?P<year>\d{4})(?P<month>\d{2})(?P<day>\d{2})(?P<gz>\.gz)?$"
    )
    .unwrap();
}

pub struct LogLocator;

impl LogLocator {
    /// Find the most recent dated log file in `log_dir`
    ///
    /// Returns `Ok(None)` when the directory holds no conforming file.
    pub fn locate(log_dir: &Path, report_dir: &Path) -> Result<Option<LogFile>> {
        tracing::debug!("Scanning log directory: {}", log_dir.display());

        if !log_dir.exists() {
            return Err(Error::DirectoryMissing(log_dir.to_path_buf()));
        }

        let read_dir_err = |source| Error::ReadDir {
            path: log_dir.to_path_buf(),
            source,
        };

        let mut latest: Option<(NaiveDate, String, bool)> = None;

        for entry in fs::read_dir(log_dir).map_err(read_dir_err)? {
            let entry = entry.map_err(read_dir_err)?;
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                continue;
            };
            let Some((date, compressed)) = parse_log_name(name) else {
                continue;
            };

            let is_newer = match &latest {
                None => true,
                Some((best_date, best_name, _)) => {
                    (date, name) > (*best_date, best_name.as_str())
                }
            };
            if is_newer {
                latest = Some((date, name.to_string(), compressed));
            }
        }

        let Some((date, name, compressed)) = latest else {
            tracing::info!("No log files found in {}", log_dir.display());
            return Ok(None);
        };

        let log_dir = std::path::absolute(log_dir).map_err(read_dir_err)?;
        let report_dir = std::path::absolute(report_dir).map_err(|source| Error::ReadDir {
            path: report_dir.to_path_buf(),
            source,
        })?;

        let log_file = LogFile {
            path: log_dir.join(&name),
            date,
            compressed,
            report_path: report_path_for(&report_dir, date),
        };

        tracing::info!("Selected log file: {}", log_file.path.display());

        Ok(Some(log_file))
    }
}

/// Parse a conforming log file name into its date and compression flag
///
/// Names whose 8-digit group is not a real calendar date are rejected.
pub fn parse_log_name(name: &str) -> Option<(NaiveDate, bool)> {
    let caps = LOG_NAME_PATTERN.captures(name)?;

    let year = caps["year"].parse().ok()?;
    let month = caps["month"].parse().ok()?;
    let day = caps["day"].parse().ok()?;

    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => Some((date, caps.name("gz").is_some())),
        None => {
            tracing::warn!("Skipping log file with invalid date: {}", name);
            None
        }
    }
}

/// Report location for a given log date
pub fn report_path_for(report_dir: &Path, date: NaiveDate) -> PathBuf {
    report_dir.join(format!(
        "report-{}.{}",
        date.format("%Y.%m.%d"),
        REPORT_EXTENSION
    ))
}
