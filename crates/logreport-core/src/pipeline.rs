use crate::analysis::Aggregator;
use crate::logs::{LineExtractor, LogFile, LogLocator, LogReader};
use crate::report::{ReportRenderer, ReportTemplate, ReportWriter};
use crate::{Error, Result};
use serde::Serialize;
use std::path::PathBuf;

/// Resolved settings for one pipeline run
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub log_dir: PathBuf,
    pub report_dir: PathBuf,
    /// Maximum number of URLs in the report
    pub report_size: usize,
    /// Unparsed-line percentage at which the run is aborted
    pub error_threshold: f64,
    /// Report template; the built-in page is used when unset
    pub template: Option<PathBuf>,
}

impl PipelineConfig {
    pub fn new(
        log_dir: impl Into<PathBuf>,
        report_dir: impl Into<PathBuf>,
        report_size: usize,
        error_threshold: f64,
    ) -> Result<Self> {
        if !error_threshold.is_finite() || error_threshold <= 0.0 || error_threshold > 100.0 {
            return Err(Error::InvalidConfig(format!(
                "error threshold must be in (0, 100], got {}",
                error_threshold
            )));
        }

        Ok(Self {
            log_dir: log_dir.into(),
            report_dir: report_dir.into(),
            report_size,
            error_threshold,
            template: None,
        })
    }

    pub fn with_template(mut self, template: impl Into<PathBuf>) -> Self {
        self.template = Some(template.into());
        self
    }
}

/// Counters reported after a report has been written
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub log_path: PathBuf,
    pub report_path: PathBuf,
    pub total_lines: usize,
    pub unparsed: usize,
    pub distinct_urls: usize,
    pub rows: usize,
}

/// How a pipeline run ended, short of a fatal error
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// A new report was written
    Written(RunSummary),
    /// No conforming log file (or no log directory) was found
    NoLogFile,
    /// The report for the latest log already exists
    AlreadyReported { report_path: PathBuf },
    /// The latest log has no lines to report on
    EmptyLog { log_path: PathBuf },
    /// Too many lines could not be parsed; nothing was written
    Aborted {
        log_path: PathBuf,
        error_percent: f64,
        threshold: f64,
    },
}

pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Locate the latest log, aggregate it and write its report
    pub fn run(&self) -> Result<Outcome> {
        let log_file = match LogLocator::locate(&self.config.log_dir, &self.config.report_dir) {
            Ok(Some(log_file)) => log_file,
            Ok(None) => return Ok(Outcome::NoLogFile),
            Err(Error::DirectoryMissing(dir)) => {
                tracing::warn!("Log directory {} does not exist", dir.display());
                return Ok(Outcome::NoLogFile);
            }
            Err(e) => return Err(e),
        };

        if log_file.report_path.exists() {
            tracing::info!(
                "Report {} already exists, nothing to do",
                log_file.report_path.display()
            );
            return Ok(Outcome::AlreadyReported {
                report_path: log_file.report_path,
            });
        }

        self.process(log_file)
    }

    fn process(&self, log_file: LogFile) -> Result<Outcome> {
        tracing::info!("Processing log file: {}", log_file.path.display());

        let mut aggregator = Aggregator::new();
        LogReader::for_each_line(&log_file, |line| {
            aggregator.update(LineExtractor::extract(line))
        })?;
        let result = aggregator.finish();

        let error_percent = result.error_percent();
        tracing::info!(
            "Read {} lines, {} unparsed ({:.2}%), {} distinct URLs",
            result.total_lines,
            result.unparsed,
            error_percent,
            result.urls.len()
        );

        if result.total_lines > 0 && error_percent >= self.config.error_threshold {
            tracing::warn!(
                "Unparsed lines {:.2}% reach the threshold of {}%, no report written",
                error_percent,
                self.config.error_threshold
            );
            return Ok(Outcome::Aborted {
                log_path: log_file.path,
                error_percent,
                threshold: self.config.error_threshold,
            });
        }

        if result.total_samples == 0 {
            tracing::info!("Log file {} is empty", log_file.path.display());
            return Ok(Outcome::EmptyLog {
                log_path: log_file.path,
            });
        }

        let template = match &self.config.template {
            Some(path) => ReportTemplate::from_file(path)?,
            None => ReportTemplate::builtin(),
        };

        let body = ReportRenderer::new(self.config.report_size).render(&result, &template)?;
        ReportWriter::to_file(&body, &log_file.report_path)?;

        tracing::info!("Report created: {}", log_file.report_path.display());

        Ok(Outcome::Written(RunSummary {
            log_path: log_file.path,
            report_path: log_file.report_path,
            total_lines: result.total_lines,
            unparsed: result.unparsed,
            distinct_urls: result.urls.len(),
            rows: result.urls.len().min(self.config.report_size),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_rejects_bad_thresholds() {
        for threshold in [0.0, -1.0, 100.5, f64::NAN, f64::INFINITY] {
            assert!(
                PipelineConfig::new("log", "reports", 10, threshold).is_err(),
                "{} should be rejected",
                threshold
            );
        }
        assert!(PipelineConfig::new("log", "reports", 10, 100.0).is_ok());
        assert!(PipelineConfig::new("log", "reports", 10, 0.5).is_ok());
    }

    #[test]
    fn test_config_with_template() {
        let config = PipelineConfig::new("log", "reports", 10, 30.0)
            .unwrap()
            .with_template("custom.html");
        assert_eq!(config.template, Some(PathBuf::from("custom.html")));
    }
}
