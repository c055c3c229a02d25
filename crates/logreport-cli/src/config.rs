use anyhow::{Context, Result};
use logreport_core::PipelineConfig;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_LOG_DIR: &str = "./log";
pub const DEFAULT_REPORT_DIR: &str = "./reports";
pub const DEFAULT_REPORT_SIZE: usize = 1000;
/// Percentage of unparsed lines that aborts a run
pub const DEFAULT_ERROR_THRESHOLD: f64 = 30.0;

/// Settings read from a TOML config file
///
/// Keys are upper case, e.g.
///
/// ```toml
/// LOG_DIR = "/var/log/nginx"
/// REPORT_DIR = "/var/www/reports"
/// REPORT_SIZE = 500
/// ERROR_THRESHOLD = 20
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", deny_unknown_fields)]
pub struct FileConfig {
    pub log_dir: Option<PathBuf>,
    pub report_dir: Option<PathBuf>,
    pub report_size: Option<usize>,
    pub log_file: Option<PathBuf>,
    pub error_threshold: Option<f64>,
    pub report_template: Option<PathBuf>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        Self::parse(&content).with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

/// Values given on the command line or through the environment
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub log_dir: Option<PathBuf>,
    pub report_dir: Option<PathBuf>,
    pub report_size: Option<usize>,
    pub log_file: Option<PathBuf>,
    pub error_threshold: Option<f64>,
    pub template: Option<PathBuf>,
}

/// Fully resolved settings for one run
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub log_dir: PathBuf,
    pub report_dir: PathBuf,
    pub report_size: usize,
    pub log_file: Option<PathBuf>,
    pub error_threshold: f64,
    pub template: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            report_dir: PathBuf::from(DEFAULT_REPORT_DIR),
            report_size: DEFAULT_REPORT_SIZE,
            log_file: None,
            error_threshold: DEFAULT_ERROR_THRESHOLD,
            template: None,
        }
    }
}

impl Settings {
    /// Merge defaults, the config file and overrides, later sources winning
    pub fn resolve(file: FileConfig, overrides: Overrides) -> Self {
        let defaults = Self::default();

        Self {
            log_dir: overrides
                .log_dir
                .or(file.log_dir)
                .unwrap_or(defaults.log_dir),
            report_dir: overrides
                .report_dir
                .or(file.report_dir)
                .unwrap_or(defaults.report_dir),
            report_size: overrides
                .report_size
                .or(file.report_size)
                .unwrap_or(defaults.report_size),
            log_file: overrides.log_file.or(file.log_file),
            error_threshold: overrides
                .error_threshold
                .or(file.error_threshold)
                .unwrap_or(defaults.error_threshold),
            template: overrides.template.or(file.report_template),
        }
    }

    pub fn load(config_path: Option<&Path>, overrides: Overrides) -> Result<Self> {
        let file = match config_path {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        Ok(Self::resolve(file, overrides))
    }

    pub fn pipeline_config(&self) -> logreport_core::Result<PipelineConfig> {
        let config = PipelineConfig::new(
            &self.log_dir,
            &self.report_dir,
            self.report_size,
            self.error_threshold,
        )?;

        Ok(match &self.template {
            Some(template) => config.with_template(template),
            None => config,
        })
    }
}
