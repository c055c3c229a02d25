use clap::Parser;
use logreport_cli::OutputFormat;
use logreport_cli::commands::run;
use logreport_cli::config::{Overrides, Settings};
use logreport_cli::logging::init_logging;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "logreport")]
#[command(author, version)]
#[command(
    about = "Build a request time report from the latest web server access log",
    long_about = "Logreport finds the most recent dated access log in a directory, aggregates \
                  request times per URL and writes a report of the slowest URLs. A log whose \
                  report already exists is skipped, so the tool is safe to run from cron."
)]
struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory containing the access logs
    #[arg(long, env = "LOG_DIR", value_name = "DIR")]
    log_dir: Option<PathBuf>,

    /// Directory reports are written to
    #[arg(long, env = "REPORT_DIR", value_name = "DIR")]
    report_dir: Option<PathBuf>,

    /// Maximum number of URLs in the report
    #[arg(long, env = "REPORT_SIZE", value_name = "N")]
    report_size: Option<usize>,

    /// Write diagnostics to this file instead of stderr
    #[arg(long, env = "LOG_FILE", value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Abort when this percentage of lines cannot be parsed
    #[arg(long, env = "ERROR_THRESHOLD", value_name = "PERCENT")]
    error_threshold: Option<f64>,

    /// Report template containing a $table_json placeholder
    #[arg(long, env = "REPORT_TEMPLATE", value_name = "FILE")]
    template: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Output format for the run summary
    #[arg(short, long, value_enum, default_value = "pretty")]
    format: OutputFormat,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            log_dir: self.log_dir.clone(),
            report_dir: self.report_dir.clone(),
            report_size: self.report_size,
            log_file: self.log_file.clone(),
            error_threshold: self.error_threshold,
            template: self.template.clone(),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match Settings::load(cli.config.as_deref(), cli.overrides()) {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            return ExitCode::from(run::EXIT_FATAL);
        }
    };

    if let Err(err) = init_logging(cli.verbose, settings.log_file.as_deref()) {
        eprintln!("Error: {:#}", err);
        return ExitCode::from(run::EXIT_FATAL);
    }

    if let Some(path) = &cli.config {
        tracing::debug!("Loaded config file: {}", path.display());
    }

    match run::execute(&settings, cli.format) {
        Ok(outcome) => ExitCode::from(run::exit_status(&outcome)),
        Err(err) => {
            tracing::error!("{:#}", err);
            ExitCode::from(run::EXIT_FATAL)
        }
    }
}
