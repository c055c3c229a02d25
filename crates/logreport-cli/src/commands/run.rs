use crate::OutputFormat;
use crate::config::Settings;
use anyhow::Result;
use logreport_core::{Outcome, Pipeline};

/// Run the report pipeline with the resolved settings
pub fn generate_report(settings: &Settings) -> Result<Outcome> {
    tracing::debug!("Resolved settings: {:?}", settings);

    let config = settings.pipeline_config()?;
    let outcome = Pipeline::new(config).run()?;

    Ok(outcome)
}

pub fn execute(settings: &Settings, format: OutputFormat) -> Result<Outcome> {
    tracing::debug!("Output format: {}", format.as_str());

    let outcome = generate_report(settings)?;

    match format {
        OutputFormat::Json => output_json(&outcome)?,
        OutputFormat::Pretty => output_pretty(&outcome),
    }

    Ok(outcome)
}

/// Exit status of a run that wrote a report or had nothing to do
pub const EXIT_OK: u8 = 0;
/// Exit status of a fatal error
pub const EXIT_FATAL: u8 = 1;
/// Exit status of a run aborted on the error threshold
pub const EXIT_ABORTED: u8 = 2;

/// Process exit status for a finished run
///
/// Reports and no-ops succeed. A run aborted on the error threshold gets its
/// own status so cron jobs can tell it apart from a fatal error.
pub fn exit_status(outcome: &Outcome) -> u8 {
    match outcome {
        Outcome::Aborted { .. } => EXIT_ABORTED,
        Outcome::Written(_)
        | Outcome::NoLogFile
        | Outcome::AlreadyReported { .. }
        | Outcome::EmptyLog { .. } => EXIT_OK,
    }
}

fn output_pretty(outcome: &Outcome) {
    use console::style;

    match outcome {
        Outcome::Written(summary) => {
            println!(
                "{} {}",
                style("Report written:").bold().green(),
                summary.report_path.display()
            );
            println!("  Log file:       {}", summary.log_path.display());
            println!("  Lines read:     {}", summary.total_lines);
            println!("  Unparsed lines: {}", summary.unparsed);
            println!("  Distinct URLs:  {}", summary.distinct_urls);
            println!("  Report rows:    {}", summary.rows);
        }
        Outcome::NoLogFile => {
            println!("{}", style("No log file to process").yellow());
        }
        Outcome::AlreadyReported { report_path } => {
            println!(
                "{} {}",
                style("Report already exists:").yellow(),
                report_path.display()
            );
        }
        Outcome::EmptyLog { log_path } => {
            println!("{} {}", style("Log file is empty:").yellow(), log_path.display());
        }
        Outcome::Aborted {
            log_path,
            error_percent,
            threshold,
        } => {
            println!(
                "{} {:.2}% of lines in {} could not be parsed (threshold {}%)",
                style("Aborted:").bold().red(),
                error_percent,
                log_path.display(),
                threshold
            );
        }
    }
}

fn output_json(outcome: &Outcome) -> Result<()> {
    let json = serde_json::to_string_pretty(outcome)?;
    println!("{}", json);
    Ok(())
}
