//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;

/// report-counts - summary counts for REDCap report exports
///
/// Reads report exports (JSON) and renders one summary card per configured
/// summary: either the total number of records or counts grouped by a field.
///
/// Examples:
///   report-counts --report reports/42.json --dictionary dictionary.json
///   report-counts --config counts.toml --format json --output counts.json
///   report-counts --summary stop-reasons --fail-on-alert
///   report-counts --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Report export file (JSON), may be repeated
    ///
    /// Replaces the `reports` list from the config file when given.
    #[arg(short, long, value_name = "FILE")]
    pub report: Vec<PathBuf>,

    /// Data dictionary export (JSON) used to validate bucket fields
    #[arg(short, long, value_name = "FILE", env = "REPORT_COUNTS_DICTIONARY")]
    pub dictionary: Option<PathBuf>,

    /// Output file path; prints to stdout when omitted
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .report-counts.toml in the current directory
    #[arg(short, long, value_name = "FILE", env = "REPORT_COUNTS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Only render the summary with this id (comma-separated or repeated)
    #[arg(short, long, value_name = "ID", value_delimiter = ',')]
    pub summary: Vec<String>,

    /// Output format (markdown, json)
    #[arg(long, default_value = "markdown", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Exit with code 2 when any summary shows an alert
    ///
    /// Alerts are raised for missing reports and missing bucket fields.
    #[arg(long)]
    pub fail_on_alert: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (errors only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .report-counts.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the rendered summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// JSON format
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.init_config {
            return Ok(());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        for path in &self.report {
            if !path.is_file() {
                return Err(format!("Report file does not exist: {}", path.display()));
            }
        }

        if let Some(ref dictionary) = self.dictionary {
            if !dictionary.is_file() {
                return Err(format!(
                    "Dictionary file does not exist: {}",
                    dictionary.display()
                ));
            }
        }

        if self.summary.iter().any(|s| s.trim().is_empty()) {
            return Err("Summary ids cannot be empty".to_string());
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    ///
    /// `config_verbose` is the config file's `verbose` flag; `--quiet` wins over both.
    pub fn log_level(&self, config_verbose: bool) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose || config_verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
