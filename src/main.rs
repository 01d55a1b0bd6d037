//! report-counts - summary counts for REDCap report exports
//!
//! A CLI tool that reads exported report records, validates each configured
//! summary against the data dictionary, and renders total or itemized counts.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (unreadable input, bad config, etc.)
//!   2 - A summary shows an alert and --fail-on-alert is set

mod analysis;
mod cli;
mod config;
mod dictionary;
mod errors;
mod loader;
mod models;
mod report;

use analysis::SummaryProcessor;
use anyhow::{Context, Result};
use cli::{Args, OutputFormat};
use config::Config;
use dictionary::DataDictionary;
use loader::ReportSet;
use report::{CountsReport, ReportMetadata, SummaryCard};
use std::path::PathBuf;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Config is loaded before logging so its `verbose` flag applies
    let (mut config, config_path) = match load_config(&args) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };
    config.merge_with_args(&args);

    init_logging(args.log_level(config.general.verbose));

    info!("report-counts v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);
    match config_path {
        Some(path) => info!("Loaded config from {}", path.display()),
        None => debug!("No config file found, using defaults"),
    }

    match run(args, config) {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            error!("Run failed: {:#}", e);
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .report-counts.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(config::DEFAULT_CONFIG_FILE);

    if path.exists() {
        eprintln!(
            "{} already exists. Remove it first or edit it manually.",
            config::DEFAULT_CONFIG_FILE
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", config::DEFAULT_CONFIG_FILE))?;

    println!("Created {} with example summaries.", config::DEFAULT_CONFIG_FILE);
    Ok(())
}

/// Initialize logging based on verbosity settings.
///
/// Logs go to stderr so rendered output on stdout stays clean.
fn init_logging(level: tracing::Level) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Load inputs, build every selected summary and write the output.
/// Returns the exit code (0 or 2).
fn run(args: Args, config: Config) -> Result<i32> {
    let summaries = config.selected_summaries(&args.summary)?;
    if summaries.is_empty() {
        warn!("No summaries configured; add [[summaries]] entries to the config file");
    }

    let reports = ReportSet::load(&config.general.reports).context("Failed to load reports")?;
    if reports.is_empty() {
        warn!("No report files given; every summary will report a missing report");
    } else {
        info!("Loaded {} report(s)", reports.len());
    }

    let dictionary = match config.general.dictionary {
        Some(ref path) => DataDictionary::load(path)
            .with_context(|| format!("Failed to load data dictionary: {}", path.display()))?,
        None => DataDictionary::default(),
    };
    if dictionary.is_empty() {
        warn!("Data dictionary is empty; itemized summaries will report missing fields");
    } else {
        debug!("Data dictionary has {} field(s)", dictionary.len());
    }

    let cards: Vec<SummaryCard> = summaries
        .into_iter()
        .map(|summary| {
            let model =
                SummaryProcessor::new(summary, reports.get(&summary.report_id), &dictionary)
                    .summary_model();
            SummaryCard::from_model(&model)
        })
        .collect();

    let output_report = CountsReport {
        metadata: ReportMetadata::new(&cards, reports.len()),
        summaries: cards,
    };

    let output = match args.format {
        OutputFormat::Json => report::generate_json_report(&output_report)?,
        OutputFormat::Markdown => report::generate_markdown_report(&output_report),
    };

    match config.general.output {
        Some(ref path) => {
            std::fs::write(path, &output)
                .with_context(|| format!("Failed to write output to {}", path.display()))?;
            info!("Output saved to {}", path.display());
        }
        None => print!("{}", output),
    }

    let alerts = output_report.metadata.alerts;
    if alerts > 0 {
        warn!("{} summary card(s) show an alert", alerts);
        if args.fail_on_alert {
            return Ok(2);
        }
    }

    Ok(0)
}

/// Load configuration from file or use defaults.
///
/// Also returns the path the config came from, if any.
fn load_config(args: &Args) -> Result<(Config, Option<PathBuf>)> {
    if let Some(ref config_path) = args.config {
        return Ok((Config::load(config_path)?, Some(config_path.clone())));
    }

    Ok(match Config::load_default()? {
        Some(config) => (config, Some(PathBuf::from(config::DEFAULT_CONFIG_FILE))),
        None => (Config::default(), None),
    })
}
