//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.report-counts.toml` files.

use crate::errors::ReportCountsError;
use crate::models::{Strategy, SummaryConfig};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Default config file name, looked up in the current directory.
pub const DEFAULT_CONFIG_FILE: &str = ".report-counts.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Configured summaries, in display order.
    #[serde(default)]
    pub summaries: Vec<SummaryConfig>,
}

/// General application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Default output file path. Output goes to stdout when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,

    /// Data dictionary export used to validate bucket fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dictionary: Option<PathBuf>,

    /// Report export files.
    #[serde(default)]
    pub reports: Vec<PathBuf>,

    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(DEFAULT_CONFIG_FILE);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Check summary definitions for duplicates and missing bucket fields.
    pub fn validate(&self) -> std::result::Result<(), ReportCountsError> {
        let mut seen = HashSet::new();

        for summary in &self.summaries {
            if summary.id.trim().is_empty() {
                return Err(ReportCountsError::Config(format!(
                    "summary '{}' has an empty id",
                    summary.title
                )));
            }
            if !seen.insert(summary.id.as_str()) {
                return Err(ReportCountsError::Config(format!(
                    "duplicate summary id '{}'",
                    summary.id
                )));
            }
            if summary.strategy == Strategy::Itemized && summary.bucket_by.is_none() {
                return Err(ReportCountsError::Config(format!(
                    "itemized summary '{}' needs a bucket_by field",
                    summary.id
                )));
            }
        }

        Ok(())
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// This method only overrides config when CLI provides explicit values.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref output) = args.output {
            self.general.output = Some(output.clone());
        }
        if let Some(ref dictionary) = args.dictionary {
            self.general.dictionary = Some(dictionary.clone());
        }

        // Reports given on the command line replace the configured list
        if !args.report.is_empty() {
            self.general.reports = args.report.clone();
        }

        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Summaries selected for this run, in configured order.
    pub fn selected_summaries(
        &self,
        ids: &[String],
    ) -> std::result::Result<Vec<&SummaryConfig>, ReportCountsError> {
        if ids.is_empty() {
            return Ok(self.summaries.iter().collect());
        }

        for id in ids {
            if !self.summaries.iter().any(|s| &s.id == id) {
                return Err(ReportCountsError::UnknownSummary(id.clone()));
            }
        }

        Ok(self
            .summaries
            .iter()
            .filter(|s| ids.contains(&s.id))
            .collect())
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config {
            general: GeneralConfig {
                output: None,
                dictionary: Some(PathBuf::from("dictionary.json")),
                reports: vec![PathBuf::from("reports/42.json")],
                verbose: false,
            },
            summaries: vec![
                SummaryConfig {
                    id: "total-screened".to_string(),
                    report_id: "42".to_string(),
                    title: "Total Screened".to_string(),
                    strategy: Strategy::Total,
                    bucket_by: None,
                },
                SummaryConfig {
                    id: "stop-reasons".to_string(),
                    report_id: "42".to_string(),
                    title: "Stop Reasons".to_string(),
                    strategy: Strategy::Itemized,
                    bucket_by: Some("dsp_stop_reason".to_string()),
                },
            ],
        };
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
