//! Report rendering.
//!
//! This module renders summary cards as Markdown or JSON.

use super::card::SummaryCard;
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Metadata about a rendering run.
#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    /// Date and time the output was generated.
    pub generated_at: DateTime<Utc>,
    /// Number of reports loaded.
    pub reports_loaded: usize,
    /// Number of summaries rendered.
    pub summaries: usize,
    /// Number of summaries showing an alert.
    pub alerts: usize,
}

impl ReportMetadata {
    pub fn new(cards: &[SummaryCard], reports_loaded: usize) -> Self {
        Self {
            generated_at: Utc::now(),
            reports_loaded,
            summaries: cards.len(),
            alerts: cards.iter().filter(|c| c.has_alert()).count(),
        }
    }
}

/// Complete rendered output.
#[derive(Debug, Clone, Serialize)]
pub struct CountsReport {
    pub metadata: ReportMetadata,
    pub summaries: Vec<SummaryCard>,
}

/// Generate a complete Markdown report.
pub fn generate_markdown_report(report: &CountsReport) -> String {
    let mut output = String::new();

    output.push_str("# Report Counts\n\n");
    output.push_str(&generate_metadata_section(&report.metadata));

    if report.summaries.is_empty() {
        output.push_str("No summaries are configured.\n");
        return output;
    }

    for card in &report.summaries {
        output.push_str(&generate_card_section(card));
    }

    output
}

fn generate_metadata_section(metadata: &ReportMetadata) -> String {
    let mut section = String::new();

    section.push_str(&format!(
        "- **Generated:** {}\n",
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!("- **Reports Loaded:** {}\n", metadata.reports_loaded));
    section.push_str(&format!("- **Summaries:** {}\n", metadata.summaries));
    if metadata.alerts > 0 {
        section.push_str(&format!("- **Alerts:** {}\n", metadata.alerts));
    }
    section.push('\n');

    section
}

/// Generate the section for a single summary card.
fn generate_card_section(card: &SummaryCard) -> String {
    let mut section = String::new();

    section.push_str(&format!("## {}\n\n", card.title));

    if let Some(ref alert) = card.alert {
        section.push_str(&format!("> **Warning:** {}\n\n", alert));
        return section;
    }

    for line in &card.metadata {
        section.push_str(&format!("- {}\n", line));
    }
    section.push('\n');

    let counts = card.count_lines();
    if !counts.is_empty() {
        for (i, line) in counts.iter().enumerate() {
            section.push_str(&format!("{}. {}\n", i + 1, line));
        }
        section.push('\n');
    }

    section
}

/// Generate a JSON report.
pub fn generate_json_report(report: &CountsReport) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}
