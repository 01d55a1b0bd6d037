//! Summary cards.
//!
//! A card is the display-ready form of one processed summary: a title,
//! metadata lines and the itemized count lines, or an alert when the
//! summary cannot be computed.

use crate::analysis::{summarize, SummaryCounts};
use crate::models::{Strategy, SummaryModel, Tally};
use serde::Serialize;

/// User-facing alert texts.
pub mod messages {
    pub const MISSING_REPORT: &str = "The report for this summary could not be found.";
    pub const MISSING_BUCKET_BY_FIELD: &str =
        "The field used to group this summary does not exist on report";
}

/// Alert shown when the bucket field is missing from the dictionary or report.
pub fn missing_bucket_by_field_error(report_title: &str) -> String {
    format!("{} \"{}\".", messages::MISSING_BUCKET_BY_FIELD, report_title)
}

/// Display-ready summary.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryCard {
    pub id: String,
    pub title: String,
    pub strategy: Strategy,
    /// Set when the summary cannot be computed; metadata and counts are empty then.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert: Option<String>,
    pub metadata: Vec<String>,
    pub tallies: Vec<Tally>,
    pub has_missing_value: bool,
}

impl SummaryCard {
    /// Build a card from a processed summary.
    pub fn from_model(model: &SummaryModel) -> Self {
        let mut card = Self {
            id: model.id.clone(),
            title: model.title.clone(),
            strategy: model.strategy,
            alert: None,
            metadata: Vec::new(),
            tallies: Vec::new(),
            has_missing_value: false,
        };

        if let Some(alert) = alert_for(model) {
            card.alert = Some(alert);
            return card;
        }

        card.metadata.push(format!("Total Count: {}", model.total_records));
        if let Some(ref report_title) = model.report_title {
            card.metadata.push(format!("Report Name: {}", report_title));
        }

        if model.strategy == Strategy::Itemized {
            if let Some(ref label) = model.bucket_by_label {
                card.metadata.push(format!("Grouped By: {}", label));
            }
        }

        if let SummaryCounts::Itemized {
            tallies,
            has_missing_value,
            ..
        } = summarize(&model.data, model.strategy)
        {
            card.tallies = tallies;
            card.has_missing_value = has_missing_value;
        }

        card
    }

    /// Count lines in ranking order, formatted as `<count> - <label>`.
    pub fn count_lines(&self) -> Vec<String> {
        self.tallies
            .iter()
            .map(|t| format!("{} - {}", t.count, t.label))
            .collect()
    }

    pub fn has_alert(&self) -> bool {
        self.alert.is_some()
    }
}

fn alert_for(model: &SummaryModel) -> Option<String> {
    if !model.report_exists {
        return Some(messages::MISSING_REPORT.to_string());
    }

    if model.strategy == Strategy::Itemized && !model.can_itemize() {
        let report_title = model.report_title.as_deref().unwrap_or_default();
        return Some(missing_bucket_by_field_error(report_title));
    }

    None
}
