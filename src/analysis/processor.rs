//! Summary validation and data extraction.
//!
//! Combines a summary configuration with its report export and the data
//! dictionary, producing a [`SummaryModel`] that the presentation layer
//! can render without further lookups.

use crate::dictionary::DataDictionary;
use crate::models::{ReportData, Strategy, SummaryConfig, SummaryModel};
use tracing::{debug, warn};

/// Builds the processed model for one summary.
pub struct SummaryProcessor<'a> {
    config: &'a SummaryConfig,
    report: Option<&'a ReportData>,
    dictionary: &'a DataDictionary,
}

impl<'a> SummaryProcessor<'a> {
    /// Create a processor. `report` is `None` when no export matches the
    /// summary's report id.
    pub fn new(
        config: &'a SummaryConfig,
        report: Option<&'a ReportData>,
        dictionary: &'a DataDictionary,
    ) -> Self {
        Self {
            config,
            report,
            dictionary,
        }
    }

    /// Produce the processed summary model.
    pub fn summary_model(&self) -> SummaryModel {
        let mut model = SummaryModel {
            id: self.config.id.clone(),
            title: self.config.title.clone(),
            strategy: self.config.strategy,
            ..Default::default()
        };

        let Some(report) = self.report else {
            warn!(
                "Summary '{}' refers to report '{}' which was not found",
                self.config.id, self.config.report_id
            );
            return model;
        };

        model.report_exists = true;
        model.report_title = Some(report.title.clone()).filter(|t| !t.is_empty());
        model.total_records = report.records.len();

        if self.config.strategy == Strategy::Itemized {
            self.fill_bucket(report, &mut model);
        }

        debug!(
            "Processed summary '{}': {} records, strategy {}",
            model.id, model.total_records, model.strategy
        );

        model
    }

    fn fill_bucket(&self, report: &ReportData, model: &mut SummaryModel) {
        let Some(field) = self
            .config
            .bucket_by
            .as_deref()
            .filter(|f| !f.trim().is_empty())
        else {
            warn!("Itemized summary '{}' has no bucket field", self.config.id);
            return;
        };

        model.bucket_by = Some(field.to_string());
        model.bucket_by_field_exists = self.dictionary.field_exists(field);
        model.bucket_by_label = Some(
            self.dictionary
                .field_label(field)
                .unwrap_or(field)
                .to_string(),
        );

        // An empty export cannot show the column, so trust the dictionary.
        model.bucket_by_exists_on_report = if report.records.is_empty() {
            model.bucket_by_field_exists
        } else {
            report.has_column(field)
        };

        if !model.bucket_by_field_exists {
            warn!(
                "Bucket field '{}' of summary '{}' is not in the data dictionary",
                field, self.config.id
            );
        } else if !model.bucket_by_exists_on_report {
            warn!(
                "Bucket field '{}' of summary '{}' is not on report '{}'",
                field, self.config.id, report.id
            );
        }

        if model.bucket_by_exists_on_report {
            model.data = report.column(field);
        }
    }
}
