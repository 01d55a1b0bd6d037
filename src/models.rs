//! Data models for report summaries.
//!
//! This module contains the core data structures used throughout
//! the application for representing summary configurations, report
//! exports, tallies and processed summaries.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::fmt;

/// Display text used for null, empty and whitespace-only values.
pub const MISSING: &str = "[missing]";

/// A single record's value for the bucketed field.
pub type RawValue = Option<String>;

/// One exported report record, keyed by field name.
pub type Record = Map<String, Value>;

/// How a summary counts the records of its report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Only the total number of records.
    #[default]
    Total,
    /// Counts grouped by the value of a bucket field.
    Itemized,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Total => write!(f, "total"),
            Strategy::Itemized => write!(f, "itemized"),
        }
    }
}

/// A normalized bucket label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Label {
    /// A non-blank value, already trimmed.
    Value(String),
    /// Null, empty or whitespace-only value.
    Missing,
}

impl Label {
    /// Normalize a raw value into a label.
    ///
    /// Surrounding whitespace is trimmed; anything left empty becomes
    /// [`Label::Missing`]. Case and inner whitespace are kept as-is.
    pub fn normalize(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(trimmed) if !trimmed.is_empty() => Label::Value(trimmed.to_string()),
            _ => Label::Missing,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Label::Missing)
    }

    /// Text shown for this label.
    pub fn as_str(&self) -> &str {
        match self {
            Label::Value(s) => s,
            Label::Missing => MISSING,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Label {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A (label, count) pair produced by aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tally {
    /// Normalized label.
    pub label: Label,
    /// Number of occurrences (always at least 1).
    pub count: usize,
}

impl Tally {
    pub fn new(label: Label, count: usize) -> Self {
        Self { label, count }
    }

    /// Ranking order: missing last, then count descending, then label ascending.
    pub fn rank(&self, other: &Self) -> Ordering {
        self.label
            .is_missing()
            .cmp(&other.label.is_missing())
            .then_with(|| other.count.cmp(&self.count))
            .then_with(|| self.label.as_str().cmp(other.label.as_str()))
    }
}

/// One configured summary, as written in the config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryConfig {
    /// Unique summary identifier.
    pub id: String,
    /// Identifier of the report the summary counts.
    #[serde(alias = "reportId", deserialize_with = "deserialize_id")]
    pub report_id: String,
    /// Title shown on the summary card.
    pub title: String,
    /// Counting strategy.
    #[serde(default)]
    pub strategy: Strategy,
    /// Field whose values are grouped. Ignored for [`Strategy::Total`].
    #[serde(default, alias = "bucketBy", skip_serializing_if = "Option::is_none")]
    pub bucket_by: Option<String>,
}

/// One exported report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportData {
    /// Report identifier. Empty when the export does not carry one.
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: String,
    /// Human-readable report title.
    #[serde(default)]
    pub title: String,
    /// Records as returned by the export.
    #[serde(default)]
    pub records: Vec<Record>,
}

impl ReportData {
    /// Returns true if any record carries the given column.
    pub fn has_column(&self, field: &str) -> bool {
        self.records.iter().any(|r| r.contains_key(field))
    }

    /// Extract one column as raw values, one per record.
    pub fn column(&self, field: &str) -> Vec<RawValue> {
        self.records
            .iter()
            .map(|r| r.get(field).and_then(raw_value))
            .collect()
    }
}

/// Report ids are integers in REDCap but may be quoted in hand-written files.
#[derive(Deserialize)]
#[serde(untagged)]
enum ReportId {
    Text(String),
    Number(i64),
}

fn deserialize_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match ReportId::deserialize(deserializer)? {
        ReportId::Text(s) => s,
        ReportId::Number(n) => n.to_string(),
    })
}

/// Convert an exported JSON value into a raw value.
///
/// Strings pass through untouched; numbers and booleans are stringified.
fn raw_value(value: &Value) -> RawValue {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

/// A summary after validation against its report and the data dictionary.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SummaryModel {
    pub id: String,
    pub title: String,
    /// Title of the underlying report, if it was found.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_title: Option<String>,
    pub strategy: Strategy,
    pub total_records: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bucket_by: Option<String>,
    /// Dictionary label of the bucket field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bucket_by_label: Option<String>,
    pub bucket_by_field_exists: bool,
    pub bucket_by_exists_on_report: bool,
    pub report_exists: bool,
    /// Bucket column values, one per record. Empty for total summaries.
    #[serde(skip)]
    pub data: Vec<RawValue>,
}

impl SummaryModel {
    /// Returns true when itemized counts can be computed from this model.
    pub fn can_itemize(&self) -> bool {
        self.strategy == Strategy::Itemized
            && self.report_exists
            && self.bucket_by_field_exists
            && self.bucket_by_exists_on_report
    }
}
