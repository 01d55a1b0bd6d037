//! Summary presentation.

pub mod card;
pub mod generator;

pub use card::SummaryCard;
pub use generator::{generate_json_report, generate_markdown_report, CountsReport, ReportMetadata};
