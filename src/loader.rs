//! Report export loading.
//!
//! A report file is either a full `ReportData` object or a bare array of
//! records. When the file carries no id, the report id is taken from the
//! file stem.

use crate::errors::{read_input, ReportCountsError, Result};
use crate::models::{Record, ReportData};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Deserialize)]
#[serde(untagged)]
enum ReportFile {
    Report(ReportData),
    Records(Vec<Record>),
}

/// Load one report export.
pub fn load_report(path: &Path) -> Result<ReportData> {
    let content = read_input(path)?;
    parse_report(&content, path)
}

fn parse_report(content: &str, path: &Path) -> Result<ReportData> {
    let parsed: ReportFile =
        serde_json::from_str(content).map_err(|source| ReportCountsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    let mut report = match parsed {
        ReportFile::Report(report) => report,
        ReportFile::Records(records) => ReportData {
            records,
            ..Default::default()
        },
    };

    if report.id.is_empty() {
        report.id = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
    }
    if report.title.is_empty() {
        report.title = report.id.clone();
    }

    debug!(
        "Loaded report '{}' from {} ({} records)",
        report.id,
        path.display(),
        report.records.len()
    );

    Ok(report)
}

/// Reports indexed by id.
#[derive(Debug, Default)]
pub struct ReportSet {
    reports: HashMap<String, ReportData>,
}

impl ReportSet {
    /// Load every given file. Later files replace earlier ones with the same id.
    pub fn load(paths: &[PathBuf]) -> Result<Self> {
        let mut set = Self::default();
        for path in paths {
            set.insert(load_report(path)?);
        }
        Ok(set)
    }

    pub fn insert(&mut self, report: ReportData) {
        if let Some(previous) = self.reports.insert(report.id.clone(), report) {
            warn!("Report '{}' was loaded more than once; using the last file", previous.id);
        }
    }

    pub fn get(&self, id: &str) -> Option<&ReportData> {
        self.reports.get(id)
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }
}
