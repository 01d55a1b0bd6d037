//! Data dictionary lookups.
//!
//! The dictionary is the project's field metadata as exported by REDCap
//! (`getDataDictionary('array')`): a JSON object keyed by field name.

use crate::errors::{read_input, ReportCountsError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Metadata for a single field. Extra export columns are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMetadata {
    pub field_name: String,
    #[serde(default)]
    pub form_name: String,
    #[serde(default)]
    pub field_label: String,
}

/// Field metadata keyed by field name.
#[derive(Debug, Clone, Default)]
pub struct DataDictionary {
    fields: HashMap<String, FieldMetadata>,
}

impl DataDictionary {
    pub fn new(fields: HashMap<String, FieldMetadata>) -> Self {
        Self { fields }
    }

    /// Parse a dictionary export.
    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        let fields: HashMap<String, FieldMetadata> = serde_json::from_str(content)?;
        Ok(Self::new(fields))
    }

    /// Load a dictionary export from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let content = read_input(path)?;
        Self::from_json(&content).map_err(|source| ReportCountsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn field_exists(&self, field_name: &str) -> bool {
        self.fields.contains_key(field_name)
    }

    /// Label of a field, if the field exists and has a non-empty label.
    pub fn field_label(&self, field_name: &str) -> Option<&str> {
        self.fields
            .get(field_name)
            .map(|f| f.field_label.as_str())
            .filter(|label| !label.trim().is_empty())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
