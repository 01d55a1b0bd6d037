use std::path::{Path, PathBuf};
use thiserror::Error;

/// report-counts error types
#[derive(Error, Debug)]
pub enum ReportCountsError {
    /// Failed to read an input file
    #[error("io error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse a JSON input file
    #[error("parse error in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),

    /// A summary id was requested that is not configured
    #[error("no summary configured with id '{0}'")]
    UnknownSummary(String),
}

/// Result type alias for report-counts
pub type Result<T> = std::result::Result<T, ReportCountsError>;

/// Read a whole input file, keeping its path in the error.
pub fn read_input(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| ReportCountsError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ReportCountsError::UnknownSummary("abc".into());
        assert_eq!(err.to_string(), "no summary configured with id 'abc'");

        let err = ReportCountsError::Config("duplicate summary id".into());
        assert_eq!(err.to_string(), "config error: duplicate summary id");
    }

    #[test]
    fn test_io_error_names_file() {
        let err = ReportCountsError::Io {
            path: PathBuf::from("reports/42.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
        };
        assert_eq!(
            err.to_string(),
            "io error reading reports/42.json: file not found"
        );
    }

    #[test]
    fn test_parse_error_names_file() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ReportCountsError::Parse {
            path: PathBuf::from("report.json"),
            source,
        };
        assert!(err.to_string().starts_with("parse error in report.json"));
    }
}
