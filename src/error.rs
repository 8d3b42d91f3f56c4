//! Error types for localepack
//!
//! Uses `thiserror` for library errors. Failures during the one-shot build
//! pass propagate to the caller; the incremental updater catches them and
//! reports through its outcome type instead.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for localepack operations
pub type CollectorResult<T> = Result<T, CollectorError>;

/// Main error type for localepack operations
#[derive(Error, Debug)]
pub enum CollectorError {
    /// Lookup root does not exist or is not a directory
    #[error("lookup directory not found: {path}")]
    LookupDirNotFound { path: PathBuf },

    /// Directory could not be listed or an entry could not be stat'ed
    #[error("cannot read directory {path}: {source}")]
    Discovery {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Fragment content is not a valid JSON object
    #[error("invalid JSON in {file}: {source}")]
    Parse {
        file: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Output directory could not be created or output file could not be written
    #[error("cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file could not be parsed
    #[error("invalid config in {file}: {message}")]
    Config { file: PathBuf, message: String },

    /// Configuration is structurally invalid
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_error_display_lookup_dir_not_found() {
        let err = CollectorError::LookupDirNotFound {
            path: PathBuf::from("src/locales"),
        };
        assert_eq!(err.to_string(), "lookup directory not found: src/locales");
    }

    #[test]
    fn test_error_display_invalid_config() {
        let err = CollectorError::InvalidConfig {
            message: "at least one language must be configured".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid configuration: at least one language must be configured"
        );
    }

    #[test]
    fn test_error_display_parse_names_file() {
        let bad = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = CollectorError::Parse {
            file: PathBuf::from("locales/en.json"),
            source: bad,
        };
        assert!(err.to_string().starts_with("invalid JSON in locales/en.json"));
    }
}
