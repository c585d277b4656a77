use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while geotagging frame manifests
#[derive(Debug, Error)]
pub enum GeotagError {
    /// Malformed input document, line or timestamp
    #[error("Parse error: {0}")]
    Parse(String),
    /// Required field, marker or file is missing
    #[error("Not found: {0}")]
    NotFound(String),
    /// Association attempted against a position track with no samples
    #[error("Position track is empty, no fix can be matched")]
    EmptyTrack,
    /// Centroid requested for zero records
    #[error("Cannot compute a centroid of zero locations")]
    EmptyInput,
    /// Centroid record without usable coordinates
    #[error("Schema error: {0}")]
    Schema(String),
    /// Storage boundary failure, tagged with the offending path
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// GeoJSON serialization failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// CSV write failure
    #[cfg(feature = "csv")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    /// Invalid discovery pattern
    #[error("Invalid file pattern: {0}")]
    Glob(String),
}

impl GeotagError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GeotagError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<glob::PatternError> for GeotagError {
    fn from(err: glob::PatternError) -> Self {
        GeotagError::Glob(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GeotagError>;
