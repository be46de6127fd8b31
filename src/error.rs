//! Error handling

use thiserror::Error;

pub type AnalysisResult<T> = Result<T, AnalysisError>;

#[derive(Debug, Error)]
pub enum AnalysisError {
    // I/O errors
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    // Input shape errors
    #[error("missing column '{0}'")]
    MissingColumn(String),

    #[error("cannot parse timestamp '{0}'")]
    InvalidTimestamp(String),

    #[error("value '{value}' not in vocabulary of '{field}'")]
    UnknownCategory { field: String, value: String },

    #[error("matrix has {got} columns, scaler was fitted on {expected}")]
    ShapeMismatch { expected: usize, got: usize },

    // Validation errors
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("severity_value must be between {min} and {max}, got {value}")]
    SeverityOutOfRange { value: f64, min: f64, max: f64 },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AnalysisError {
    pub fn io(path: impl AsRef<std::path::Path>, source: std::io::Error) -> Self {
        AnalysisError::Io {
            path: path.as_ref().display().to_string(),
            source,
        }
    }

    pub fn csv(path: impl AsRef<std::path::Path>, source: csv::Error) -> Self {
        AnalysisError::Csv {
            path: path.as_ref().display().to_string(),
            source,
        }
    }
}
