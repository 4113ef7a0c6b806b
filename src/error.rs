//! Error types

use std::path::PathBuf;

use thiserror::Error;

/// Failures of the prediction model collaborator
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model has no target named '{0}'")]
    UnknownTarget(String),

    #[error("target '{target}' expects {expected} features, got {actual}")]
    DimensionMismatch {
        target: String,
        expected: usize,
        actual: usize,
    },

    #[error("target '{target}' has a zero scale for feature {index}")]
    InvalidScale { target: String, index: usize },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Failure of a whole analysis; no partial plan is ever returned
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("model invocation failed for target '{target}'")]
    ModelInvocation {
        target: String,
        #[source]
        source: ModelError,
    },

    #[error("feature vector has {actual} values but the configuration names {expected}")]
    FeatureMismatch { expected: usize, actual: usize },
}

/// Rejected soil sample input
#[derive(Debug, Error, PartialEq)]
pub enum SampleError {
    #[error("{field} = {value} is outside the accepted range {min}..={max}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}
