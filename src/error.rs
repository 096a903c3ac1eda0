//! Error types for the route planning pipeline.

use thiserror::Error;

/// Failures surfaced at the library boundary.
///
/// Data-shape problems inside individual records never show up here; those
/// are skipped and counted. Only contract violations by the caller and
/// writer/IO failures are reported as errors.
#[derive(Error, Debug)]
pub enum PlanError {
    /// The payload is not JSON, or its record list is not an array.
    /// Retrying without fixing the upstream call will not help.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("no cluster matches {0:?}")]
    UnknownCluster(String),

    #[error("export failed: {0}")]
    Export(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl From<rust_xlsxwriter::XlsxError> for PlanError {
    fn from(e: rust_xlsxwriter::XlsxError) -> Self {
        PlanError::Export(e.to_string())
    }
}

pub type PlanResult<T> = Result<T, PlanError>;
