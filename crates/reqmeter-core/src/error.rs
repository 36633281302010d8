//! Shared error type across reqmeter crates.

use thiserror::Error;

/// Stable error kinds (used as structured log fields and in tests).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A metric with the same name is already registered.
    DuplicateMetricName,
    /// Label value count differs from the metric's label names.
    LabelArityMismatch,
    /// Negative or non-finite counter delta.
    InvalidDelta,
    /// Non-finite gauge or histogram value.
    InvalidValue,
    /// Malformed metric definition.
    InvalidDefinition,
    /// Exposition text could not be produced.
    SnapshotFailure,
    /// Invalid or unreadable configuration.
    Config,
    /// Internal error.
    Internal,
}

impl ErrorKind {
    /// String representation used in logs and error bodies.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::DuplicateMetricName => "DUPLICATE_METRIC_NAME",
            ErrorKind::LabelArityMismatch => "LABEL_ARITY_MISMATCH",
            ErrorKind::InvalidDelta => "INVALID_DELTA",
            ErrorKind::InvalidValue => "INVALID_VALUE",
            ErrorKind::InvalidDefinition => "INVALID_DEFINITION",
            ErrorKind::SnapshotFailure => "SNAPSHOT_FAILURE",
            ErrorKind::Config => "CONFIG",
            ErrorKind::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, ReqMeterError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Error)]
pub enum ReqMeterError {
    #[error("duplicate metric name: {0}")]
    DuplicateMetricName(String),
    #[error("label arity mismatch on {metric}: expected {expected}, got {got}")]
    LabelArityMismatch {
        metric: String,
        expected: usize,
        got: usize,
    },
    #[error("invalid delta on {metric}: {delta}")]
    InvalidDelta { metric: String, delta: f64 },
    #[error("invalid value on {metric}: {value}")]
    InvalidValue { metric: String, value: f64 },
    #[error("invalid metric definition: {0}")]
    InvalidDefinition(String),
    #[error("snapshot failed: {0}")]
    SnapshotFailure(String),
    #[error("config: {0}")]
    Config(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl ReqMeterError {
    /// Map the error to its stable kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ReqMeterError::DuplicateMetricName(_) => ErrorKind::DuplicateMetricName,
            ReqMeterError::LabelArityMismatch { .. } => ErrorKind::LabelArityMismatch,
            ReqMeterError::InvalidDelta { .. } => ErrorKind::InvalidDelta,
            ReqMeterError::InvalidValue { .. } => ErrorKind::InvalidValue,
            ReqMeterError::InvalidDefinition(_) => ErrorKind::InvalidDefinition,
            ReqMeterError::SnapshotFailure(_) => ErrorKind::SnapshotFailure,
            ReqMeterError::Config(_) => ErrorKind::Config,
            ReqMeterError::Internal(_) => ErrorKind::Internal,
        }
    }
}
