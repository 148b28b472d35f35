//! Shared error type across rtprobe crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Requested counter is not in the registry.
    UnknownMetric,
    /// Counter declares a kind that cannot be converted.
    UnsupportedKind,
    /// Sampled value kind disagrees with the declared kind.
    KindDrift,
    /// Invalid input / malformed request or configuration.
    BadRequest,
    /// Request exceeded its deadline.
    Timeout,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::UnknownMetric => "UNKNOWN_METRIC",
            ClientCode::UnsupportedKind => "UNSUPPORTED_KIND",
            ClientCode::KindDrift => "KIND_DRIFT",
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::Timeout => "TIMEOUT",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, ProbeError>;

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("unknown metric {0}")]
    UnknownMetric(String),
    #[error("unsupported metric type ({kind}) for requested metric {name}")]
    UnsupportedKind { name: String, kind: &'static str },
    #[error("unknown metric value {sampled} after read from metrics {name}")]
    KindDrift { name: String, sampled: &'static str },
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("request timed out")]
    Timeout,
    #[error("internal: {0}")]
    Internal(String),
}

impl ProbeError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            ProbeError::UnknownMetric(_) => ClientCode::UnknownMetric,
            ProbeError::UnsupportedKind { .. } => ClientCode::UnsupportedKind,
            ProbeError::KindDrift { .. } => ClientCode::KindDrift,
            ProbeError::BadRequest(_) => ClientCode::BadRequest,
            ProbeError::Timeout => ClientCode::Timeout,
            ProbeError::Internal(_) => ClientCode::Internal,
        }
    }

    /// True for broken invariants (engine or registry defects), false for
    /// errors caused by what the caller asked for.
    pub fn is_defect(&self) -> bool {
        matches!(self, ProbeError::KindDrift { .. } | ProbeError::Internal(_))
    }
}
