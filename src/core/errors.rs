//! Domain-specific error types for the ticket router using thiserror
//!
//! Upstream failures (backend store, inference provider) are kept distinct from
//! content failures so callers can decide what is worth retrying.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for routing and evaluation operations
#[derive(Error, Debug)]
pub enum RouterError {
    #[error("Validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("{service} unavailable: {reason}")]
    UpstreamUnavailable {
        service: String,
        reason: String,
        timed_out: bool,
    },

    #[error("Malformed inference output for {context}: {reason}")]
    MalformedInferenceOutput {
        context: String,
        reason: String,
        raw: String,
    },

    /// The upstream answered, but with a body that does not decode.
    #[error("{service} sent an unreadable response: {reason}")]
    MalformedResponse { service: String, reason: String },

    #[error("{kind} not found: {id}")]
    NotFound { kind: String, id: String },

    #[error("Configuration error")]
    Config(#[from] ConfigError),

    #[error("I/O failed during {operation}")]
    Io {
        operation: String,
        #[source]
        source: io::Error,
    },
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration value for {field}: {value} - {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration file not found: {}", .path.display())]
    FileNotFound { path: PathBuf },

    #[error("Configuration parsing failed in {}: {reason}", .path.display())]
    Parse { path: PathBuf, reason: String },

    #[error("Configuration serialization failed: {reason}")]
    Serialize { reason: String },
}

/// Result type alias for router operations
pub type RouterResult<T> = Result<T, RouterError>;

impl RouterError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn not_found(kind: impl Into<String>, id: impl ToString) -> Self {
        Self::NotFound {
            kind: kind.into(),
            id: id.to_string(),
        }
    }

    pub fn malformed(
        context: impl Into<String>,
        reason: impl Into<String>,
        raw: impl Into<String>,
    ) -> Self {
        Self::MalformedInferenceOutput {
            context: context.into(),
            reason: reason.into(),
            raw: raw.into(),
        }
    }

    pub fn upstream(service: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UpstreamUnavailable {
            service: service.into(),
            reason: reason.into(),
            timed_out: false,
        }
    }

    /// Map a transport failure, keeping whether it was a timeout.
    pub fn from_http(service: impl Into<String>, err: &reqwest::Error) -> Self {
        Self::UpstreamUnavailable {
            service: service.into(),
            reason: err.to_string(),
            timed_out: err.is_timeout(),
        }
    }

    pub fn malformed_response(service: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            service: service.into(),
            reason: reason.into(),
        }
    }

    pub fn io(operation: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            operation: operation.into(),
            source,
        }
    }

    /// Only upstream outages are worth retrying; everything else fails the same way twice.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::UpstreamUnavailable { .. })
    }

    /// Short machine-readable kind, used in structured results.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation_error",
            Self::UpstreamUnavailable { .. } => "upstream_unavailable",
            Self::MalformedInferenceOutput { .. } => "malformed_inference_output",
            Self::MalformedResponse { .. } => "malformed_response",
            Self::NotFound { .. } => "not_found",
            Self::Config(_) => "config_error",
            Self::Io { .. } => "io_error",
        }
    }
}
