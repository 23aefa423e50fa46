//! Error types used throughout the client

use std::fmt;

use thiserror::Error;

use crate::types::{ErrorBody, ErrorDetail};

/// Main error type for API Management operations
#[derive(Error, Debug)]
pub enum ApiManagementError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Identifier too long: {length} characters (maximum is {max})")]
    IdentifierTooLong { length: usize, max: usize },

    #[error("Malformed connection string: {0}")]
    MalformedConnectionString(String),

    #[error("{0}")]
    RequestFailed(RequestFailure),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Coarse classification of [`ApiManagementError`] for callers and logs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Caller supplied an unusable value; fix the input
    Argument,
    /// Descriptor or configuration could not be used
    Configuration,
    /// Transport or codec failure before a service verdict
    Transport,
    /// The service answered with a non-success status
    Service,
}

impl ApiManagementError {
    /// Get the category for this error
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidArgument(_) | Self::IdentifierTooLong { .. } => ErrorCategory::Argument,
            Self::MalformedConnectionString(_) | Self::Config(_) => ErrorCategory::Configuration,
            Self::Network(_) | Self::Serialization(_) => ErrorCategory::Transport,
            Self::RequestFailed(_) => ErrorCategory::Service,
        }
    }

    /// HTTP status of a service failure, if this is one
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RequestFailed(failure) => Some(failure.status()),
            _ => None,
        }
    }

    /// Structured service failure, if this is one
    pub fn request_failure(&self) -> Option<&RequestFailure> {
        match self {
            Self::RequestFailed(failure) => Some(failure),
            _ => None,
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}

/// Result type alias for API Management operations
pub type Result<T> = std::result::Result<T, ApiManagementError>;

/// A non-success response translated into an inspectable failure.
///
/// The rendered message is either `{code}: {message}` taken from the
/// service error envelope, or `HTTP-{status}: {status phrase} ({reason})`
/// when the body carried no envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestFailure {
    status: u16,
    status_phrase: String,
    reason_phrase: String,
    message: String,
    error: Option<ErrorBody>,
}

impl RequestFailure {
    /// Failure with the status-derived default message and no details
    pub fn new(
        status: u16,
        status_phrase: impl Into<String>,
        reason_phrase: impl Into<String>,
    ) -> Self {
        let status_phrase = status_phrase.into();
        let reason_phrase = reason_phrase.into();
        let message = format!("HTTP-{status}: {status_phrase} ({reason_phrase})");
        Self { status, status_phrase, reason_phrase, message, error: None }
    }

    /// Attach the service error envelope, replacing the default message
    #[must_use]
    pub fn with_error(mut self, error: ErrorBody) -> Self {
        self.message = format!("{}: {}", error.code, error.message);
        self.error = Some(error);
        self
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn status_phrase(&self) -> &str {
        &self.status_phrase
    }

    pub fn reason_phrase(&self) -> &str {
        &self.reason_phrase
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn error(&self) -> Option<&ErrorBody> {
        self.error.as_ref()
    }

    /// Service error code, when the body carried an error envelope
    pub fn code(&self) -> Option<&str> {
        self.error.as_ref().map(|e| e.code.as_str())
    }

    /// Structured details; empty when the body carried none
    pub fn details(&self) -> &[ErrorDetail] {
        self.error.as_ref().map(|e| e.details.as_slice()).unwrap_or_default()
    }

    /// Stale `If-Match` token
    pub fn is_precondition_failed(&self) -> bool {
        self.status == 412
    }

    pub fn is_conflict(&self) -> bool {
        self.status == 409
    }
}

impl fmt::Display for RequestFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl From<RequestFailure> for ApiManagementError {
    fn from(value: RequestFailure) -> Self {
        Self::RequestFailed(value)
    }
}

impl From<serde_json::Error> for ApiManagementError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
