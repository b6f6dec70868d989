//! Service error taxonomy shared by the endpoints and their collaborators.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Kind of a service error; decides the HTTP status it is reported with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Caller supplied something unusable
    InvalidParams,

    /// The requested resource does not exist
    NotFound,

    /// The caller went away before the work finished
    Cancelled,

    /// Unexpected failure inside the registry
    Internal,

    /// A backend the check depends on is not available
    Unavailable,

    /// The request deadline passed
    Timeout,
}

impl ErrorKind {
    /// Numeric service error code reported in error bodies
    pub fn code(&self) -> u32 {
        match self {
            ErrorKind::InvalidParams => 400001,
            ErrorKind::NotFound => 400002,
            ErrorKind::Cancelled => 499001,
            ErrorKind::Internal => 500003,
            ErrorKind::Unavailable => 503001,
            ErrorKind::Timeout => 504001,
        }
    }

    /// Convert to string for logging
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidParams => "invalid_params",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Cancelled => "cancelled",
            ErrorKind::Internal => "internal",
            ErrorKind::Unavailable => "unavailable",
            ErrorKind::Timeout => "timeout",
        }
    }
}

/// Error returned by the health and readiness subsystems
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}: {message}", .kind.as_str())]
pub struct ServiceError {
    pub kind: ErrorKind,
    pub message: String,
    pub detail: Option<String>,
}

impl ServiceError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            detail: None,
        }
    }

    /// Attach a detail string shown to the caller next to the message
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unavailable, message)
    }

    pub fn cancelled() -> Self {
        Self::new(ErrorKind::Cancelled, "request cancelled")
    }

    pub fn timeout() -> Self {
        Self::new(ErrorKind::Timeout, "request deadline exceeded")
    }
}

/// JSON body written for a failed request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub error_code: u32,
    pub error_message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl From<&ServiceError> for ErrorBody {
    fn from(err: &ServiceError) -> Self {
        Self {
            error_code: err.kind.code(),
            error_message: err.message.clone(),
            detail: err.detail.clone(),
        }
    }
}
