//! Translation of service errors into HTTP responses.
//!
//! Errors are translated once, here, into a status code and a JSON
//! [`ErrorBody`]. The status comes from [`status_for`], a pure table keyed by
//! [`ErrorKind`].

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use registry_common::{ErrorBody, ErrorKind, ServiceError};
use tracing::{debug, error, warn};

/// Nginx's non-standard "client closed request" status
const CLIENT_CLOSED_REQUEST: u16 = 499;

/// HTTP status an error of `kind` is reported with
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::InvalidParams => StatusCode::BAD_REQUEST,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Cancelled => {
            StatusCode::from_u16(CLIENT_CLOSED_REQUEST).unwrap_or(StatusCode::REQUEST_TIMEOUT)
        }
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        ErrorKind::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorKind::Timeout => StatusCode::GATEWAY_TIMEOUT,
    }
}

/// Error returned by the endpoint handlers
#[derive(Debug)]
pub struct ApiError(pub ServiceError);

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status = status_for(err.kind);

        match err.kind {
            ErrorKind::Cancelled => debug!("Request ended early: {}", err),
            _ if status.is_server_error() => error!("Request failed with {}: {}", status, err),
            _ => warn!("Request failed with {}: {}", status, err),
        }

        (status, Json(ErrorBody::from(&err))).into_response()
    }
}
