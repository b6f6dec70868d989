//! Version endpoint.

use axum::{
    extract::State,
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
};

use crate::error::ApiError;
use crate::state::AppState;

/// GET /v4/:project/registry/version - Build metadata plus API version
pub async fn get_version(State(state): State<AppState>) -> Result<Response, ApiError> {
    let body = state.endpoint().version()?;
    Ok((
        [(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        )],
        body,
    )
        .into_response())
}
