//! Cluster health and readiness endpoints.

use axum::{extract::State, http::StatusCode, Json};
use registry_common::HealthReport;

use crate::context::RequestContext;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /v4/:project/registry/health - Cluster health report
pub async fn cluster_health(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Result<Json<HealthReport>, ApiError> {
    let report = state.endpoint().cluster_health(&ctx).await?;
    Ok(Json(report))
}

/// GET /v4/:project/registry/health/readiness - Empty 200 when ready
pub async fn readiness(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Result<StatusCode, ApiError> {
    state.endpoint().readiness(&ctx).await?;
    Ok(StatusCode::OK)
}
