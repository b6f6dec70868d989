//! registry-server: operational endpoints of the registry
//!
//! Serves three read-only endpoints:
//! - `GET /v4/:project/registry/version` - build metadata plus API version,
//!   serialized once and cached
//! - `GET /v4/:project/registry/health` - cluster health report
//! - `GET /v4/:project/registry/health/readiness` - readiness probe

pub mod cache;
pub mod checks;
pub mod config;
pub mod context;
pub mod endpoint;
pub mod error;
pub mod routes;
pub mod state;

use axum::{
    http::{header, HeaderValue},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

pub use config::{Config, ConfigError};
pub use context::RequestContext;
pub use endpoint::RegistryEndpoint;
pub use error::ApiError;
pub use state::AppState;

/// Build the application router with all routes
pub fn build_router(state: AppState) -> Router {
    routes::mount(Router::new(), RegistryEndpoint::url_patterns())
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-cache"),
        ))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
