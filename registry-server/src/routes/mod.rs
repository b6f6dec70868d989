//! HTTP route handlers and the route table they are registered from.

pub mod health;
pub mod version;

use axum::{
    handler::Handler,
    http::Method,
    routing::{self, MethodRouter},
    Router,
};

use crate::state::AppState;

pub use health::{cluster_health, readiness};
pub use version::get_version;

/// One entry of a route table
pub struct Route {
    pub method: Method,
    pub path: &'static str,
    pub handler: MethodRouter<AppState>,
}

impl Route {
    /// `GET path` served by `handler`
    pub fn get<H, T>(path: &'static str, handler: H) -> Self
    where
        H: Handler<T, AppState>,
        T: 'static,
    {
        Self {
            method: Method::GET,
            path,
            handler: routing::get(handler),
        }
    }
}

/// Register every route of `routes` on `router`, in order
pub fn mount(router: Router<AppState>, routes: Vec<Route>) -> Router<AppState> {
    routes.into_iter().fold(router, |router, route| {
        tracing::debug!("Registering {} {}", route.method, route.path);
        router.route(route.path, route.handler)
    })
}
