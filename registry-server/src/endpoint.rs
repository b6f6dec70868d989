//! The registry's operational endpoint group: version, cluster health and
//! readiness.

use std::sync::Arc;

use axum::body::Bytes;
use registry_common::{HealthReport, ServiceError};
use tracing::{debug, error};

use crate::cache::VersionCache;
use crate::checks::{ClusterHealthChecker, ReadinessChecker, VersionSource};
use crate::context::RequestContext;
use crate::routes::{self, Route};

/// Version, cluster health and readiness operations
pub struct RegistryEndpoint {
    version_cache: VersionCache,
    version_source: Arc<dyn VersionSource>,
    health: Arc<dyn ClusterHealthChecker>,
    readiness: Arc<dyn ReadinessChecker>,
}

impl RegistryEndpoint {
    /// Create an endpoint with an empty version cache
    pub fn new(
        version_source: Arc<dyn VersionSource>,
        health: Arc<dyn ClusterHealthChecker>,
        readiness: Arc<dyn ReadinessChecker>,
    ) -> Self {
        Self {
            version_cache: VersionCache::new(),
            version_source,
            health,
            readiness,
        }
    }

    /// Route table of the endpoint group, in registration order.
    ///
    /// `:project` is matched by the router but never read.
    pub fn url_patterns() -> Vec<Route> {
        vec![
            Route::get("/v4/:project/registry/version", routes::get_version),
            Route::get("/v4/:project/registry/health", routes::cluster_health),
            Route::get("/v4/:project/registry/health/readiness", routes::readiness),
        ]
    }

    pub fn version_cache(&self) -> &VersionCache {
        &self.version_cache
    }

    /// Serialized version payload; serialized on first use only
    pub fn version(&self) -> Result<Bytes, ServiceError> {
        self.version_cache
            .version_json(self.version_source.as_ref())
            .map_err(|e| {
                error!("Failed to serialize version payload: {}", e);
                ServiceError::internal("failed to serialize version").with_detail(e.to_string())
            })
    }

    pub async fn cluster_health(&self, ctx: &RequestContext) -> Result<HealthReport, ServiceError> {
        debug!("Checking cluster health");
        self.health.cluster_health(ctx).await
    }

    pub async fn readiness(&self, ctx: &RequestContext) -> Result<(), ServiceError> {
        debug!("Checking readiness");
        self.readiness.readiness(ctx).await
    }
}
