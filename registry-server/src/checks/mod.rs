//! Subsystems the endpoints delegate to.
//!
//! The endpoint group owns none of the checks itself; it forwards each request
//! context to whichever implementation it was built with. [`local`] holds the
//! implementations the binary runs with.

pub mod local;

use async_trait::async_trait;
use registry_common::{HealthReport, ServiceError, VersionSet};

use crate::context::RequestContext;

pub use local::{BuildVersionSource, LocalClusterHealth, ShutdownReadiness};

/// Source of the build metadata served by the version endpoint
pub trait VersionSource: Send + Sync {
    fn version_set(&self) -> VersionSet;
}

/// Reports the health of the registry cluster
#[async_trait]
pub trait ClusterHealthChecker: Send + Sync {
    /// Produce a health report, observing cancellation of `ctx`
    async fn cluster_health(&self, ctx: &RequestContext) -> Result<HealthReport, ServiceError>;
}

/// Decides whether this instance should receive traffic
#[async_trait]
pub trait ReadinessChecker: Send + Sync {
    /// Succeeds when ready, observing cancellation of `ctx`
    async fn readiness(&self, ctx: &RequestContext) -> Result<(), ServiceError>;
}
