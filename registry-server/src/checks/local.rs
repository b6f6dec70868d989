//! Checks for a single, standalone registry instance.

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use registry_common::{version, HealthReport, ServiceError, VersionSet};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use uuid::Uuid;

use super::{ClusterHealthChecker, ReadinessChecker, VersionSource};
use crate::context::RequestContext;

/// Serves the process-wide build metadata
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildVersionSource;

impl VersionSource for BuildVersionSource {
    fn version_set(&self) -> VersionSet {
        version::ver().clone()
    }
}

/// One registry instance as it appears in the cluster health report
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceStatus {
    pub instance_id: String,
    pub host_name: String,
    pub endpoints: Vec<String>,
    pub version: String,
    pub status: &'static str,
    pub start_timestamp: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ClusterReport<'a> {
    instances: [&'a InstanceStatus; 1],
    timestamp: String,
}

/// Cluster health for a registry running without peers: the cluster is
/// this instance alone.
#[derive(Debug, Clone)]
pub struct LocalClusterHealth {
    instance: InstanceStatus,
}

impl LocalClusterHealth {
    pub fn new(host_name: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            instance: InstanceStatus {
                instance_id: Uuid::new_v4().to_string(),
                host_name: host_name.into(),
                endpoints: vec![endpoint.into()],
                version: version::ver().version.clone(),
                status: "UP",
                start_timestamp: now_rfc3339(),
            },
        }
    }

    pub fn instance(&self) -> &InstanceStatus {
        &self.instance
    }
}

#[async_trait]
impl ClusterHealthChecker for LocalClusterHealth {
    async fn cluster_health(&self, ctx: &RequestContext) -> Result<HealthReport, ServiceError> {
        ctx.check()?;

        let report = ClusterReport {
            instances: [&self.instance],
            timestamp: now_rfc3339(),
        };
        HealthReport::from_serializable(&report).map_err(|e| {
            ServiceError::internal("failed to build cluster health report").with_detail(e.to_string())
        })
    }
}

/// Ready until shutdown begins.
#[derive(Debug, Clone)]
pub struct ShutdownReadiness {
    shutdown: CancellationToken,
}

impl ShutdownReadiness {
    pub fn new(shutdown: CancellationToken) -> Self {
        Self { shutdown }
    }
}

#[async_trait]
impl ReadinessChecker for ShutdownReadiness {
    async fn readiness(&self, ctx: &RequestContext) -> Result<(), ServiceError> {
        // request tokens are children of the shutdown token; check shutdown first
        if self.shutdown.is_cancelled() {
            warn!("Readiness probe during shutdown");
            return Err(ServiceError::unavailable("registry is shutting down"));
        }
        ctx.check()?;
        debug!("Readiness probe ok");
        Ok(())
    }
}

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}
