//! Shared types for the registry operational endpoints.
//!
//! This crate contains the wire types shared between:
//! - registry-server (the HTTP endpoint group)
//! - the health and readiness subsystems it delegates to
//!
//! Any changes to response or error formats should be made here.

pub mod error;
pub mod version;

use serde::{Deserialize, Serialize};

pub use error::{ErrorBody, ErrorKind, ServiceError};
pub use version::{VersionResponse, VersionSet, API_VERSION};

/// Cluster health report produced by the health subsystem.
///
/// The endpoint group does not look inside it; it is written back to the
/// caller exactly as the subsystem produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HealthReport(serde_json::Value);

impl HealthReport {
    /// Build a report from any serializable value
    pub fn from_serializable<T: Serialize>(value: &T) -> Result<Self, serde_json::Error> {
        serde_json::to_value(value).map(Self)
    }

    /// Borrow the raw JSON value
    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    /// Unwrap into the raw JSON value
    pub fn into_value(self) -> serde_json::Value {
        self.0
    }
}

impl From<serde_json::Value> for HealthReport {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_health_report_is_transparent() {
        let report = HealthReport::from(json!({ "status": "UP" }));
        let encoded = serde_json::to_string(&report).unwrap();
        assert_eq!(encoded, r#"{"status":"UP"}"#);
    }

    #[test]
    fn test_health_report_from_struct() {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Instance {
            host_name: &'static str,
        }

        let report = HealthReport::from_serializable(&Instance { host_name: "node-1" }).unwrap();
        assert_eq!(report.as_value()["hostName"], "node-1");
    }
}
