//! Build and version metadata of the running registry.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Version of the HTTP API contract, independent of the build version
pub const API_VERSION: &str = "4.0.0";

/// Build metadata describing the running binary.
///
/// Optional fields are left out of the JSON form when unknown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionSet {
    /// Crate version the binary was built from
    pub version: String,

    /// Free-form build tag injected at compile time (`BUILD_TAG`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_tag: Option<String>,

    /// Source revision injected at compile time (`GIT_COMMIT`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git_commit: Option<String>,

    /// Target operating system
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os: Option<String>,

    /// Target architecture
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arch: Option<String>,
}

impl VersionSet {
    /// Metadata of the current build
    pub fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            build_tag: option_env!("BUILD_TAG").map(str::to_string),
            git_commit: option_env!("GIT_COMMIT").map(str::to_string),
            os: Some(std::env::consts::OS.to_string()),
            arch: Some(std::env::consts::ARCH.to_string()),
        }
    }
}

/// Body of the version endpoint: the build metadata plus the API version
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionResponse<'a> {
    #[serde(flatten)]
    pub set: &'a VersionSet,
    pub api_version: &'static str,
}

impl<'a> VersionResponse<'a> {
    pub fn new(set: &'a VersionSet) -> Self {
        Self {
            set,
            api_version: API_VERSION,
        }
    }
}

static VERSION: Lazy<VersionSet> = Lazy::new(VersionSet::current);

/// Process-wide version metadata, resolved on first access and never mutated
pub fn ver() -> &'static VersionSet {
    &VERSION
}
