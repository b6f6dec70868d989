//! Lazily built, write-once cache of the version payload.

use axum::body::Bytes;
use once_cell::sync::OnceCell;
use registry_common::VersionResponse;
use tracing::debug;

use crate::checks::VersionSource;

/// Serialized version payload, built on first use.
///
/// Concurrent first callers block until the single initializer finishes and
/// then all read the same bytes. Reads after that never take a lock. An
/// initializer that fails leaves the cache empty so a later call retries.
#[derive(Debug, Default)]
pub struct VersionCache {
    cell: OnceCell<Bytes>,
}

impl VersionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached bytes, if the cache is populated
    pub fn get(&self) -> Option<&Bytes> {
        self.cell.get()
    }

    pub fn is_ready(&self) -> bool {
        self.cell.get().is_some()
    }

    /// Return the cached bytes, running `init` if nothing is cached yet
    pub fn get_or_try_init<F, E>(&self, init: F) -> Result<&Bytes, E>
    where
        F: FnOnce() -> Result<Bytes, E>,
    {
        self.cell.get_or_try_init(init)
    }

    /// Return the version payload, serializing it from `source` on first use
    pub fn version_json(&self, source: &dyn VersionSource) -> Result<Bytes, serde_json::Error> {
        self.get_or_try_init(|| -> Result<Bytes, serde_json::Error> {
            let set = source.version_set();
            let payload = serde_json::to_vec(&VersionResponse::new(&set))?;
            debug!("Cached version payload ({} bytes)", payload.len());
            Ok(Bytes::from(payload))
        })
        .cloned()
    }
}
