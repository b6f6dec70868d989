//! Application state shared across handlers

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::context::RequestContext;
use crate::endpoint::RegistryEndpoint;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    endpoint: Arc<RegistryEndpoint>,
    shutdown: CancellationToken,
    request_timeout: Option<Duration>,
}

impl AppState {
    /// State with a fresh shutdown token and no request deadline
    pub fn new(endpoint: RegistryEndpoint) -> Self {
        Self {
            endpoint: Arc::new(endpoint),
            shutdown: CancellationToken::new(),
            request_timeout: None,
        }
    }

    /// Cancel request contexts when `shutdown` is cancelled
    pub fn with_shutdown(mut self, shutdown: CancellationToken) -> Self {
        self.shutdown = shutdown;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn endpoint(&self) -> &RegistryEndpoint {
        &self.endpoint
    }

    pub fn shutdown(&self) -> &CancellationToken {
        &self.shutdown
    }

    /// Fresh context for one inbound request
    pub fn request_context(&self) -> RequestContext {
        RequestContext::new(&self.shutdown, self.request_timeout)
    }
}
