//! Request-scoped cancellation context.
//!
//! Every health and readiness request gets its own [`RequestContext`]. The
//! context is cancelled when:
//! - the server starts shutting down (it is a child of the shutdown token)
//! - the handler future is dropped, e.g. because the client disconnected
//! - the configured request deadline passes

use std::convert::Infallible;
use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use registry_common::ServiceError;
use tokio::time::{sleep_until, Instant};
use tokio_util::sync::{CancellationToken, DropGuard};

use crate::state::AppState;

/// Cancellation context handed unmodified to the health subsystems
pub struct RequestContext {
    token: CancellationToken,
    deadline: Option<Instant>,
    _guard: DropGuard,
}

impl RequestContext {
    /// Create a context bound to `parent` with an optional deadline
    pub fn new(parent: &CancellationToken, timeout: Option<Duration>) -> Self {
        let token = parent.child_token();
        let guard = token.clone().drop_guard();

        Self {
            token,
            deadline: timeout.map(|t| Instant::now() + t),
            _guard: guard,
        }
    }

    /// Token cancelled together with this request
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Returns the error the request should end with, if it already ended
    pub fn check(&self) -> Result<(), ServiceError> {
        if self.token.is_cancelled() {
            return Err(ServiceError::cancelled());
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Err(ServiceError::timeout()),
            _ => Ok(()),
        }
    }

    /// Resolves once the request is cancelled or its deadline passes
    pub async fn done(&self) -> ServiceError {
        match self.deadline {
            Some(deadline) => tokio::select! {
                _ = self.token.cancelled() => ServiceError::cancelled(),
                _ = sleep_until(deadline) => ServiceError::timeout(),
            },
            None => {
                self.token.cancelled().await;
                ServiceError::cancelled()
            }
        }
    }

    /// Run `fut` unless the request ends first
    pub async fn run<F, T>(&self, fut: F) -> Result<T, ServiceError>
    where
        F: Future<Output = Result<T, ServiceError>>,
    {
        tokio::select! {
            biased;
            err = self.done() => Err(err),
            res = fut => res,
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for RequestContext {
    type Rejection = Infallible;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(state.request_context())
    }
}
