//! Application state management.
//!
//! `AppState` is the composition root's output: the collaborators every
//! handler and middleware needs, built once at startup and cloned cheaply
//! (all `Arc`) for each request via Axum's `State` extractor.

use crate::domain::{MetricsPtr, RepositoryPtr};

/// Shared application state passed to all Axum handlers.
///
/// # Design Principles
///
/// - **Dependency Inversion**: Handlers depend on abstractions (`VisitRepository`,
///   `Metrics`), not on MongoDB or Prometheus directly.
/// - **Immutable After Initialization**: State is built once at startup and
///   never mutated.
///
/// # Fields
///
/// - `repository`: Visit persistence backend
/// - `metrics`: Metrics implementation for observability (Prometheus or no-op)
/// - `trust_proxy`: Whether forwarding headers name the client
#[derive(Clone)]
pub struct AppState {
    repository: RepositoryPtr,
    metrics: MetricsPtr,
    trust_proxy: bool,
}

impl AppState {
    // ---

    pub fn new(repository: RepositoryPtr, metrics: MetricsPtr, trust_proxy: bool) -> Self {
        // ---
        AppState {
            repository,
            metrics,
            trust_proxy,
        }
    }

    /// Get a reference to the metrics implementation.
    pub(crate) fn metrics(&self) -> &MetricsPtr {
        // ---
        &self.metrics
    }

    /// Get a reference to the repository implementation.
    pub(crate) fn repository(&self) -> &RepositoryPtr {
        // ---
        &self.repository
    }

    pub(crate) fn trust_proxy(&self) -> bool {
        self.trust_proxy
    }
}
