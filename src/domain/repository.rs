use super::visit::Visit;
use anyhow::Result;
use std::sync::Arc;

/// Abstraction for visit persistence.
#[async_trait::async_trait]
pub trait VisitRepository: Send + Sync {
    // ---
    /// Store one visit. Ownership of the record passes to the backend.
    async fn insert_visit(&self, visit: Visit) -> Result<()>;
}

/// Type alias for any backend that implements VisitRepository.
pub type RepositoryPtr = Arc<dyn VisitRepository>;
