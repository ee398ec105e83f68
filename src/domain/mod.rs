mod metrics;
mod repository;
mod visit;

// Publicly expose the Metrics abstraction
pub use self::metrics::{DbOperationStatus, HttpRequestSample, Metrics, MetricsPtr};

// Publicly expose the visit persistence abstractions
pub use repository::{RepositoryPtr, VisitRepository};
pub use visit::{Visit, UNKNOWN_IP, UNKNOWN_USER_AGENT};
