mod database;
pub mod metrics;

// Re-export the factory functions for easy access
pub use database::create_mongo_repository;
pub use self::metrics::{create_noop_metrics, create_prom_metrics};
