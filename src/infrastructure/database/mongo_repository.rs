use anyhow::{Context, Result};
use mongodb::bson::DateTime as BsonDateTime;
use mongodb::{Client, Collection};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::MongoConfig;
use crate::domain::{DbOperationStatus, MetricsPtr, RepositoryPtr, Visit, VisitRepository};

/// Stored shape of a visit.
#[derive(Debug, Serialize, Deserialize)]
struct VisitDocument {
    visit_dt: BsonDateTime,
    ip: String,
    user_agent: String,
}

impl From<Visit> for VisitDocument {
    fn from(visit: Visit) -> Self {
        // ---
        VisitDocument {
            visit_dt: BsonDateTime::from_millis(visit.visited_at.timestamp_millis()),
            ip: visit.ip,
            user_agent: visit.user_agent,
        }
    }
}

/// Creates a MongoDB-backed visit repository.
///
/// The driver connects lazily, so this succeeds as long as the URI parses;
/// an unreachable server surfaces on the first insert. The database named in
/// the URI wins over `config.database`.
pub async fn create_mongo_repository(config: &MongoConfig, metrics: MetricsPtr) -> Result<RepositoryPtr> {
    // ---
    let client = Client::with_uri_str(&config.uri)
        .await
        .context("Failed to create MongoDB client")?;

    let database = client
        .default_database()
        .unwrap_or_else(|| client.database(&config.database));

    tracing::info!(
        database = database.name(),
        collection = %config.collection,
        "MongoDB visit repository ready"
    );

    let collection = database.collection::<VisitDocument>(&config.collection);
    Ok(Arc::new(MongoVisitRepository::new(collection, metrics)))
}

pub struct MongoVisitRepository {
    // ---
    collection: Collection<VisitDocument>,
    metrics: MetricsPtr,
}

impl MongoVisitRepository {
    // ---
    fn new(collection: Collection<VisitDocument>, metrics: MetricsPtr) -> Self {
        // ---
        Self { collection, metrics }
    }
}

#[async_trait::async_trait]
impl VisitRepository for MongoVisitRepository {
    // ---
    async fn insert_visit(&self, visit: Visit) -> Result<()> {
        // ---
        let document = VisitDocument::from(visit);
        let result = self.collection.insert_one(&document).await;

        let status = match result {
            Ok(_) => DbOperationStatus::Success,
            Err(_) => DbOperationStatus::Error,
        };
        self.metrics
            .record_db_operation("insert", self.collection.name(), status);

        result.with_context(|| format!("Failed to insert visit into {}", self.collection.name()))?;
        Ok(())
    }
}
