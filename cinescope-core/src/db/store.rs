//! Connection provider for the MFlix document store.
//!
//! One handle is opened per process and shared read-only by every query.
//! There is no retry and no pooling policy of our own: load is a single
//! interactive user, and the driver's defaults cover the rest.

use std::time::Duration;

use futures::TryStreamExt;
use mongodb::bson::{doc, Bson, Document};
use mongodb::options::ClientOptions;
use mongodb::Client;

use crate::config::StoreConfig;
use crate::error::Result;

/// Movies collection name.
pub const MOVIES: &str = "movies";
/// Theaters collection name.
pub const THEATERS: &str = "theaters";
/// Comments collection name.
pub const COMMENTS: &str = "comments";
/// Users collection name.
pub const USERS: &str = "users";

/// Long-lived handle to the MFlix database.
pub struct Store {
    db: mongodb::Database,
}

impl Store {
    /// Connect and verify the connection with a ping.
    ///
    /// Failure here is fatal to the dashboard; callers surface the error
    /// and halt rendering.
    pub async fn connect(config: &StoreConfig) -> Result<Self> {
        let uri = config.effective_uri();

        let mut options = ClientOptions::parse(&uri).await?;
        options.server_selection_timeout =
            Some(Duration::from_secs(config.server_selection_timeout_secs));
        options.connect_timeout = Some(Duration::from_secs(config.connect_timeout_secs));
        options.app_name = Some("cinescope".to_string());

        let client = Client::with_options(options)?;
        let db = client.database(&config.database);

        // Fail fast instead of on the first page render
        db.run_command(doc! { "ping": 1 }).await?;

        tracing::info!(database = %config.database, "Connected to document store");

        Ok(Self { db })
    }

    /// Run an aggregation pipeline and drain the cursor.
    pub async fn aggregate(
        &self,
        collection: &str,
        pipeline: Vec<Document>,
    ) -> Result<Vec<Document>> {
        let cursor = self
            .db
            .collection::<Document>(collection)
            .aggregate(pipeline)
            .await?;
        let docs: Vec<Document> = cursor.try_collect().await?;

        tracing::debug!(collection, rows = docs.len(), "Aggregation complete");
        Ok(docs)
    }

    /// Count all documents in a collection.
    pub async fn count(&self, collection: &str) -> Result<u64> {
        let count = self
            .db
            .collection::<Document>(collection)
            .count_documents(doc! {})
            .await?;
        Ok(count)
    }

    /// Distinct string values of a field, sorted.
    ///
    /// Non-string values (the collections are not perfectly clean) are
    /// dropped.
    pub async fn distinct_strings(&self, collection: &str, field: &str) -> Result<Vec<String>> {
        let values = self
            .db
            .collection::<Document>(collection)
            .distinct(field, doc! {})
            .await?;

        let mut strings: Vec<String> = values
            .into_iter()
            .filter_map(|v| match v {
                Bson::String(s) => Some(s),
                _ => None,
            })
            .collect();
        strings.sort();
        Ok(strings)
    }
}
