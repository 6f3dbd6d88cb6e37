//! Review store abstraction
//!
//! The exporter talks to the document store through two small traits so the
//! pipeline can run against MongoDB in production and against in-memory
//! stores in tests:
//!
//! - [`StoreConnector`] opens a store from a connection string.
//! - [`ReviewStore`] runs the filter and hands back every matching document.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::Collection;
use mongodb::bson::Document;
use tracing::{debug, info};

use crate::config::{ConnectionConfig, Settings};
use crate::connection::ConnectionManager;
use crate::error::{Result, ReviewExportError};

/// An open connection to a collection of review documents
#[async_trait]
pub trait ReviewStore: Send {
    /// Run `filter` and materialize all matching documents
    ///
    /// # Arguments
    /// * `filter` - MongoDB filter document
    ///
    /// # Returns
    /// * `Result<Vec<Document>>` - Matching documents, in store order
    async fn find_reviews(&mut self, filter: Document) -> Result<Vec<Document>>;

    /// Release the connection
    async fn close(&mut self);
}

/// Opens a [`ReviewStore`] from a connection string
#[async_trait]
pub trait StoreConnector: Send + Sync {
    async fn connect(&self, uri: &str) -> Result<Box<dyn ReviewStore>>;
}

/// Connector for a MongoDB collection
#[derive(Debug, Clone)]
pub struct MongoConnector {
    database: String,
    collection: String,
    config: ConnectionConfig,
}

impl MongoConnector {
    pub fn new(database: String, collection: String, config: ConnectionConfig) -> Self {
        Self {
            database,
            collection,
            config,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.database.clone(),
            settings.collection.clone(),
            settings.connection.clone(),
        )
    }
}

#[async_trait]
impl StoreConnector for MongoConnector {
    async fn connect(&self, uri: &str) -> Result<Box<dyn ReviewStore>> {
        let mut manager = ConnectionManager::new(uri.to_string(), self.config.clone());
        manager.connect().await?;

        let collection = manager
            .get_database(&self.database)?
            .collection::<Document>(&self.collection);

        Ok(Box::new(MongoReviewStore {
            manager,
            collection,
        }))
    }
}

/// [`ReviewStore`] backed by a MongoDB collection
pub struct MongoReviewStore {
    manager: ConnectionManager,
    collection: Collection<Document>,
}

#[async_trait]
impl ReviewStore for MongoReviewStore {
    async fn find_reviews(&mut self, filter: Document) -> Result<Vec<Document>> {
        info!(
            "Executing find on '{}.{}'",
            self.collection.namespace().db,
            self.collection.name()
        );
        debug!("Filter: {:?}", filter);

        let cursor = self
            .collection
            .find(filter)
            .await
            .map_err(|e| ReviewExportError::query(&e))?;

        let docs: Vec<Document> = cursor
            .try_collect()
            .await
            .map_err(|e| ReviewExportError::cursor(&e))?;

        debug!("Fetched {} documents", docs.len());
        Ok(docs)
    }

    async fn close(&mut self) {
        self.manager.disconnect().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConnectionError, ErrorKind};

    fn connector(timeout: Option<u64>) -> MongoConnector {
        MongoConnector::new(
            "ReviewsGplay".to_string(),
            "reviews".to_string(),
            ConnectionConfig {
                timeout,
                ..ConnectionConfig::default()
            },
        )
    }

    #[tokio::test]
    async fn test_unreachable_server_fails_on_ping() {
        // Nothing listens on port 1; server selection gives up after the timeout.
        let err = match connector(Some(1)).connect("mongodb://127.0.0.1:1").await {
            Ok(_) => panic!("connected to an unreachable server"),
            Err(e) => e,
        };

        assert_eq!(err.kind(), ErrorKind::Connection);
        assert!(matches!(
            err,
            ReviewExportError::Connection(ConnectionError::PingFailed(_))
        ));
    }

    #[tokio::test]
    async fn test_malformed_uri_fails_before_connecting() {
        let err = match connector(Some(1)).connect("http://127.0.0.1:1").await {
            Ok(_) => panic!("accepted a non-MongoDB URI"),
            Err(e) => e,
        };

        assert!(matches!(
            err,
            ReviewExportError::Connection(ConnectionError::InvalidUri(_))
        ));
    }

    /// Runs the whole export against a live server.
    ///
    /// `MONGO_URI=mongodb://localhost:27017 cargo test -- --ignored`
    #[tokio::test]
    #[ignore = "needs a MongoDB server in MONGO_URI"]
    async fn test_export_against_live_server() {
        use crate::config::Settings;
        use crate::exporter::ReviewExporter;
        use mongodb::bson::{DateTime, doc};

        let Some(uri) = Settings::uri_from_env("MONGO_URI") else {
            return;
        };

        let database = format!("review_export_test_{}", std::process::id());
        let client = mongodb::Client::with_uri_str(&uri).await.unwrap();
        let collection = client.database(&database).collection::<Document>("reviews");
        collection
            .insert_many([
                doc! {
                    "appId": "com.example.app", "store": "google_play", "lang": "pt",
                    "date": DateTime::from_millis(1_704_153_600_000), "score": 5, "content": "Great",
                },
                doc! {
                    "appId": "com.example.app", "store": "google_play", "lang": "en",
                    "date": DateTime::from_millis(1_704_153_600_000), "score": 1,
                },
                doc! {
                    "appId": "com.example.app", "store": "google_play", "lang": "pt",
                    "date": DateTime::from_millis(1_709_251_200_000), "score": 3,
                },
            ])
            .await
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let query_file = dir.path().join("consulta.yaml");
        std::fs::write(
            &query_file,
            "appId: com.example.app\nstore: google_play\nlang: pt\n\
             start_date: \"2024-01-01T00:00:00Z\"\nend_date: \"2024-01-31T23:59:59Z\"\n",
        )
        .unwrap();

        let mut settings = Settings::with_uri(uri);
        settings.database = database;
        settings.query_file = query_file;
        settings.output_file = dir.path().join("out").join("reviews_export.csv");
        settings.connection.timeout = Some(5);

        let result = ReviewExporter::new(settings.clone()).run().await;
        client.database(&settings.database).drop().await.unwrap();
        let report = result.unwrap();

        assert_eq!(report.documents_exported, 1);
        let content = std::fs::read_to_string(&settings.output_file).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next(),
            Some("_id,appId,content,date,lang,score,store")
        );
        assert!(lines.next().unwrap().contains(",Great,"));
        assert_eq!(lines.next(), None);
    }
}
