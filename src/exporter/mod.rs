//! Review export pipeline
//!
//! [`ReviewExporter::run`] executes one export, strictly in order:
//! 1. take the connection string from the settings
//! 2. load and validate the query file
//! 3. connect to the store
//! 4. build the filter and fetch every matching review
//! 5. build the table and write it as CSV
//! 6. close the connection
//!
//! Any failure ends the run. Once the store is open it is closed on every
//! exit path, including failed queries and failed writes.

use std::path::PathBuf;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::config::{QueryConfig, Settings};
use crate::error::{ConfigError, Result};
use crate::export::CsvWriter;
use crate::query::build_review_filter;
use crate::store::{MongoConnector, ReviewStore, StoreConnector};
use crate::table::ReviewTable;

/// Result of a successful export run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    /// Path of the written CSV file
    pub output_path: PathBuf,
    /// Number of documents exported
    pub documents_exported: u64,
    /// Number of CSV columns
    pub columns: usize,
    /// File size in bytes
    pub file_size_bytes: u64,
    /// Time taken for the run
    pub elapsed_ms: u64,
}

/// Fetches reviews from the store and saves them to a CSV file
pub struct ReviewExporter {
    settings: Settings,
    connector: Box<dyn StoreConnector>,
}

impl ReviewExporter {
    /// One-line description, also shown by `--help`
    pub const DESCRIPTION: &'static str =
        "Fetches reviews from MongoDB and saves them to a CSV file";

    /// Create an exporter that reads from MongoDB
    pub fn new(settings: Settings) -> Self {
        let connector = MongoConnector::from_settings(&settings);
        Self::with_connector(settings, Box::new(connector))
    }

    /// Create an exporter with a custom store connector
    pub fn with_connector(settings: Settings, connector: Box<dyn StoreConnector>) -> Self {
        Self {
            settings,
            connector,
        }
    }

    /// Run one export
    ///
    /// # Returns
    /// * `Result<ExportReport>` - Export statistics or the first error hit
    pub async fn run(&self) -> Result<ExportReport> {
        let start_time = Instant::now();

        let uri = self
            .settings
            .mongo_uri
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar(self.settings.uri_env_var.clone()))?;

        info!(
            "Loading query parameters from {}",
            self.settings.query_file.display()
        );
        let query = QueryConfig::from_file(&self.settings.query_file)?;
        debug!("Query parameters: {:?}", query);
        if query.start_date > query.end_date {
            warn!(
                "start_date {} is after end_date {}, no review can match",
                query.start_date, query.end_date
            );
        }

        let mut store = self.connector.connect(uri).await?;
        let outcome = self.fetch_and_write(&mut *store, &query).await;
        store.close().await;
        debug!("Store connection released");

        let (table_rows, columns, file_size_bytes) = outcome?;
        let elapsed_ms = start_time.elapsed().as_millis() as u64;

        info!(
            "Export completed: {} documents, {} columns, {} bytes, {} ms",
            table_rows, columns, file_size_bytes, elapsed_ms
        );

        Ok(ExportReport {
            output_path: self.settings.output_file.clone(),
            documents_exported: table_rows,
            columns,
            file_size_bytes,
            elapsed_ms,
        })
    }

    /// Query the open store and write the results
    async fn fetch_and_write(
        &self,
        store: &mut dyn ReviewStore,
        query: &QueryConfig,
    ) -> Result<(u64, usize, u64)> {
        let filter = build_review_filter(query);
        let docs = store.find_reviews(filter).await?;
        info!("Fetched {} reviews", docs.len());

        let table = ReviewTable::from_documents(&docs);
        debug!("Columns: {:?}", table.columns());

        let writer = CsvWriter::new(&self.settings.output_file);
        let bytes = writer.write_table(&table).await?;

        Ok((table.len() as u64, table.columns().len(), bytes))
    }
}

/// Human-readable status line for a finished run
pub fn status_message(result: &Result<ExportReport>) -> String {
    match result {
        Ok(report) => format!(
            "Reviews fetched and saved to {}",
            report.output_path.display()
        ),
        Err(e) => e.to_string(),
    }
}
