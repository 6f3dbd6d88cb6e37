//! Connection management for MongoDB
//!
//! Opens one client per run, verifies it with a ping and shuts it down
//! explicitly once the export is done.

use mongodb::bson::doc;
use mongodb::{Client, Database, options::ClientOptions};
use tracing::{debug, info};

use crate::config::ConnectionConfig;
use crate::error::{ConnectionError, Result, summarize_mongodb_error};

/// MongoDB connection manager
pub struct ConnectionManager {
    /// MongoDB client instance
    client: Option<Client>,

    /// Connection configuration
    config: ConnectionConfig,

    /// Connection URI
    uri: String,
}

impl ConnectionManager {
    /// Create a new connection manager
    ///
    /// # Arguments
    /// * `uri` - MongoDB connection URI
    /// * `config` - Connection configuration
    pub fn new(uri: String, config: ConnectionConfig) -> Self {
        Self {
            client: None,
            config,
            uri,
        }
    }

    /// Establish connection to MongoDB
    ///
    /// The driver connects lazily, so the connection is verified with a ping
    /// before this returns.
    ///
    /// # Returns
    /// * `Result<()>` - Success or connection error
    pub async fn connect(&mut self) -> Result<()> {
        let client = self.try_connect().await?;
        self.client = Some(client);
        info!("Connected to MongoDB");
        Ok(())
    }

    async fn try_connect(&self) -> Result<Client> {
        let options = Self::parse_uri(&self.uri).await?;
        let options = self.configure(options);

        let client = Client::with_options(options)
            .map_err(|e| ConnectionError::ConnectionFailed(summarize_mongodb_error(&e)))?;

        Self::ping(&client).await?;
        Ok(client)
    }

    /// Disconnect from MongoDB
    ///
    /// Safe to call when not connected.
    pub async fn disconnect(&mut self) {
        if let Some(client) = self.client.take() {
            client.shutdown().await;
            debug!("MongoDB client shut down");
        }
    }

    /// Get a database handle
    ///
    /// # Arguments
    /// * `name` - Database name
    pub fn get_database(&self, name: &str) -> Result<Database> {
        Ok(self.get_client()?.database(name))
    }

    /// Get the MongoDB client
    pub fn get_client(&self) -> Result<&Client> {
        self.client.as_ref().ok_or_else(|| {
            ConnectionError::ConnectionFailed("not connected to MongoDB".to_string()).into()
        })
    }

    /// Parse connection URI and create client options
    async fn parse_uri(uri: &str) -> Result<ClientOptions> {
        ClientOptions::parse(uri)
            .await
            .map_err(|e| ConnectionError::InvalidUri(summarize_mongodb_error(&e)).into())
    }

    /// Apply app name and timeouts from the configuration
    fn configure(&self, mut options: ClientOptions) -> ClientOptions {
        if options.app_name.is_none() {
            options.app_name = Some(self.config.app_name.clone());
        }
        if let Some(timeout) = self.config.timeout_duration() {
            options.server_selection_timeout = Some(timeout);
            options.connect_timeout = Some(timeout);
        }
        options
    }

    /// Verify connection is alive by sending a ping
    async fn ping(client: &Client) -> Result<()> {
        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| ConnectionError::PingFailed(summarize_mongodb_error(&e)))?;
        debug!("Ping succeeded");
        Ok(())
    }
}
