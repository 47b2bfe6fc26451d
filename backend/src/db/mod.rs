//! Database connection management for the account service
//!
//! This module connects to MongoDB and prepares the account collection.

use mongodb::{bson::doc, options::ClientOptions, Client, Database};

use crate::config::Config;
use crate::store::MongoAccountStore;

/// Database connection error
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("Failed to connect to database: {0}")]
    ConnectionError(String),

    #[error("Failed to prepare indexes: {0}")]
    IndexError(String),

    #[error("Database health check failed: {0}")]
    HealthCheckError(String),
}

/// Connect to MongoDB and verify the server is reachable
pub async fn connect(config: &Config) -> Result<Database, DbError> {
    tracing::info!("Connecting to database at {}", config.mongodb_uri_masked());

    let mut options = ClientOptions::parse(&config.mongodb_uri)
        .await
        .map_err(|e| DbError::ConnectionError(e.to_string()))?;
    options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
    options.connect_timeout = Some(config.store_timeout);
    options.server_selection_timeout = Some(config.store_timeout);

    let client =
        Client::with_options(options).map_err(|e| DbError::ConnectionError(e.to_string()))?;
    let db = client.database(&config.mongodb_database);

    db.run_command(doc! { "ping": 1 }, None)
        .await
        .map_err(|e| DbError::HealthCheckError(e.to_string()))?;

    tracing::info!(database = %config.mongodb_database, "Database connected successfully");

    Ok(db)
}

/// Build the account store on top of a connected database
pub async fn account_store(db: Database, config: &Config) -> Result<MongoAccountStore, DbError> {
    let store = MongoAccountStore::new(db, config.store_timeout);
    store
        .ensure_indexes()
        .await
        .map_err(|e| DbError::IndexError(e.to_string()))?;
    Ok(store)
}
