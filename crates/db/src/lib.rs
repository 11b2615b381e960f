//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - The `documents` entity holding every dashboard collection
//! - A `DocumentStore` implementation backed by PostgreSQL
//! - Database migrations

pub mod codec;
pub mod entities;
pub mod migration;
pub mod repositories;

pub use repositories::DocumentRepository;

use std::time::Duration;

use painel_shared::DatabaseConfig;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

/// Establishes a connection to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    Database::connect(database_url).await
}

/// Establishes a pooled connection using the configured limits.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect_with(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false);

    Database::connect(options).await
}
