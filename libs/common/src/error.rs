//! Database setup errors

use sqlx::migrate::MigrateError;
use thiserror::Error;

/// Failure while configuring, connecting to or migrating the database
#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Invalid database configuration: {0}")]
    Configuration(String),

    #[error("Could not connect to the database: {0}")]
    Connection(#[source] sqlx::Error),

    #[error("Migration failed: {0}")]
    Migration(#[from] MigrateError),
}

pub type DatabaseResult<T> = Result<T, DatabaseError>;
