//! Schema management for the user store

use anyhow::Result;
use sqlx::PgPool;
use tracing::info;

/// Apply pending migrations from `services/auth/migrations`
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    info!("Running user store migrations");

    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(common::error::DatabaseError::from)?;

    info!("User store migrations applied");
    Ok(())
}
