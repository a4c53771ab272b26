use anyhow::Result;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

mod config;
mod error;
mod routes;
mod state;

use auth::{
    AuthState,
    jwt::{JwtConfig, JwtService},
    repositories::PgUserRepository,
    session::CookieConfig,
};
use common::{
    database::{DatabaseConfig, init_pool},
    telemetry,
};
use tmdb::{TmdbClient, TmdbConfig};

use crate::{config::AppConfig, state::AppState};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init();

    info!("Starting API service");

    let config = AppConfig::from_env()?;
    info!("Running in {} mode", config.mode.as_str());

    // Initialize database connection pool
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    if common::database::health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    auth::database::run_migrations(&pool).await?;

    let app_state = AppState {
        auth: AuthState {
            jwt_service: JwtService::new(JwtConfig::from_env()?)?,
            user_store: Arc::new(PgUserRepository::new(pool)),
            cookie_config: CookieConfig::for_mode(config.mode),
        },
        tmdb: TmdbClient::new(TmdbConfig::from_env()?),
    };

    let app = routes::create_router(app_state, config.cors_layer()?);

    let listener = TcpListener::bind(("0.0.0.0", config.port)).await?;
    info!("API service listening on 0.0.0.0:{}", config.port);

    axum::serve(listener, app).await?;

    Ok(())
}
