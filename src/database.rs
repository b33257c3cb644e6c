use sqlx::{postgres::PgPoolOptions, Pool, Postgres};
use std::time::Duration;
use tracing::info;

use crate::config::DatabaseConfig;

/// Postgres pool holding the `hall` and `seats` tables.
#[derive(Clone)]
pub struct Database {
    pub pool: Pool<Postgres>,
}

impl Database {
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let pool = pool_options(config).connect(&config.url).await?;
        info!(
            pool_size = config.pool_size,
            acquire_timeout_secs = config.acquire_timeout_secs,
            "Seat database connected"
        );
        Ok(Database { pool })
    }

    /// Create the `hall` and `seats` tables if they are missing.
    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./src/migrations").run(&self.pool).await?;
        info!("Hall schema is up to date");
        Ok(())
    }
}

// Allocation writes one seat per request, so a single warm connection is
// kept around even when the service is idle.
fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.pool_size.max(1))
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
}
