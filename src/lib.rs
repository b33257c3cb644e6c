pub mod config;
pub mod controllers;
pub mod database;
pub mod hall;
pub mod models;
pub mod services;
pub mod store;

use anyhow::Context;
use std::sync::Arc;
use tracing::warn;

use crate::services::{ServiceError, TicketService};
use crate::store::{MemoryStore, PgSeatStore, SeatStore};

// Shared state for every handler
#[derive(Clone)]
pub struct AppState {
    pub tickets: TicketService,
}

impl AppState {
    /// Open the configured store and rebuild the hall from it.
    pub async fn new(config: &config::Config) -> anyhow::Result<Arc<Self>> {
        let store: Arc<dyn SeatStore> = match &config.database {
            Some(db_config) => {
                let db = database::Database::connect(db_config)
                    .await
                    .context("Failed to connect to database")?;
                db.run_migrations()
                    .await
                    .context("Failed to run migrations")?;
                Arc::new(PgSeatStore::new(db))
            }
            None => {
                warn!("DATABASE_URL is not set, hall state will not survive a restart");
                Arc::new(MemoryStore::new())
            }
        };

        Self::with_store(&config.hall, store)
            .await
            .context("Failed to load the hall")
    }

    pub async fn with_store(
        hall: &config::HallConfig,
        store: Arc<dyn SeatStore>,
    ) -> Result<Arc<Self>, ServiceError> {
        let tickets = TicketService::bootstrap(store, hall).await?;
        Ok(Arc::new(Self { tickets }))
    }
}

#[cfg(test)]
pub(crate) async fn test_state(rows: i32, cols: i32) -> Arc<AppState> {
    let hall = config::HallConfig { rows, cols };
    AppState::with_store(&hall, Arc::new(MemoryStore::new()))
        .await
        .unwrap()
}
