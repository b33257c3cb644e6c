//! Persistence boundary for hall state.
//!
//! The allocator keeps the live hall in memory; a [`SeatStore`] holds the
//! snapshot it is rebuilt from at startup and receives every newly reserved
//! seat afterwards.

use async_trait::async_trait;
use thiserror::Error;

use crate::hall::{HallSnapshot, SeatSnapshot};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgSeatStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("no hall has been saved yet")]
    NoHall,

    #[error("seat ({x}, {y}) is not part of the stored hall")]
    UnknownSeat { x: i32, y: i32 },
}

#[async_trait]
pub trait SeatStore: Send + Sync + 'static {
    /// The stored hall, or `None` before the first save.
    async fn load_hall(&self) -> Result<Option<HallSnapshot>, StoreError>;

    /// Replace whatever is stored with `snapshot`.
    async fn save_hall(&self, snapshot: &HallSnapshot) -> Result<(), StoreError>;

    /// Record that one seat of the stored hall is now reserved.
    async fn mark_reserved(&self, seat: &SeatSnapshot) -> Result<(), StoreError>;
}
