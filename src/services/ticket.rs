//! ticket.rs
//!
//! Service layer between the HTTP handlers and the seat grid.
//!
//! The hall lives in memory for the whole process and is the source of truth
//! for allocation. The [`SeatStore`] is read once at startup to rebuild it and
//! written after every successful reservation, so a restart resumes with the
//! same reserved seats.

use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::config::HallConfig;
use crate::hall::{Hall, HallError, HallSnapshot, Point, SeatSnapshot};
use crate::store::{SeatStore, StoreError};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Hall(#[from] HallError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("allocation task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Counters exposed by `GET /api/hall`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HallSummary {
    pub rows: i32,
    pub cols: i32,
    pub center: Point,
    pub reserved: usize,
    pub total: usize,
}

#[derive(Clone)]
pub struct TicketService {
    hall: Arc<Hall>,
    store: Arc<dyn SeatStore>,
}

impl TicketService {
    /// Rebuild the hall from `store`, or create and persist a fresh one
    /// sized by `config` when nothing is stored yet.
    pub async fn bootstrap(store: Arc<dyn SeatStore>, config: &HallConfig) -> Result<Self, ServiceError> {
        let hall = match store.load_hall().await? {
            Some(snapshot) => {
                if (snapshot.rows, snapshot.cols) != (config.rows, config.cols) {
                    warn!(
                        "Stored hall is {}x{}, configured size {}x{} is ignored",
                        snapshot.rows, snapshot.cols, config.rows, config.cols
                    );
                }
                let hall = Hall::from_snapshot(snapshot)?;
                info!(
                    "Restored hall {}x{} with {} reserved seats",
                    hall.rows(),
                    hall.cols(),
                    hall.reserved_count()
                );
                hall
            }
            None => {
                let hall = Hall::new(config.rows, config.cols)?;
                store.save_hall(&hall.snapshot()).await?;
                info!("Created hall {}x{}", hall.rows(), hall.cols());
                hall
            }
        };

        Ok(Self { hall: Arc::new(hall), store })
    }

    pub fn hall(&self) -> &Arc<Hall> {
        &self.hall
    }

    /// Reserve a seat near `preferred` (the hall center when `None`) and
    /// persist it. `Ok(None)` means the hall has no seat left that keeps the
    /// buffer between reserved seats.
    pub async fn allocate(&self, preferred: Option<Point>) -> Result<Option<SeatSnapshot>, ServiceError> {
        let hall = Arc::clone(&self.hall);
        let taken = tokio::task::spawn_blocking(move || {
            let seat = match preferred {
                Some(origin) => hall.get_next_available_ticket_from(origin)?,
                None => hall.get_next_available_ticket(),
            };
            Ok::<_, HallError>(seat.map(|s| s.snapshot()))
        })
        .await??;

        let Some(seat) = taken else {
            info!("No seat available (preferred: {:?})", preferred);
            return Ok(None);
        };

        if let Err(e) = self.store.mark_reserved(&seat).await {
            error!("Seat ({}, {}) reserved but not persisted: {}", seat.x, seat.y, e);
            return Err(e.into());
        }

        info!("Allocated seat ({}, {})", seat.x, seat.y);
        Ok(Some(seat))
    }

    pub fn snapshot(&self) -> HallSnapshot {
        self.hall.snapshot()
    }

    pub fn summary(&self) -> HallSummary {
        HallSummary {
            rows: self.hall.rows(),
            cols: self.hall.cols(),
            center: self.hall.center().position(),
            reserved: self.hall.reserved_count(),
            total: self.hall.seats().count(),
        }
    }
}
