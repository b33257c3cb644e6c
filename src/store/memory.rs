use async_trait::async_trait;
use parking_lot::Mutex;

use super::{SeatStore, StoreError};
use crate::hall::{HallSnapshot, SeatSnapshot};

/// Process-local store, used when no database is configured and in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    hall: Mutex<Option<HallSnapshot>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hall(snapshot: HallSnapshot) -> Self {
        Self { hall: Mutex::new(Some(snapshot)) }
    }

    /// Copy of the stored snapshot.
    pub fn current(&self) -> Option<HallSnapshot> {
        self.hall.lock().clone()
    }
}

#[async_trait]
impl SeatStore for MemoryStore {
    async fn load_hall(&self) -> Result<Option<HallSnapshot>, StoreError> {
        Ok(self.current())
    }

    async fn save_hall(&self, snapshot: &HallSnapshot) -> Result<(), StoreError> {
        *self.hall.lock() = Some(snapshot.clone());
        Ok(())
    }

    async fn mark_reserved(&self, seat: &SeatSnapshot) -> Result<(), StoreError> {
        let mut guard = self.hall.lock();
        let hall = guard.as_mut().ok_or(StoreError::NoHall)?;
        let stored = hall
            .seats
            .iter_mut()
            .find(|s| s.x == seat.x && s.y == seat.y)
            .ok_or(StoreError::UnknownSeat { x: seat.x, y: seat.y })?;
        stored.reserved = true;
        Ok(())
    }
}
