use serde::{Deserialize, Serialize};

/// Persisted state of one seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatSnapshot {
    pub x: i32,
    pub y: i32,
    pub reserved: bool,
    pub distance_to_center: i32,
}

/// Persisted state of a whole hall, seats in row-major order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HallSnapshot {
    pub rows: i32,
    pub cols: i32,
    pub seats: Vec<SeatSnapshot>,
}

impl HallSnapshot {
    pub fn reserved(&self) -> impl Iterator<Item = &SeatSnapshot> {
        self.seats.iter().filter(|s| s.reserved)
    }
}
