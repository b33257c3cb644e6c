use sqlx::FromRow;

use crate::hall::SeatSnapshot;

#[derive(Debug, Clone, Copy, FromRow)]
pub struct SeatRow {
    pub seat_row: i32,
    pub seat_col: i32,
    pub distance_to_center: i32,
    pub reserved: bool,
}

impl From<SeatRow> for SeatSnapshot {
    fn from(row: SeatRow) -> Self {
        SeatSnapshot {
            x: row.seat_row,
            y: row.seat_col,
            reserved: row.reserved,
            distance_to_center: row.distance_to_center,
        }
    }
}
