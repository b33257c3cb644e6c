use async_trait::async_trait;
use sqlx::{Postgres, QueryBuilder};
use tracing::info;

use super::{SeatStore, StoreError};
use crate::database::Database;
use crate::hall::{HallSnapshot, SeatSnapshot};
use crate::models::{HallRow, SeatRow};

// 4 binds per seat, well under the 65535 bind limit
const INSERT_BATCH: usize = 1000;

/// Hall state in Postgres: one row in `hall`, one row per seat in `seats`.
#[derive(Clone)]
pub struct PgSeatStore {
    db: Database,
}

impl PgSeatStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SeatStore for PgSeatStore {
    async fn load_hall(&self) -> Result<Option<HallSnapshot>, StoreError> {
        let hall = sqlx::query_as::<_, HallRow>(
            "SELECT row_count, col_count FROM hall WHERE id = 1"
        )
        .fetch_optional(&self.db.pool)
        .await?;

        let Some(hall) = hall else {
            return Ok(None);
        };

        let seats = sqlx::query_as::<_, SeatRow>(
            "SELECT seat_row, seat_col, distance_to_center, reserved
             FROM seats
             ORDER BY seat_row, seat_col"
        )
        .fetch_all(&self.db.pool)
        .await?;

        info!("Loaded hall {}x{} with {} seats", hall.row_count, hall.col_count, seats.len());

        Ok(Some(HallSnapshot {
            rows: hall.row_count,
            cols: hall.col_count,
            seats: seats.into_iter().map(SeatSnapshot::from).collect(),
        }))
    }

    async fn save_hall(&self, snapshot: &HallSnapshot) -> Result<(), StoreError> {
        let mut tx = self.db.pool.begin().await?;

        sqlx::query("DELETE FROM seats").execute(&mut *tx).await?;

        sqlx::query(
            "INSERT INTO hall (id, row_count, col_count) VALUES (1, $1, $2)
             ON CONFLICT (id) DO UPDATE
             SET row_count = EXCLUDED.row_count, col_count = EXCLUDED.col_count"
        )
        .bind(snapshot.rows)
        .bind(snapshot.cols)
        .execute(&mut *tx)
        .await?;

        for chunk in snapshot.seats.chunks(INSERT_BATCH) {
            let mut builder = QueryBuilder::<Postgres>::new(
                "INSERT INTO seats (seat_row, seat_col, distance_to_center, reserved) "
            );
            builder.push_values(chunk, |mut row, seat| {
                row.push_bind(seat.x)
                    .push_bind(seat.y)
                    .push_bind(seat.distance_to_center)
                    .push_bind(seat.reserved);
            });
            builder.build().execute(&mut *tx).await?;
        }

        tx.commit().await?;
        info!("Saved hall {}x{}", snapshot.rows, snapshot.cols);
        Ok(())
    }

    async fn mark_reserved(&self, seat: &SeatSnapshot) -> Result<(), StoreError> {
        let updated = sqlx::query(
            "UPDATE seats SET reserved = TRUE WHERE seat_row = $1 AND seat_col = $2"
        )
        .bind(seat.x)
        .bind(seat.y)
        .execute(&self.db.pool)
        .await?
        .rows_affected();

        if updated == 0 {
            return Err(StoreError::UnknownSeat { x: seat.x, y: seat.y });
        }
        Ok(())
    }
}
