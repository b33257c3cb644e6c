use sqlx::FromRow;

#[derive(Debug, Clone, Copy, FromRow)]
pub struct HallRow {
    pub row_count: i32,
    pub col_count: i32,
}
