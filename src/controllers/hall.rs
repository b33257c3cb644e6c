use axum::{extract::State, routing::get, Json, Router};
use std::sync::Arc;

use crate::hall::HallSnapshot;
use crate::services::HallSummary;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/hall", get(get_hall))
        .route("/hall/seats", get(get_hall_seats))
}

// GET /api/hall
pub async fn get_hall(State(state): State<Arc<AppState>>) -> Json<HallSummary> {
    Json(state.tickets.summary())
}

// GET /api/hall/seats
pub async fn get_hall_seats(State(state): State<Arc<AppState>>) -> Json<HallSnapshot> {
    Json(state.tickets.snapshot())
}
