use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use crate::hall::Point;
use crate::services::ServiceError;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ticket", post(allocate_ticket))
}

#[derive(Debug, Deserialize, Validate)]
pub struct PreferredSeat {
    #[validate(range(min = 0))]
    pub row: i32,
    #[validate(range(min = 0))]
    pub column: i32,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct TicketResponse {
    pub row: i32,
    pub column: i32,
}

// POST /api/ticket
// An empty body, with or without a JSON content type, means no preference.
pub async fn allocate_ticket(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<TicketResponse>, (StatusCode, String)> {
    let preferred = match preferred_seat(&body)? {
        Some(seat) => {
            seat.validate()
                .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
            Some(Point::new(seat.row, seat.column))
        }
        None => None,
    };

    match state.tickets.allocate(preferred).await {
        Ok(Some(seat)) => Ok(Json(TicketResponse { row: seat.x, column: seat.y })),
        Ok(None) => Err((StatusCode::CONFLICT, "No seat available".to_string())),
        Err(ServiceError::Hall(e)) => Err((StatusCode::BAD_REQUEST, e.to_string())),
        Err(e) => {
            tracing::error!("allocate_ticket failed: {:?}", e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, "Could not allocate a seat".to_string()))
        }
    }
}

fn preferred_seat(body: &[u8]) -> Result<Option<PreferredSeat>, (StatusCode, String)> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    let Json(seat) = Json::<PreferredSeat>::from_bytes(body)
        .map_err(|e| (e.status(), e.body_text()))?;
    Ok(Some(seat))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn json(body: &'static str) -> Bytes {
        Bytes::from_static(body.as_bytes())
    }

    #[tokio::test]
    async fn without_body_allocates_the_center() {
        let state = crate::test_state(4, 4).await;
        let Json(ticket) = allocate_ticket(State(state), Bytes::new()).await.unwrap();
        assert_eq!(ticket, TicketResponse { row: 2, column: 2 });
    }

    #[tokio::test]
    async fn blank_body_allocates_the_center() {
        let state = crate::test_state(5, 5).await;
        let Json(ticket) = allocate_ticket(State(state), json(" \n")).await.unwrap();
        assert_eq!(ticket, TicketResponse { row: 2, column: 2 });
    }

    #[tokio::test]
    async fn malformed_body_is_rejected() {
        let state = crate::test_state(4, 4).await;
        let (status, _) = allocate_ticket(State(state.clone()), json("{\"row\": 1"))
            .await
            .unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(state.tickets.summary().reserved, 0);
    }

    #[tokio::test]
    async fn preferred_seat_is_used_as_origin() {
        let state = crate::test_state(4, 4).await;
        let body = json(r#"{"row": 0, "column": 0}"#);
        let Json(ticket) = allocate_ticket(State(state), body).await.unwrap();
        assert_eq!(ticket, TicketResponse { row: 0, column: 0 });
    }

    #[tokio::test]
    async fn negative_coordinates_fail_validation() {
        let state = crate::test_state(4, 4).await;
        let body = json(r#"{"row": -1, "column": 0}"#);
        let (status, _) = allocate_ticket(State(state.clone()), body).await.unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(state.tickets.summary().reserved, 0);
    }

    #[tokio::test]
    async fn seat_outside_hall_is_a_bad_request() {
        let state = crate::test_state(4, 4).await;
        let body = json(r#"{"row": 4, "column": 1}"#);
        let (status, message) = allocate_ticket(State(state), body).await.unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(message.contains("outside the hall"));
    }

    #[tokio::test]
    async fn full_hall_answers_conflict() {
        let state = crate::test_state(1, 1).await;
        allocate_ticket(State(state.clone()), Bytes::new()).await.unwrap();
        let (status, _) = allocate_ticket(State(state), Bytes::new()).await.unwrap_err();
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[test]
    fn preferred_seat_parses_from_json() {
        let seat: PreferredSeat = serde_json::from_str(r#"{"row": 3, "column": 7}"#).unwrap();
        assert_eq!((seat.row, seat.column), (3, 7));
        assert!(seat.validate().is_ok());
    }
}
