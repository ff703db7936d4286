use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use flights_core::models::Order;

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/seats", post(book_seat))
}

/// POST /api/seats
/// Books one seat. The response carries the order id and the price the
/// backend charged; any client-supplied price is ignored.
pub async fn book_seat(
    State(state): State<AppState>,
    body: Result<Json<Order>, JsonRejection>,
) -> Result<(StatusCode, Json<Order>), AppError> {
    let Json(order) = body.map_err(|rejection| {
        tracing::debug!("Rejected order body: {}", rejection);
        AppError::BadRequest("Invalid order".to_string())
    })?;

    // Bookings are not raced against the request deadline: once the
    // procedure commits, the seat is taken regardless of the caller.
    let ctx = state.shutdown.child_token();

    let order = state
        .gateway
        .create_order(&ctx, order)
        .await
        .map_err(AppError::from_booking)?;

    Ok((StatusCode::CREATED, Json(order)))
}
