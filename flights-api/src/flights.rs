use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use flights_core::location::LocationFilter;
use flights_core::models::{Flight, Seat};
use flights_core::pagination::Page;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct FlightsQuery {
    pub page: Option<String>,
    pub page_size: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FlightsResponse {
    pub flights: Vec<Flight>,
}

#[derive(Debug, Serialize)]
pub struct SeatsResponse {
    pub seats: Vec<Seat>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/flights", get(list_flights))
        .route("/api/flights/{id}", get(get_flight))
        .route("/api/flights/{id}/seats", get(list_seats))
}

fn parse_number(value: Option<&str>, message: &str) -> Result<i64, AppError> {
    value
        .and_then(|v| v.trim().parse::<i64>().ok())
        .ok_or_else(|| AppError::BadRequest(message.to_string()))
}

fn parse_flight_id(raw: &str) -> Result<i64, AppError> {
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(AppError::BadRequest("Invalid flight id".to_string())),
    }
}

/// GET /api/flights?page=&page_size=[&city=&country=]
/// `page` is 1-based. Location filtering applies only when both
/// `city` and `country` are given.
pub async fn list_flights(
    State(state): State<AppState>,
    Query(query): Query<FlightsQuery>,
) -> Result<Json<FlightsResponse>, AppError> {
    let page = parse_number(query.page.as_deref(), "Invalid page number")?;
    let page_size = parse_number(query.page_size.as_deref(), "Invalid page size")?;
    let page = Page::new(page, page_size)?;

    let (ctx, _guard) = state.query_context();
    let location = LocationFilter::from_params(query.city.as_deref(), query.country.as_deref());

    let flights = match location {
        Some(location) => {
            state
                .gateway
                .get_available_flights_by_location(&ctx, &location, page.limit, page.offset)
                .await?
        }
        None => {
            state
                .gateway
                .get_available_flights(&ctx, page.limit, page.offset)
                .await?
        }
    };

    Ok(Json(FlightsResponse { flights }))
}

/// GET /api/flights/{id}
pub async fn get_flight(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Flight>, AppError> {
    let id = parse_flight_id(&id)?;
    let (ctx, _guard) = state.query_context();

    let flight = state.gateway.get_flight(&ctx, id).await?;
    Ok(Json(flight))
}

/// GET /api/flights/{id}/seats
pub async fn list_seats(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SeatsResponse>, AppError> {
    let flight_id = parse_flight_id(&id)?;
    let (ctx, _guard) = state.query_context();

    let seats = state.gateway.get_available_seats(&ctx, flight_id).await?;
    Ok(Json(SeatsResponse { seats }))
}
