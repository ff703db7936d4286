use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool};
use tracing::{error, info, warn};

use flights_core::location::LocationFilter;
use flights_core::models::{Airport, Flight, Order, Seat};
use flights_core::pagination::clamp_limit;
use flights_core::repository::Gateway;
use flights_core::{CancellationToken, CoreError, CoreResult};

use crate::scan::{scan_cancellable, ScanError};
use crate::statements;

/// Postgres-backed [`Gateway`]. Reads go through the `available_*` views;
/// bookings go through the `create_order` procedure, which owns seat
/// availability checks and locking.
pub struct PostgresGateway {
    pool: PgPool,
}

impl PostgresGateway {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

// Row types for the queries in `statements`

#[derive(FromRow)]
struct FlightRow {
    id: i64,
    arrival: Option<String>,
    departure: Option<String>,
    origin_icao: Option<String>,
    origin_iata: Option<String>,
    origin_name: Option<String>,
    origin_state: Option<String>,
    origin_country: Option<String>,
    destination_icao: Option<String>,
    destination_iata: Option<String>,
    destination_name: Option<String>,
    destination_state: Option<String>,
    destination_country: Option<String>,
}

impl From<FlightRow> for Flight {
    fn from(row: FlightRow) -> Self {
        Flight {
            id: row.id,
            origin: Airport {
                icao: row.origin_icao,
                iata: row.origin_iata,
                name: row.origin_name,
                state: row.origin_state,
                country: row.origin_country,
            },
            destination: Airport {
                icao: row.destination_icao,
                iata: row.destination_iata,
                name: row.destination_name,
                state: row.destination_state,
                country: row.destination_country,
            },
            arrival: row.arrival,
            departure: row.departure,
        }
    }
}

#[derive(FromRow)]
struct AvailableFlightRow {
    flight_id: i64,
    arrival: Option<String>,
    departure: Option<String>,
    departure_state: Option<String>,
    departure_country: Option<String>,
    arrival_state: Option<String>,
    arrival_country: Option<String>,
}

impl From<AvailableFlightRow> for Flight {
    fn from(row: AvailableFlightRow) -> Self {
        Flight {
            id: row.flight_id,
            origin: Airport::located(row.departure_state, row.departure_country),
            destination: Airport::located(row.arrival_state, row.arrival_country),
            arrival: row.arrival,
            departure: row.departure,
        }
    }
}

#[derive(FromRow)]
struct SeatRow {
    seat_number: String,
    class: Option<String>,
    price: Option<Decimal>,
}

impl From<SeatRow> for Seat {
    fn from(row: SeatRow) -> Self {
        Seat {
            flight: None,
            number: row.seat_number,
            class: row.class,
            price: row.price,
        }
    }
}

#[derive(FromRow)]
struct CreatedOrderRow {
    order_id: i64,
    price: Decimal,
}

fn decode_available_flight(row: PgRow) -> Result<Flight, sqlx::Error> {
    AvailableFlightRow::from_row(&row).map(Flight::from)
}

fn decode_seat(row: PgRow) -> Result<Seat, sqlx::Error> {
    SeatRow::from_row(&row).map(Seat::from)
}

/// Keeps the backend's own message; for database errors that is the text
/// raised by Postgres or the booking procedure.
fn storage_error(err: sqlx::Error) -> CoreError {
    match err {
        sqlx::Error::Database(db) => CoreError::Storage(db.message().to_string()),
        other => CoreError::Storage(other.to_string()),
    }
}

fn scan_error(err: ScanError<sqlx::Error>, query: &str) -> CoreError {
    match err {
        ScanError::Cancelled => {
            warn!("{} query cancelled", query);
            CoreError::Cancelled
        }
        ScanError::Failed(e) => {
            error!("{} query failed: {}", query, e);
            storage_error(e)
        }
    }
}

#[async_trait]
impl Gateway for PostgresGateway {
    async fn get_flight(&self, _ctx: &CancellationToken, id: i64) -> CoreResult<Flight> {
        let row = sqlx::query_as::<_, FlightRow>(statements::GET_FLIGHT)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?;

        row.map(Flight::from)
            .ok_or_else(|| CoreError::NotFound(format!("flight {} not found", id)))
    }

    async fn get_available_flights(
        &self,
        ctx: &CancellationToken,
        limit: i64,
        offset: i64,
    ) -> CoreResult<Vec<Flight>> {
        let rows = sqlx::query(statements::GET_AVAILABLE_FLIGHTS)
            .bind(clamp_limit(limit))
            .bind(offset)
            .fetch(&self.pool);

        scan_cancellable(rows, decode_available_flight, ctx)
            .await
            .map_err(|e| scan_error(e, "available flights"))
    }

    async fn get_available_flights_by_location(
        &self,
        ctx: &CancellationToken,
        location: &LocationFilter,
        limit: i64,
        offset: i64,
    ) -> CoreResult<Vec<Flight>> {
        let rows = sqlx::query(statements::GET_AVAILABLE_FLIGHTS_BY_LOCATION)
            .bind(&location.state)
            .bind(&location.country)
            .bind(clamp_limit(limit))
            .bind(offset)
            .fetch(&self.pool);

        scan_cancellable(rows, decode_available_flight, ctx)
            .await
            .map_err(|e| scan_error(e, "available flights by location"))
    }

    async fn get_available_seats(
        &self,
        ctx: &CancellationToken,
        flight_id: i64,
    ) -> CoreResult<Vec<Seat>> {
        let rows = sqlx::query(statements::GET_AVAILABLE_SEATS)
            .bind(flight_id)
            .fetch(&self.pool);

        scan_cancellable(rows, decode_seat, ctx)
            .await
            .map_err(|e| scan_error(e, "available seats"))
    }

    async fn create_order(&self, _ctx: &CancellationToken, order: Order) -> CoreResult<Order> {
        let request = order.validate()?;

        let created = sqlx::query_as::<_, CreatedOrderRow>(statements::CREATE_ORDER)
            .bind(&request.email)
            .bind(&request.first_name)
            .bind(&request.last_name)
            .bind(request.flight_id)
            .bind(&request.seat_number)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                warn!(
                    flight_id = request.flight_id,
                    seat = %request.seat_number,
                    "Order rejected: {}", e
                );
                storage_error(e)
            })?;

        info!(
            order_id = created.order_id,
            flight_id = request.flight_id,
            seat = %request.seat_number,
            "Order created"
        );

        Ok(order.confirmed(created.order_id, created.price))
    }

    async fn close(&self) {
        if self.pool.is_closed() {
            return;
        }
        self.pool.close().await;
        info!("Closed database connection pool");
    }
}
