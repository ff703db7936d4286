//! In-memory gateway used to drive the router without a database.

use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use flights_api::{app, AppState};
use flights_core::location::LocationFilter;
use flights_core::models::{Airport, Flight, Order, Seat};
use flights_core::pagination::clamp_limit;
use flights_core::{CancellationToken, CoreError, CoreResult, Gateway};
use flights_store::scan::{scan_cancellable, ScanError};
use futures_util::{stream, StreamExt};
use rust_decimal::Decimal;
use serde_json::Value;
use tower::ServiceExt;

struct SeatEntry {
    flight_id: i64,
    seat: Seat,
    booked: bool,
}

#[derive(Default)]
pub struct MemoryGateway {
    flights: Vec<Flight>,
    seats: Mutex<Vec<SeatEntry>>,
    row_delay: Option<Duration>,
    next_order_id: AtomicI64,
    /// Number of calls that reached storage.
    pub storage_calls: AtomicUsize,
}

pub fn airport(icao: &str, name: &str, state: &str, country: &str) -> Airport {
    Airport {
        icao: Some(icao.into()),
        iata: Some(icao[1..].into()),
        name: Some(name.into()),
        state: Some(state.into()),
        country: Some(country.into()),
    }
}

pub fn flight(id: i64, origin: Airport, destination: Airport) -> Flight {
    Flight {
        id,
        origin,
        destination,
        arrival: Some("2024-05-01 10:00:00".into()),
        departure: Some("2024-05-01 08:00:00".into()),
    }
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self {
            next_order_id: AtomicI64::new(1),
            ..Self::default()
        }
    }

    pub fn with_flight(mut self, flight: Flight) -> Self {
        self.flights.push(flight);
        self
    }

    pub fn with_seat(self, flight_id: i64, number: &str, class: &str, price: Decimal) -> Self {
        self.seats.lock().unwrap().push(SeatEntry {
            flight_id,
            seat: Seat {
                flight: None,
                number: number.into(),
                class: Some(class.into()),
                price: Some(price),
            },
            booked: false,
        });
        self
    }

    /// Each row takes `delay` to arrive, like a slow cursor.
    pub fn with_row_delay(mut self, delay: Duration) -> Self {
        self.row_delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.storage_calls.load(Ordering::SeqCst)
    }

    async fn scan<T: Send>(&self, ctx: &CancellationToken, rows: Vec<T>) -> CoreResult<Vec<T>> {
        self.storage_calls.fetch_add(1, Ordering::SeqCst);
        let delay = self.row_delay;

        let rows = stream::iter(rows).then(move |row| async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            Ok::<_, CoreError>(row)
        });

        scan_cancellable(rows, Ok, ctx).await.map_err(|e| match e {
            ScanError::Cancelled => CoreError::Cancelled,
            ScanError::Failed(e) => e,
        })
    }

    fn page(&self, location: Option<&LocationFilter>, limit: i64, offset: i64) -> Vec<Flight> {
        self.flights
            .iter()
            .filter(|f| location.map_or(true, |l| l.matches(f)))
            .skip(offset.max(0) as usize)
            .take(clamp_limit(limit).max(0) as usize)
            .map(|f| Flight {
                origin: Airport::located(f.origin.state.clone(), f.origin.country.clone()),
                destination: Airport::located(
                    f.destination.state.clone(),
                    f.destination.country.clone(),
                ),
                ..f.clone()
            })
            .collect()
    }
}

#[async_trait]
impl Gateway for MemoryGateway {
    async fn get_flight(&self, _ctx: &CancellationToken, id: i64) -> CoreResult<Flight> {
        self.storage_calls.fetch_add(1, Ordering::SeqCst);
        self.flights
            .iter()
            .find(|f| f.id == id)
            .cloned()
            .ok_or_else(|| CoreError::NotFound(format!("flight {} not found", id)))
    }

    async fn get_available_flights(
        &self,
        ctx: &CancellationToken,
        limit: i64,
        offset: i64,
    ) -> CoreResult<Vec<Flight>> {
        let rows = self.page(None, limit, offset);
        self.scan(ctx, rows).await
    }

    async fn get_available_flights_by_location(
        &self,
        ctx: &CancellationToken,
        location: &LocationFilter,
        limit: i64,
        offset: i64,
    ) -> CoreResult<Vec<Flight>> {
        let rows = self.page(Some(location), limit, offset);
        self.scan(ctx, rows).await
    }

    async fn get_available_seats(
        &self,
        ctx: &CancellationToken,
        flight_id: i64,
    ) -> CoreResult<Vec<Seat>> {
        let rows: Vec<Seat> = self
            .seats
            .lock()
            .unwrap()
            .iter()
            .filter(|entry| entry.flight_id == flight_id && !entry.booked)
            .map(|entry| entry.seat.clone())
            .collect();
        self.scan(ctx, rows).await
    }

    async fn create_order(&self, _ctx: &CancellationToken, order: Order) -> CoreResult<Order> {
        let request = order.validate()?;
        self.storage_calls.fetch_add(1, Ordering::SeqCst);

        let mut seats = self.seats.lock().unwrap();
        let entry = seats
            .iter_mut()
            .find(|e| {
                e.flight_id == request.flight_id
                    && e.seat.number == request.seat_number
                    && !e.booked
            })
            .ok_or_else(|| {
                CoreError::Storage(format!(
                    "seat {} on flight {} is not available",
                    request.seat_number, request.flight_id
                ))
            })?;

        entry.booked = true;
        let price = entry.seat.price.unwrap_or_default();
        let id = self.next_order_id.fetch_add(1, Ordering::SeqCst);

        Ok(order.confirmed(id, price))
    }

    async fn close(&self) {}
}

pub fn router(gateway: Arc<MemoryGateway>) -> Router {
    app(AppState::new(gateway, Duration::from_secs(5)))
}

pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}
