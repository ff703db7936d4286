use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::location::LocationFilter;
use crate::models::{Flight, Order, Seat};
use crate::CoreResult;

/// Data access for flights, seats and orders.
///
/// Every method takes the caller's cancellation token. Multi-row reads abort
/// with [`crate::CoreError::Cancelled`] when it fires; single-row lookups and
/// order creation accept it but run to completion.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Full flight record with both airports. A missing id is `NotFound`.
    async fn get_flight(&self, ctx: &CancellationToken, id: i64) -> CoreResult<Flight>;

    /// Available flights with state/country-only airports. `limit` is clamped
    /// to [`crate::pagination::MAX_PAGE_SIZE`].
    async fn get_available_flights(
        &self,
        ctx: &CancellationToken,
        limit: i64,
        offset: i64,
    ) -> CoreResult<Vec<Flight>>;

    async fn get_available_flights_by_location(
        &self,
        ctx: &CancellationToken,
        location: &LocationFilter,
        limit: i64,
        offset: i64,
    ) -> CoreResult<Vec<Flight>>;

    async fn get_available_seats(
        &self,
        ctx: &CancellationToken,
        flight_id: i64,
    ) -> CoreResult<Vec<Seat>>;

    /// Validates the order, then books the seat. Returns the order with its
    /// assigned id and the seat price set by the backend.
    async fn create_order(&self, ctx: &CancellationToken, order: Order) -> CoreResult<Order>;

    /// Releases held resources. Called once at shutdown; repeated calls are harmless.
    async fn close(&self);
}
