pub mod models;
pub mod pagination;
pub mod location;
pub mod repository;

pub use models::{Airport, Flight, Order, Seat};
pub use repository::Gateway;

/// Re-exported so gateway callers and implementations agree on the token type.
pub use tokio_util::sync::CancellationToken;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Storage(String),
    #[error("request cancelled")]
    Cancelled,
}

pub type CoreResult<T> = Result<T, CoreError>;
