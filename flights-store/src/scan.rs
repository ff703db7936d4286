//! Cancellable row scanning for multi-row queries.

use futures_util::{Stream, StreamExt};
use tokio_util::sync::CancellationToken;

#[derive(Debug, PartialEq)]
pub enum ScanError<E> {
    Cancelled,
    Failed(E),
}

/// Drains `rows`, decoding each one, unless `ctx` fires first.
///
/// Yields the complete list, the first row or decode error, or `Cancelled`,
/// and nothing else. A token that is already cancelled wins before the
/// stream is polled. Dropping the stream (and with it the cursor) is left to
/// the caller.
pub async fn scan_cancellable<S, R, T, E, F>(
    rows: S,
    mut decode: F,
    ctx: &CancellationToken,
) -> Result<Vec<T>, ScanError<E>>
where
    S: Stream<Item = Result<R, E>>,
    F: FnMut(R) -> Result<T, E>,
{
    let drain = async move {
        futures_util::pin_mut!(rows);
        let mut records = Vec::new();

        while let Some(row) = rows.next().await {
            let row = row.map_err(ScanError::Failed)?;
            records.push(decode(row).map_err(ScanError::Failed)?);
        }

        Ok(records)
    };

    tokio::select! {
        biased;
        _ = ctx.cancelled() => Err(ScanError::Cancelled),
        result = drain => result,
    }
}
