use std::sync::Arc;
use std::time::Duration;

use flights_core::{CancellationToken, Gateway};
use tokio_util::sync::DropGuard;

#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<dyn Gateway>,
    pub query_timeout: Duration,
    /// Cancelled when the shutdown grace period runs out.
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(gateway: Arc<dyn Gateway>, query_timeout: Duration) -> Self {
        Self {
            gateway,
            query_timeout,
            shutdown: CancellationToken::new(),
        }
    }

    /// Token for one request's queries. It fires on shutdown, after
    /// `query_timeout`, or when the returned guard is dropped.
    pub fn query_context(&self) -> (CancellationToken, DropGuard) {
        let ctx = self.shutdown.child_token();
        let timer = ctx.clone();
        let timeout = self.query_timeout;

        tokio::spawn(async move {
            tokio::select! {
                _ = tokio::time::sleep(timeout) => {
                    tracing::debug!("Query timeout of {:?} elapsed", timeout);
                    timer.cancel();
                }
                _ = timer.cancelled() => {}
            }
        });

        (ctx.clone(), ctx.drop_guard())
    }
}
