use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use flights_api::shutdown::{server_outcome, shutdown_signal};
use flights_api::{app, AppState};
use flights_core::{CancellationToken, Gateway};
use flights_store::{app_config::Config, DbClient, PostgresGateway};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "flights_api=debug,flights_store=debug,tower_http=debug,axum::rejection=trace"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!("Starting Flights API on port {}", config.server.port);

    let db = DbClient::new(&config.database)
        .await
        .context("Failed to connect to database")?;
    let gateway: Arc<dyn Gateway> = Arc::new(PostgresGateway::new(db.pool));

    let app_state = AppState::new(gateway.clone(), config.server.query_timeout());
    let queries = app_state.shutdown.clone();
    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Listening on {}", addr);
    if !config.server.production {
        tracing::info!("   http://localhost:{}", config.server.port);
    }

    let stop_accepting = CancellationToken::new();
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(stop_accepting.clone().cancelled_owned());
    let mut server = tokio::spawn(async move { server.await });

    let outcome = tokio::select! {
        result = &mut server => server_outcome(result),
        _ = shutdown_signal() => {
            tracing::info!("Gracefully shutting down");
            stop_accepting.cancel();

            let grace = config.server.shutdown_grace();
            match tokio::time::timeout(grace, &mut server).await {
                Ok(result) => server_outcome(result),
                Err(_) => {
                    tracing::warn!(
                        "In-flight requests still running after {:?}; cancelling queries",
                        grace
                    );
                    queries.cancel();
                    server.abort();
                    Ok(())
                }
            }
        }
    };

    gateway.close().await;
    outcome
}
