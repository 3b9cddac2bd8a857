use std::net::SocketAddr;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use lxbus_server::registry::RequestRegistry;
use lxbus_server::web::{AppState, create_router};

/// How often the expiry sweep runs.
const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// How long a request may stay pending before it is expired.
///
/// The web client gives up polling after about two minutes, so ten
/// minutes is comfortably past any live poller.
const REQUEST_TTL_MINS: i64 = 10;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Build app state around a fresh registry
    let state = AppState::new(RequestRegistry::new());

    // Spawn background task to expire stale pending requests
    let sweeper = state.registry.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SWEEP_INTERVAL);
        interval.tick().await; // First tick is immediate, skip it
        loop {
            interval.tick().await;
            let cutoff = chrono::Utc::now() - chrono::Duration::minutes(REQUEST_TTL_MINS);
            let expired = sweeper.sweep_expired(cutoff);
            if expired > 0 {
                tracing::info!(expired, "expired stale pending requests");
            }
        }
    });

    // Create router
    let app = create_router(state);

    // Bind and serve
    let addr: SocketAddr = std::env::var("LXBUS_ADDR")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], 3000)));

    println!("Lxbus arrival bridge listening on http://{addr}");
    println!();
    println!("API Endpoints:");
    println!("  GET  /health            - Health check");
    println!("  POST /api/requests      - New arrival lookup");
    println!("  GET  /api/requests/:id  - Poll a lookup");
    println!("  POST /api/mail/inbound  - Provider mail webhook");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
