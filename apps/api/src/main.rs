use std::net::SocketAddr;
use std::sync::Arc;
use dotenv::dotenv;
use tokio::net::TcpListener;
use tower_http::cors::{CorsLayer, Any};
use tower_http::trace::{self, TraceLayer};
use tracing::{Level, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod router;

use schedule_cell::services::cache::ScheduleCacheService;
use schedule_cell::services::fetcher::HttpScheduleFetcher;
use schedule_cell::services::persistence::SnapshotStore;
use shared_config::AppConfig;

#[tokio::main]
async fn main() {
    // Loading Env Vars
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting MRT Navigator API server");

    // Load configuration
    let config = AppConfig::from_env();

    // The one process-wide schedule cache; constructed here and handed to the
    // router by reference, never a global.
    let fetcher = Arc::new(HttpScheduleFetcher::new(&config));
    let store = SnapshotStore::new(&config.cache_file_path);
    let cache = Arc::new(ScheduleCacheService::new(
        fetcher,
        store,
        config.ttl(),
        config.wait_timeout(),
    ));

    // Warm the cache in the background so the first chat query does not pay
    // for the full fetch.
    let warmup = Arc::clone(&cache);
    tokio::spawn(async move {
        info!("warming schedule cache");
        warmup.get_schedule(false).await;
    });

    // Set up CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the application router
    let app = router::create_router(cache)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(trace::DefaultMakeSpan::new()
                    .level(Level::INFO))
                .on_response(trace::DefaultOnResponse::new()
                    .level(Level::INFO)),
        )
        .layer(cors);

    // Run the server
    let addr = SocketAddr::from(([0, 0, 0, 0], 3000));
    info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app)
        .await
        .unwrap();
}
