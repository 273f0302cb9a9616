use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use schedule_cell::router::schedule_routes;
use schedule_cell::services::cache::ScheduleCacheService;

pub fn create_router(cache: Arc<ScheduleCacheService>) -> Router {
    Router::new()
        .route("/", get(|| async { "MRT Navigator API is running!" }))
        .nest("/api/v1/schedule", schedule_routes(cache))
}
