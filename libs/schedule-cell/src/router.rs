// =====================================================================================
// SCHEDULE CELL ROUTER
// =====================================================================================

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::handlers::{
    get_all_clinics, get_cache_status, get_clinic_info, refresh_schedule,
    search_available_slots,
};
use crate::services::cache::ScheduleCacheService;

/// Routes for the schedule cache cell. Takes the process-wide cache service
/// built by the composition root so tests can wire in their own fetcher.
pub fn schedule_routes(cache: Arc<ScheduleCacheService>) -> Router {
    Router::new()
        .route("/slots", get(search_available_slots))
        .route("/clinics", get(get_all_clinics))
        .route("/clinics/info", get(get_clinic_info))
        .route("/refresh", post(refresh_schedule))
        .route("/status", get(get_cache_status))
        .with_state(cache)
}
