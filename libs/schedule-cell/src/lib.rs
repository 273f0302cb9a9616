// =====================================================================================
// SCHEDULE CELL - CLINIC SCHEDULE CACHE & SEARCH
// =====================================================================================

pub mod models;
pub mod error;
pub mod handlers;
pub mod router;
pub mod services;

pub use error::ScheduleError;
pub use models::*;
pub use router::schedule_routes;
pub use services::cache::ScheduleCacheService;
pub use services::fetcher::{HttpScheduleFetcher, ScheduleFetcher};
