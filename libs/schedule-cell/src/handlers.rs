// =====================================================================================
// SCHEDULE CELL HANDLERS
// =====================================================================================

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::error::ScheduleError;
use crate::models::SlotQuery;
use crate::services::cache::ScheduleCacheService;
use crate::services::search::{clinic_summaries, find_clinic, search_slots};

/// Result caps carried over from the chat-tool layer this API serves: slot
/// searches return at most 10 matches, clinic detail at most 7 days.
const MAX_SLOT_RESULTS: usize = 10;
const MAX_SCHEDULE_DAYS: usize = 7;

#[derive(Debug, Deserialize)]
pub struct RefreshQuery {
    #[serde(default)]
    pub force: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct ClinicInfoQuery {
    pub name: String,
}

#[instrument(skip(cache))]
pub async fn search_available_slots(
    State(cache): State<Arc<ScheduleCacheService>>,
    Query(query): Query<SlotQuery>,
) -> Result<Json<serde_json::Value>, ScheduleError> {
    let snapshot = cache.get_schedule(false).await.ok_or(ScheduleError::NoDataYet)?;

    let results = search_slots(&snapshot, &query);
    info!(found = results.len(), "slot search completed");

    Ok(Json(serde_json::json!({
        "found": results.len(),
        "data_age_minutes": cache.age_minutes().await,
        "results": results.iter().take(MAX_SLOT_RESULTS).collect::<Vec<_>>(),
    })))
}

#[instrument(skip(cache))]
pub async fn get_all_clinics(
    State(cache): State<Arc<ScheduleCacheService>>,
) -> Result<Json<serde_json::Value>, ScheduleError> {
    let snapshot = cache.get_schedule(false).await.ok_or(ScheduleError::NoDataYet)?;

    let clinics = clinic_summaries(&snapshot);

    Ok(Json(serde_json::json!({
        "total_clinics": clinics.len(),
        "data_age_minutes": cache.age_minutes().await,
        "clinics": clinics,
    })))
}

#[instrument(skip(cache))]
pub async fn get_clinic_info(
    State(cache): State<Arc<ScheduleCacheService>>,
    Query(query): Query<ClinicInfoQuery>,
) -> Result<impl IntoResponse, ScheduleError> {
    let snapshot = cache.get_schedule(false).await.ok_or(ScheduleError::NoDataYet)?;

    let Some(clinic) = find_clinic(&snapshot, &query.name) else {
        return Ok((
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({
                "error": format!("Clinic '{}' not found", query.name)
            })),
        ));
    };

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({
            "clinic_name": clinic.clinic_name,
            "doctor_name": clinic.doctor_name,
            "procedure": clinic.procedure,
            "price": clinic.price,
            "address": clinic.address,
            "coordinates": clinic.coordinates,
            "total_available_slots": clinic.available_slots(),
            "schedule": clinic.schedule.iter().take(MAX_SCHEDULE_DAYS).collect::<Vec<_>>(),
        })),
    ))
}

#[instrument(skip(cache))]
pub async fn refresh_schedule(
    State(cache): State<Arc<ScheduleCacheService>>,
    Query(query): Query<RefreshQuery>,
) -> Result<Json<serde_json::Value>, ScheduleError> {
    let force = query.force.unwrap_or(true);
    let snapshot = cache.get_schedule(force).await.ok_or(ScheduleError::NoDataYet)?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "total_clinics": snapshot.total_clinics,
        "total_slots": snapshot.total_slots(),
        "fetched_at": snapshot.fetched_at,
    })))
}

#[instrument(skip(cache))]
pub async fn get_cache_status(
    State(cache): State<Arc<ScheduleCacheService>>,
) -> Json<serde_json::Value> {
    // Read-only diagnostic: reports on whatever is cached without triggering
    // a fetch.
    let snapshot = cache.current_snapshot().await;

    match snapshot {
        Some(snapshot) => Json(serde_json::json!({
            "cached": true,
            "data_age_minutes": cache.age_minutes().await,
            "total_clinics": snapshot.total_clinics,
            "total_slots": snapshot.total_slots(),
            "source_url": snapshot.source_url,
        })),
        None => Json(serde_json::json!({
            "cached": false,
            "data_age_minutes": cache.age_minutes().await,
        })),
    }
}

// =====================================================================================
// ERROR RESPONSE IMPLEMENTATION
// =====================================================================================

impl IntoResponse for ScheduleError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ScheduleError::NoDataYet => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Schedule data not loaded yet, try again later",
            ),
            ScheduleError::Fetch(_) | ScheduleError::Source(_) => {
                (StatusCode::BAD_GATEWAY, "Schedule source unavailable")
            }
            ScheduleError::Persistence(_) | ScheduleError::Serialization(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal schedule cache error")
            }
        };

        (status, Json(serde_json::json!({
            "error": message,
            "timestamp": chrono::Utc::now()
        }))).into_response()
    }
}
