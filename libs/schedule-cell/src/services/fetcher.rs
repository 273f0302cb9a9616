use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use shared_config::AppConfig;

use crate::error::ScheduleError;
use crate::models::{Clinic, Coordinates, DaySchedule, ScheduleSnapshot};

/// Boundary to the external schedule source. The fetch is long-running (tens
/// of seconds against the real site) and may fail; the cache coordinator
/// treats any error as "keep the old snapshot".
#[async_trait]
pub trait ScheduleFetcher: Send + Sync {
    async fn fetch(&self) -> Result<ScheduleSnapshot, ScheduleError>;
}

/// Production fetcher: pulls the clinic schedule feed as JSON over HTTP and
/// normalizes it into a snapshot.
pub struct HttpScheduleFetcher {
    client: Client,
    source_url: String,
}

impl HttpScheduleFetcher {
    pub fn new(config: &AppConfig) -> Self {
        let client = Client::builder()
            .timeout(config.fetch_timeout())
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            source_url: config.schedule_source_url.clone(),
        }
    }
}

#[async_trait]
impl ScheduleFetcher for HttpScheduleFetcher {
    async fn fetch(&self) -> Result<ScheduleSnapshot, ScheduleError> {
        debug!(url = %self.source_url, "fetching clinic schedule");

        let response = self.client.get(&self.source_url).send().await?;
        let response = response.error_for_status()?;
        let feed: ScheduleFeed = response.json().await?;

        let clinics: Vec<Clinic> = feed.clinics.into_iter().map(Clinic::from).collect();
        debug!(clinics = clinics.len(), "clinic feed parsed");

        Ok(ScheduleSnapshot::new(self.source_url.clone(), Utc::now(), clinics))
    }
}

// Wire shape of the schedule feed. Kept separate from the domain model so a
// partially-populated feed entry deserializes instead of failing the fetch.

#[derive(Debug, Deserialize)]
struct ScheduleFeed {
    #[serde(default)]
    clinics: Vec<FeedClinic>,
}

#[derive(Debug, Deserialize)]
struct FeedClinic {
    clinic_name: Option<String>,
    doctor_name: Option<String>,
    procedure: Option<String>,
    price: Option<String>,
    address: Option<String>,
    coordinates: Option<FeedCoordinates>,
    #[serde(default)]
    schedule: Vec<FeedDay>,
}

#[derive(Debug, Deserialize)]
struct FeedCoordinates {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Deserialize)]
struct FeedDay {
    #[serde(default)]
    day: String,
    #[serde(default)]
    date: String,
    #[serde(default)]
    times: Vec<String>,
}

impl From<FeedClinic> for Clinic {
    fn from(raw: FeedClinic) -> Self {
        Clinic {
            clinic_name: raw.clinic_name,
            doctor_name: raw.doctor_name,
            procedure: raw.procedure,
            price: raw.price,
            address: raw.address,
            coordinates: raw.coordinates.map(|c| Coordinates { lat: c.lat, lng: c.lng }),
            schedule: raw
                .schedule
                .into_iter()
                .map(|d| DaySchedule { day: d.day, date: d.date, times: d.times })
                .collect(),
        }
    }
}
