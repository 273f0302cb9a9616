use std::env;
use std::time::Duration;
use tracing::warn;

const DEFAULT_SOURCE_URL: &str = "https://doq.kz/doctors/almaty/mrt-gipofiza";
const DEFAULT_CACHE_FILE: &str = "data/clinic_schedule_cache.json";
const DEFAULT_TTL_MINUTES: u64 = 15;
const DEFAULT_WAIT_TIMEOUT_SECS: u64 = 60;
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub schedule_source_url: String,
    pub cache_file_path: String,
    pub cache_ttl_minutes: u64,
    pub refresh_wait_timeout_secs: u64,
    pub fetch_timeout_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            schedule_source_url: env::var("SCHEDULE_SOURCE_URL")
                .unwrap_or_else(|_| {
                    warn!("SCHEDULE_SOURCE_URL not set, using default");
                    DEFAULT_SOURCE_URL.to_string()
                }),
            cache_file_path: env::var("SCHEDULE_CACHE_FILE")
                .unwrap_or_else(|_| {
                    warn!("SCHEDULE_CACHE_FILE not set, using default");
                    DEFAULT_CACHE_FILE.to_string()
                }),
            cache_ttl_minutes: parse_env_u64("SCHEDULE_CACHE_TTL_MINUTES", DEFAULT_TTL_MINUTES),
            refresh_wait_timeout_secs: parse_env_u64(
                "SCHEDULE_WAIT_TIMEOUT_SECS",
                DEFAULT_WAIT_TIMEOUT_SECS,
            ),
            fetch_timeout_secs: parse_env_u64(
                "SCHEDULE_FETCH_TIMEOUT_SECS",
                DEFAULT_FETCH_TIMEOUT_SECS,
            ),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.schedule_source_url.is_empty() && !self.cache_file_path.is_empty()
    }

    pub fn ttl(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.cache_ttl_minutes as i64)
    }

    pub fn wait_timeout(&self) -> Duration {
        Duration::from_secs(self.refresh_wait_timeout_secs)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

fn parse_env_u64(name: &str, default: u64) -> u64 {
    match env::var(name) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("{} has invalid value {:?}, using default {}", name, raw, default);
            default
        }),
        Err(_) => default,
    }
}
