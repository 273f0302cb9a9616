use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("Schedule fetch failed: {0}")]
    Fetch(String),

    #[error("Schedule source error: {0}")]
    Source(#[from] reqwest::Error),

    #[error("Cache persistence failed: {0}")]
    Persistence(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("No schedule data available yet")]
    NoDataYet,
}
