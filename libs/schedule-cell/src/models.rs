use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One complete fetched dataset. Immutable once constructed; the cache
/// replaces it wholesale on refresh, never edits it in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleSnapshot {
    pub fetched_at: DateTime<Utc>,
    pub source_url: String,
    pub total_clinics: usize,
    pub clinics: Vec<Clinic>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Clinic {
    pub clinic_name: Option<String>,
    pub doctor_name: Option<String>,
    pub procedure: Option<String>,
    pub price: Option<String>,
    pub address: Option<String>,
    pub coordinates: Option<Coordinates>,
    pub schedule: Vec<DaySchedule>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// One day of availability, labels kept verbatim as the source presents them
/// (weekday token and date token, no calendar parsing). Times are `HH:MM`
/// strings in source order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaySchedule {
    pub day: String,
    pub date: String,
    pub times: Vec<String>,
}

impl ScheduleSnapshot {
    /// Builds a snapshot from raw clinics, dropping day entries that carry no
    /// times. The cache never stores empty days.
    pub fn new(source_url: impl Into<String>, fetched_at: DateTime<Utc>, clinics: Vec<Clinic>) -> Self {
        let clinics: Vec<Clinic> = clinics
            .into_iter()
            .map(|mut clinic| {
                clinic.schedule.retain(|day| !day.times.is_empty());
                clinic
            })
            .collect();

        Self {
            fetched_at,
            source_url: source_url.into(),
            total_clinics: clinics.len(),
            clinics,
        }
    }

    /// Total slot count across all clinics and days.
    pub fn total_slots(&self) -> usize {
        self.clinics.iter().map(Clinic::available_slots).sum()
    }
}

impl Clinic {
    pub fn available_slots(&self) -> usize {
        self.schedule.iter().map(|day| day.times.len()).sum()
    }
}

/// One (clinic, day) pair with the times that survived filtering. The query
/// engine's output record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchedSlot {
    pub clinic_name: Option<String>,
    pub doctor_name: Option<String>,
    pub address: Option<String>,
    pub price: Option<String>,
    pub coordinates: Option<Coordinates>,
    pub day: String,
    pub date: String,
    pub available_times: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClinicSummary {
    pub clinic_name: Option<String>,
    pub doctor_name: Option<String>,
    pub price: Option<String>,
    pub address: Option<String>,
    pub available_slots: usize,
}

/// Search criteria for slot lookup. All fields optional; absent means
/// "don't filter on this".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SlotQuery {
    pub day: Option<String>,
    pub time_from: Option<String>,
    pub time_to: Option<String>,
    pub clinic_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(day: &str, date: &str, times: &[&str]) -> DaySchedule {
        DaySchedule {
            day: day.to_string(),
            date: date.to_string(),
            times: times.iter().map(|t| t.to_string()).collect(),
        }
    }

    fn clinic(name: &str, schedule: Vec<DaySchedule>) -> Clinic {
        Clinic {
            clinic_name: Some(name.to_string()),
            doctor_name: None,
            procedure: None,
            price: None,
            address: None,
            coordinates: None,
            schedule,
        }
    }

    #[test]
    fn snapshot_drops_empty_days() {
        let snapshot = ScheduleSnapshot::new(
            "https://example.test",
            Utc::now(),
            vec![clinic(
                "Alatau",
                vec![
                    day("Чт", "23 окт.", &["09:00", "14:00"]),
                    day("Пт", "24 окт.", &[]),
                ],
            )],
        );

        assert_eq!(snapshot.total_clinics, 1);
        assert_eq!(snapshot.clinics[0].schedule.len(), 1);
        assert_eq!(snapshot.clinics[0].schedule[0].day, "Чт");
    }

    #[test]
    fn slot_counts_sum_across_clinics_and_days() {
        let snapshot = ScheduleSnapshot::new(
            "https://example.test",
            Utc::now(),
            vec![
                clinic(
                    "Alatau",
                    vec![day("Чт", "23 окт.", &["09:00", "14:00"]), day("Пт", "24 окт.", &["10:00"])],
                ),
                clinic("Medina", vec![day("Сб", "25 окт.", &["11:30"])]),
            ],
        );

        assert_eq!(snapshot.clinics[0].available_slots(), 3);
        assert_eq!(snapshot.total_slots(), 4);
    }
}
