use crate::models::{Clinic, ClinicSummary, MatchedSlot, ScheduleSnapshot, SlotQuery};

/// Filters the snapshot by day/date token, time-of-day range, and clinic name
/// substring. Single pass, output in source order (clinics, then their days);
/// no ranking. Day matches against either the weekday label or the date label,
/// case-insensitively. Time bounds compare `HH:MM` strings lexicographically,
/// which is chronological for zero-padded times, and are inclusive.
pub fn search_slots(snapshot: &ScheduleSnapshot, query: &SlotQuery) -> Vec<MatchedSlot> {
    let mut results = Vec::new();

    for clinic in &snapshot.clinics {
        if let Some(name_filter) = &query.clinic_name {
            if !contains_ignore_case(clinic.clinic_name.as_deref(), name_filter) {
                continue;
            }
        }

        for day_schedule in &clinic.schedule {
            if let Some(day_filter) = &query.day {
                let matches_day = contains_ignore_case(Some(&day_schedule.day), day_filter)
                    || contains_ignore_case(Some(&day_schedule.date), day_filter);
                if !matches_day {
                    continue;
                }
            }

            let times: Vec<String> = day_schedule
                .times
                .iter()
                .filter(|t| {
                    query.time_from.as_deref().map_or(true, |from| t.as_str() >= from)
                        && query.time_to.as_deref().map_or(true, |to| t.as_str() <= to)
                })
                .cloned()
                .collect();

            if !times.is_empty() {
                results.push(MatchedSlot {
                    clinic_name: clinic.clinic_name.clone(),
                    doctor_name: clinic.doctor_name.clone(),
                    address: clinic.address.clone(),
                    price: clinic.price.clone(),
                    coordinates: clinic.coordinates,
                    day: day_schedule.day.clone(),
                    date: day_schedule.date.clone(),
                    available_times: times,
                });
            }
        }
    }

    results
}

/// First clinic whose name contains `name`, case-insensitively.
pub fn find_clinic<'a>(snapshot: &'a ScheduleSnapshot, name: &str) -> Option<&'a Clinic> {
    snapshot
        .clinics
        .iter()
        .find(|clinic| contains_ignore_case(clinic.clinic_name.as_deref(), name))
}

pub fn clinic_summaries(snapshot: &ScheduleSnapshot) -> Vec<ClinicSummary> {
    snapshot
        .clinics
        .iter()
        .map(|clinic| ClinicSummary {
            clinic_name: clinic.clinic_name.clone(),
            doctor_name: clinic.doctor_name.clone(),
            price: clinic.price.clone(),
            address: clinic.address.clone(),
            available_slots: clinic.available_slots(),
        })
        .collect()
}

fn contains_ignore_case(haystack: Option<&str>, needle: &str) -> bool {
    haystack
        .map(|h| h.to_lowercase().contains(&needle.to_lowercase()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_ignore_case_handles_absent_field() {
        assert!(!contains_ignore_case(None, "alatau"));
        assert!(contains_ignore_case(Some("Alatau Clinic"), "ALATAU"));
    }
}
