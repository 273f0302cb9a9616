use chrono::Utc;

use schedule_cell::models::{Clinic, DaySchedule, ScheduleSnapshot, SlotQuery};
use schedule_cell::services::search::{clinic_summaries, find_clinic, search_slots};

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
        doctor_name: Some(format!("Dr. {}", name)),
        procedure: Some("МРТ гипофиза".to_string()),
        price: Some("25000 тг".to_string()),
        address: Some("Almaty".to_string()),
        coordinates: None,
        schedule,
    }
}

fn snapshot(clinics: Vec<Clinic>) -> ScheduleSnapshot {
    ScheduleSnapshot::new("https://example.test", Utc::now(), clinics)
}

#[test]
fn name_and_time_range_filters_combine() {
    let snapshot = snapshot(vec![clinic(
        "Alatau",
        vec![day("Mon", "23 Oct", &["09:00", "14:00", "18:30"])],
    )]);

    let results = search_slots(
        &snapshot,
        &SlotQuery {
            clinic_name: Some("alatau".to_string()),
            time_from: Some("10:00".to_string()),
            time_to: Some("18:00".to_string()),
            ..Default::default()
        },
    );

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].clinic_name.as_deref(), Some("Alatau"));
    assert_eq!(results[0].available_times, vec!["14:00"]);
}

#[test]
fn unfiltered_search_returns_all_days_in_source_order() {
    // Second clinic only had empty days, which snapshot construction elides.
    let snapshot = snapshot(vec![
        clinic(
            "Alatau",
            vec![
                day("Чт", "23 окт.", &["09:00"]),
                day("Пт", "24 окт.", &["10:00", "11:00"]),
                day("Сб", "25 окт.", &["12:00"]),
            ],
        ),
        clinic("Medina", vec![day("Чт", "23 окт.", &[]), day("Пт", "24 окт.", &[])]),
    ]);

    let results = search_slots(&snapshot, &SlotQuery::default());

    assert_eq!(results.len(), 3);
    assert!(results.iter().all(|r| r.clinic_name.as_deref() == Some("Alatau")));
    assert_eq!(
        results.iter().map(|r| r.date.as_str()).collect::<Vec<_>>(),
        vec!["23 окт.", "24 окт.", "25 окт."]
    );
}

#[test]
fn day_filter_matches_day_or_date_label() {
    let snapshot = snapshot(vec![clinic(
        "Alatau",
        vec![
            day("Чт", "23 окт.", &["09:00"]),
            day("Пт", "24 окт.", &["10:00"]),
        ],
    )]);

    let by_day_label = search_slots(
        &snapshot,
        &SlotQuery { day: Some("чт".to_string()), ..Default::default() },
    );
    assert_eq!(by_day_label.len(), 1);
    assert_eq!(by_day_label[0].day, "Чт");

    let by_date_label = search_slots(
        &snapshot,
        &SlotQuery { day: Some("24 окт".to_string()), ..Default::default() },
    );
    assert_eq!(by_date_label.len(), 1);
    assert_eq!(by_date_label[0].date, "24 окт.");
}

#[test]
fn time_bounds_are_inclusive() {
    let snapshot = snapshot(vec![clinic(
        "Alatau",
        vec![day("Mon", "23 Oct", &["09:00", "14:00", "18:30"])],
    )]);

    let results = search_slots(
        &snapshot,
        &SlotQuery {
            time_from: Some("09:00".to_string()),
            time_to: Some("18:30".to_string()),
            ..Default::default()
        },
    );

    assert_eq!(results[0].available_times, vec!["09:00", "14:00", "18:30"]);
}

#[test]
fn non_matching_clinic_name_yields_no_results() {
    let snapshot = snapshot(vec![clinic("Alatau", vec![day("Mon", "23 Oct", &["09:00"])])]);

    let results = search_slots(
        &snapshot,
        &SlotQuery { clinic_name: Some("emirmed".to_string()), ..Default::default() },
    );

    assert!(results.is_empty());
}

#[test]
fn days_fully_filtered_out_are_omitted() {
    let snapshot = snapshot(vec![clinic(
        "Alatau",
        vec![day("Mon", "23 Oct", &["09:00"]), day("Tue", "24 Oct", &["15:00"])],
    )]);

    let results = search_slots(
        &snapshot,
        &SlotQuery { time_from: Some("12:00".to_string()), ..Default::default() },
    );

    assert_eq!(results.len(), 1, "a day with no surviving times emits no record");
    assert_eq!(results[0].day, "Tue");
}

#[test]
fn find_clinic_is_case_insensitive_substring_match() {
    let snapshot = snapshot(vec![
        clinic("Alatau Medical Center", vec![day("Mon", "23 Oct", &["09:00"])]),
        clinic("Medina", vec![day("Mon", "23 Oct", &["10:00"])]),
    ]);

    let found = find_clinic(&snapshot, "medina").expect("should match");
    assert_eq!(found.clinic_name.as_deref(), Some("Medina"));
    assert!(find_clinic(&snapshot, "nonexistent").is_none());
}

#[test]
fn clinic_summaries_carry_slot_counts() {
    let snapshot = snapshot(vec![
        clinic("Alatau", vec![day("Mon", "23 Oct", &["09:00", "10:00"])]),
        clinic("Medina", vec![day("Mon", "23 Oct", &["11:00"])]),
    ]);

    let summaries = clinic_summaries(&snapshot);

    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].available_slots, 2);
    assert_eq!(summaries[1].available_slots, 1);
}
