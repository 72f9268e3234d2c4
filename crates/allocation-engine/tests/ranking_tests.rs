//! Tests for side-panel ranking of candidate application events.

use allocation_engine::{
    earliest_schedule_start, rank_application_events, selected_application_events,
    selection_between, time_slot_matching_percentage, ApplicationEvent, ApplicationEventSchedule,
    DayOfWeek, Priority, SlotId,
};
use chrono::NaiveTime;

// ── Helpers ─────────────────────────────────────────────────────────────────

fn slot(key: &str) -> SlotId {
    key.parse().unwrap()
}

fn time(hms: &str) -> NaiveTime {
    NaiveTime::parse_from_str(hms, "%H:%M:%S").unwrap()
}

fn schedule(
    pk: u64,
    day: u8,
    begin: &str,
    end: &str,
    priority: Priority,
) -> ApplicationEventSchedule {
    ApplicationEventSchedule {
        pk,
        day: DayOfWeek::new(day).unwrap(),
        begin: time(begin),
        end: time(end),
        priority,
        result: None,
    }
}

fn primary(pk: u64, day: u8, begin: &str, end: &str) -> ApplicationEventSchedule {
    schedule(pk, day, begin, end, Priority::PRIMARY)
}

fn event(pk: u64, name: &str, schedules: Vec<ApplicationEventSchedule>) -> ApplicationEvent {
    ApplicationEvent {
        pk,
        name: name.to_string(),
        events_per_week: 1,
        min_duration: None,
        max_duration: None,
        schedules,
        application_pk: None,
        reservation_unit_pks: vec![],
    }
}

fn names(events: &[&ApplicationEvent]) -> Vec<String> {
    events.iter().map(|e| e.name.clone()).collect()
}

/// Wednesday 09:00-11:00, four slots.
fn selection() -> Vec<SlotId> {
    selection_between(slot("2-9-00"), slot("2-10-30"))
}

fn round() -> Vec<ApplicationEvent> {
    vec![
        event(
            1,
            "Gamma",
            vec![
                primary(10, 2, "10:30:00", "12:00:00"),
                primary(11, 5, "08:00:00", "09:00:00"),
            ],
        ),
        event(2, "Beta", vec![primary(20, 2, "10:00:00", "11:00:00")]),
        event(3, "Delta", vec![primary(30, 3, "09:00:00", "11:00:00")]),
        event(4, "Alpha", vec![primary(40, 2, "10:00:00", "12:00:00")]),
        event(5, "Epsilon", vec![schedule(50, 2, "09:00:00", "11:00:00", Priority::SECONDARY)]),
        event(6, "Zeta", vec![primary(60, 2, "09:00:00", "11:00:00")]),
        event(
            7,
            "Omega",
            vec![
                primary(70, 2, "10:00:00", "11:00:00"),
                primary(71, 0, "07:00:00", "08:00:00"),
            ],
        ),
    ]
}

// ── earliest_schedule_start ─────────────────────────────────────────────────

#[test]
fn earliest_start_of_nothing_is_none() {
    assert_eq!(earliest_schedule_start(&[]), None);
}

#[test]
fn earliest_start_ignores_day() {
    let a = primary(1, 0, "12:00:00", "13:00:00");
    let b = primary(2, 6, "08:30:00", "09:00:00");
    let c = primary(3, 3, "10:00:00", "11:00:00");
    assert_eq!(earliest_schedule_start(&[&a, &b, &c]), Some(time("08:30:00")));
}

// ── time_slot_matching_percentage ───────────────────────────────────────────

#[test]
fn percentage_is_share_of_selection_covered() {
    let half = primary(1, 2, "10:00:00", "12:00:00");
    let full = primary(2, 2, "08:00:00", "12:00:00");
    let none = primary(3, 4, "09:00:00", "11:00:00");

    assert_eq!(time_slot_matching_percentage(&selection(), &[&half]), 50.0);
    assert_eq!(time_slot_matching_percentage(&selection(), &[&full]), 100.0);
    assert_eq!(time_slot_matching_percentage(&selection(), &[&none]), 0.0);
    assert_eq!(time_slot_matching_percentage(&selection(), &[&half, &none]), 50.0);
}

#[test]
fn empty_selection_matches_zero_percent() {
    let s = primary(1, 2, "10:00:00", "12:00:00");
    assert_eq!(time_slot_matching_percentage(&[], &[&s]), 0.0);
}

// ── selected_application_events ─────────────────────────────────────────────

#[test]
fn ranked_by_percentage_then_earliest_start_then_name() {
    let events = round();

    let selected = selected_application_events(&events, &selection(), Priority::PRIMARY);

    // Zeta 100%; Omega, Alpha, Beta 50% with Omega starting 07:00; Gamma 25%.
    assert_eq!(names(&selected), ["Zeta", "Omega", "Alpha", "Beta", "Gamma"]);
}

#[test]
fn ranking_keys_are_reported() {
    let events = round();

    let ranked = rank_application_events(&events, &selection(), Priority::PRIMARY);

    let keys: Vec<(&str, f64, Option<NaiveTime>)> = ranked
        .iter()
        .map(|r| (r.event.name.as_str(), r.matching_percentage, r.earliest_start))
        .collect();
    assert_eq!(
        keys,
        [
            ("Zeta", 100.0, Some(time("09:00:00"))),
            ("Omega", 50.0, Some(time("07:00:00"))),
            ("Alpha", 50.0, Some(time("10:00:00"))),
            ("Beta", 50.0, Some(time("10:00:00"))),
            ("Gamma", 25.0, Some(time("08:00:00"))),
        ]
    );
}

#[test]
fn only_schedules_of_requested_priority_count() {
    let events = round();

    let selected = selected_application_events(&events, &selection(), Priority::SECONDARY);

    assert_eq!(names(&selected), ["Epsilon"]);
}

#[test]
fn equal_keys_keep_input_order() {
    let events = vec![
        event(1, "Twin", vec![primary(10, 2, "09:00:00", "10:00:00")]),
        event(2, "Twin", vec![primary(20, 2, "09:00:00", "10:00:00")]),
        event(3, "Twin", vec![primary(30, 2, "09:00:00", "10:00:00")]),
    ];

    let selected = selected_application_events(&events, &selection(), Priority::PRIMARY);

    let pks: Vec<u64> = selected.iter().map(|e| e.pk).collect();
    assert_eq!(pks, [1, 2, 3]);
}

#[test]
fn empty_selection_selects_nothing() {
    let events = round();
    assert!(selected_application_events(&events, &[], Priority::PRIMARY).is_empty());
}

#[test]
fn ranked_events_serialise_with_event_payload() {
    let events = vec![event(9, "Judo", vec![primary(90, 2, "09:00:00", "10:00:00")])];

    let ranked = rank_application_events(&events, &selection(), Priority::PRIMARY);
    let json = serde_json::to_value(&ranked).unwrap();

    assert_eq!(json[0]["matchingPercentage"], 50.0);
    assert_eq!(json[0]["earliestStart"], "09:00:00");
    assert_eq!(json[0]["event"]["name"], "Judo");
    assert_eq!(json[0]["event"]["applicationEventSchedules"][0]["begin"], "09:00:00");
}
