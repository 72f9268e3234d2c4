//! Tests for the calendar grid and drag-selection series.

use allocation_engine::{
    calendar_cells, is_slot_first, is_slot_last, selection_between, time_series, DayOfWeek,
    SlotId,
};

fn slot(key: &str) -> SlotId {
    key.parse().unwrap()
}

fn keys(slots: &[SlotId]) -> Vec<String> {
    slots.iter().map(ToString::to_string).collect()
}

fn day(index: u8) -> DayOfWeek {
    DayOfWeek::new(index).unwrap()
}

// ── calendar_cells ──────────────────────────────────────────────────────────

#[test]
fn grid_has_seven_days_of_half_hours() {
    let cells = calendar_cells(7, 23);

    assert_eq!(cells.len(), 7);
    for (index, column) in cells.iter().enumerate() {
        assert_eq!(column.len(), 34, "day {index} should have 17 hours x 2");
        assert!(column.iter().all(|cell| cell.day.index() as usize == index));
    }
    assert_eq!(cells[0][0].key, slot("0-7-00"));
    assert_eq!(cells[6][33].key, slot("6-23-30"));
}

#[test]
fn grid_cells_carry_their_own_key() {
    let cells = calendar_cells(8, 9);
    let cell = cells[3][1];
    assert_eq!(cell.hour, 8);
    assert_eq!(cell.minute, 30);
    assert_eq!(cell.key, slot("3-8-30"));
}

#[test]
fn inverted_grid_range_yields_empty_days() {
    let cells = calendar_cells(10, 9);
    assert_eq!(cells.len(), 7);
    assert!(cells.iter().all(Vec::is_empty));
}

#[test]
fn grid_last_hour_is_capped_at_23() {
    let cells = calendar_cells(22, 30);
    let tuesday: Vec<SlotId> = cells[1].iter().map(|c| c.key).collect();
    assert_eq!(keys(&tuesday), ["1-22-00", "1-22-30", "1-23-00", "1-23-30"]);
}

// ── time_series ─────────────────────────────────────────────────────────────

#[test]
fn series_between_whole_and_half_hour() {
    let series = time_series(day(2), slot("2-9-00"), slot("2-10-30"));
    assert_eq!(keys(&series), ["2-9-00", "2-9-30", "2-10-00", "2-10-30"]);
}

#[test]
fn series_trims_leading_and_trailing_over_emission() {
    let series = time_series(day(2), slot("2-9-30"), slot("2-11-00"));
    assert_eq!(keys(&series), ["2-9-30", "2-10-00", "2-10-30", "2-11-00"]);
}

#[test]
fn series_of_single_slot() {
    assert_eq!(keys(&time_series(day(2), slot("2-9-30"), slot("2-9-30"))), ["2-9-30"]);
    assert_eq!(keys(&time_series(day(2), slot("2-9-00"), slot("2-9-00"))), ["2-9-00"]);
}

#[test]
fn series_uses_day_argument_not_endpoint_days() {
    let series = time_series(day(4), slot("0-9-00"), slot("6-9-30"));
    assert_eq!(keys(&series), ["4-9-00", "4-9-30"]);
}

#[test]
fn series_does_not_reorder_endpoints() {
    // Out-of-order endpoints walk an empty or fully trimmed range.
    assert!(time_series(day(2), slot("2-11-00"), slot("2-9-00")).is_empty());
    assert!(time_series(day(2), slot("2-9-30"), slot("2-9-00")).is_empty());
}

// ── selection_between ───────────────────────────────────────────────────────

#[test]
fn drag_direction_does_not_matter() {
    let down = selection_between(slot("1-9-00"), slot("1-10-30"));
    let up = selection_between(slot("1-10-30"), slot("1-9-00"));
    assert_eq!(down, up);
    assert_eq!(keys(&down), ["1-9-00", "1-9-30", "1-10-00", "1-10-30"]);
}

#[test]
fn drag_stays_on_anchor_day() {
    let selection = selection_between(slot("3-12-00"), slot("5-10-00"));
    assert_eq!(
        keys(&selection),
        ["3-10-00", "3-10-30", "3-11-00", "3-11-30", "3-12-00"]
    );
}

#[test]
fn selection_edges() {
    let selection = selection_between(slot("0-8-00"), slot("0-9-00"));
    assert!(is_slot_first(&selection, slot("0-8-00")));
    assert!(!is_slot_first(&selection, slot("0-8-30")));
    assert!(is_slot_last(&selection, slot("0-9-00")));
    assert!(!is_slot_last(&selection, slot("0-8-00")));
    assert!(!is_slot_first(&[], slot("0-8-00")));
    assert!(!is_slot_last(&[], slot("0-8-00")));
}
