//! WASM bindings for allocation-engine.
//!
//! Exposes slot grid construction, schedule expansion, overlap matching,
//! ranking and picker options to the allocation calendar UI via
//! `wasm-bindgen`. Complex values cross the boundary as JSON strings in the
//! same shape the reservation API returns them (camelCase, `HH:MM:SS` times,
//! `"{day}-{hour}-{minute}"` slot keys).
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p allocation-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir packages/allocation-engine-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/allocation_engine_wasm.wasm
//! ```

use allocation_engine::{
    ApplicationEvent, ApplicationEventSchedule, DayOfWeek, Priority, ScheduleResultStatuses,
    ScheduleWindow, SlotId, SlotStatus,
};
use chrono::NaiveTime;
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct ScheduleWindowDto {
    begin: String,
    end: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RankedEventDto<'a> {
    event: &'a ApplicationEvent,
    matching_percentage: f64,
    earliest_start: Option<String>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn from_json<T: DeserializeOwned>(json: &str, what: &str) -> Result<T, JsValue> {
    serde_json::from_str(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid {} JSON: {}", what, e)))
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

fn format_time(time: NaiveTime) -> String {
    time.format("%H:%M:%S").to_string()
}

fn parse_slot(key: &str) -> Result<SlotId, JsValue> {
    key.parse().map_err(|e| JsValue::from_str(&format!("{}", e)))
}

fn parse_day(day: u8) -> Result<DayOfWeek, JsValue> {
    DayOfWeek::new(day).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn parse_status(status: &str) -> Result<SlotStatus, JsValue> {
    match status {
        "accepted" => Ok(SlotStatus::Accepted),
        "declined" => Ok(SlotStatus::Declined),
        other => Err(JsValue::from_str(&format!(
            "Unknown slot status '{}'. Expected 'accepted' or 'declined'",
            other
        ))),
    }
}

// ---------------------------------------------------------------------------
// WASM exports: slots and grid
// ---------------------------------------------------------------------------

/// Build the 7-day calendar grid for hours `first_hour..=last_hour`.
///
/// Returns a JSON array of seven day arrays of `{day, hour, minute, key}` cells.
#[wasm_bindgen(js_name = "calendarCells")]
pub fn calendar_cells(first_hour: u8, last_hour: u8) -> Result<String, JsValue> {
    to_json(&allocation_engine::calendar_cells(first_hour, last_hour))
}

/// Slots on `day` from `begin` through `end`. Endpoints are not reordered.
#[wasm_bindgen(js_name = "timeSeries")]
pub fn time_series(day: u8, begin: &str, end: &str) -> Result<String, JsValue> {
    let series =
        allocation_engine::time_series(parse_day(day)?, parse_slot(begin)?, parse_slot(end)?);
    to_json(&series)
}

/// Drag selection from `anchor` to `current`, in either direction.
#[wasm_bindgen(js_name = "selectionBetween")]
pub fn selection_between(anchor: &str, current: &str) -> Result<String, JsValue> {
    to_json(&allocation_engine::selection_between(
        parse_slot(anchor)?,
        parse_slot(current)?,
    ))
}

/// Start time of a slot as `HH:MM:SS`.
#[wasm_bindgen(js_name = "timeSlotKeyToTime")]
pub fn time_slot_key_to_time(slot: &str) -> Result<String, JsValue> {
    Ok(format_time(parse_slot(slot)?.time()))
}

/// `HH:MM:SS` for a slot key; `pad_end` advances one slot for end boundaries.
#[wasm_bindgen(js_name = "timeSlotKeyToScheduleTime")]
pub fn time_slot_key_to_schedule_time(slot: &str, pad_end: bool) -> Result<String, JsValue> {
    Ok(parse_slot(slot)?.schedule_time_string(pad_end))
}

/// Begin/end boundaries of a selection as `{begin, end}`, or `null` when empty.
#[wasm_bindgen(js_name = "selectionScheduleWindow")]
pub fn selection_schedule_window(selection_json: &str) -> Result<String, JsValue> {
    let selection: Vec<SlotId> = from_json(selection_json, "selection")?;
    let window = allocation_engine::selection_schedule_window(&selection)
        .map(|(begin, end)| ScheduleWindowDto { begin, end });
    to_json(&window)
}

/// Expand a JSON array of `{day, begin, end}` windows into slot keys.
#[wasm_bindgen(js_name = "getTimeSlots")]
pub fn time_slots(windows_json: &str) -> Result<String, JsValue> {
    let windows: Vec<ScheduleWindow> = from_json(windows_json, "schedule windows")?;
    to_json(&allocation_engine::time_slots(windows))
}

/// Accepted and declined slots across all events, as
/// `{acceptedSlots, declinedSlots}`.
#[wasm_bindgen(js_name = "getApplicationEventScheduleResultStatuses")]
pub fn schedule_result_statuses(events_json: &str) -> Result<String, JsValue> {
    let events: Vec<ApplicationEvent> = from_json(events_json, "application events")?;
    to_json(&allocation_engine::schedule_result_statuses(&events))
}

// ---------------------------------------------------------------------------
// WASM exports: matching and ranking
// ---------------------------------------------------------------------------

#[wasm_bindgen(js_name = "doSomeSlotsFitApplicationEventSchedule")]
pub fn do_some_slots_fit_schedule(schedule_json: &str, slots_json: &str) -> Result<bool, JsValue> {
    let schedule: ApplicationEventSchedule = from_json(schedule_json, "schedule")?;
    let slots: Vec<SlotId> = from_json(slots_json, "slots")?;
    Ok(allocation_engine::do_some_slots_fit_schedule(&schedule, &slots))
}

/// Schedules overlapping the selection, in input order.
#[wasm_bindgen(js_name = "getMatchingApplicationEventSchedules")]
pub fn matching_schedules(selection_json: &str, schedules_json: &str) -> Result<String, JsValue> {
    let selection: Vec<SlotId> = from_json(selection_json, "selection")?;
    let schedules: Vec<ApplicationEventSchedule> = from_json(schedules_json, "schedules")?;
    to_json(&allocation_engine::matching_schedules(&selection, &schedules))
}

/// Number of distinct schedules overlapping the slots.
#[wasm_bindgen(js_name = "getSlotApplicationEventCount")]
pub fn slot_application_event_count(slots_json: &str, events_json: &str) -> Result<u32, JsValue> {
    let slots: Vec<SlotId> = from_json(slots_json, "slots")?;
    let events: Vec<ApplicationEvent> = from_json(events_json, "application events")?;
    let count = allocation_engine::slot_application_event_count(&slots, &events);
    Ok(u32::try_from(count).unwrap_or(u32::MAX))
}

/// True only if every slot is in the `status` list (`"accepted"` or `"declined"`).
#[wasm_bindgen(js_name = "areSlotsOnStatus")]
pub fn are_slots_on_status(
    slots_json: &str,
    statuses_json: &str,
    status: &str,
) -> Result<bool, JsValue> {
    let slots: Vec<SlotId> = from_json(slots_json, "slots")?;
    let statuses: ScheduleResultStatuses = from_json(statuses_json, "statuses")?;
    Ok(allocation_engine::are_slots_on_status(
        &slots,
        &statuses,
        parse_status(status)?,
    ))
}

/// Events with any schedule overlapping the slots.
#[wasm_bindgen(js_name = "getSlotApplicationEvents")]
pub fn slot_application_events(slots_json: &str, events_json: &str) -> Result<String, JsValue> {
    let slots: Vec<SlotId> = from_json(slots_json, "slots")?;
    let events: Vec<ApplicationEvent> = from_json(events_json, "application events")?;
    to_json(&allocation_engine::slot_application_events(&slots, &events))
}

/// Share of the schedules' slots covered by the selection, 0-100.
#[wasm_bindgen(js_name = "getTimeSlotMatchingPercentage")]
pub fn time_slot_matching_percentage(
    selection_json: &str,
    schedules_json: &str,
) -> Result<f64, JsValue> {
    let selection: Vec<SlotId> = from_json(selection_json, "selection")?;
    let schedules: Vec<ApplicationEventSchedule> = from_json(schedules_json, "schedules")?;
    let schedules: Vec<&ApplicationEventSchedule> = schedules.iter().collect();
    Ok(allocation_engine::time_slot_matching_percentage(&selection, &schedules))
}

/// Earliest `begin` among the schedules as `HH:MM:SS`, or `undefined` when empty.
#[wasm_bindgen(js_name = "getEarliestScheduleStart")]
pub fn earliest_schedule_start(schedules_json: &str) -> Result<Option<String>, JsValue> {
    let schedules: Vec<ApplicationEventSchedule> = from_json(schedules_json, "schedules")?;
    let schedules: Vec<&ApplicationEventSchedule> = schedules.iter().collect();
    Ok(allocation_engine::earliest_schedule_start(&schedules).map(format_time))
}

/// Candidate events for the selection at a priority tier, best match first.
///
/// Returns `[{event, matchingPercentage, earliestStart}]`.
#[wasm_bindgen(js_name = "getSelectedApplicationEvents")]
pub fn selected_application_events(
    events_json: &str,
    selection_json: &str,
    priority: u16,
) -> Result<String, JsValue> {
    let events: Vec<ApplicationEvent> = from_json(events_json, "application events")?;
    let selection: Vec<SlotId> = from_json(selection_json, "selection")?;

    let ranked =
        allocation_engine::rank_application_events(&events, &selection, Priority(priority));
    let dtos: Vec<RankedEventDto<'_>> = ranked
        .iter()
        .map(|r| RankedEventDto {
            event: r.event,
            matching_percentage: r.matching_percentage,
            earliest_start: r.earliest_start.map(format_time),
        })
        .collect();
    to_json(&dtos)
}

// ---------------------------------------------------------------------------
// WASM exports: picker options
// ---------------------------------------------------------------------------

/// Start or end picker options as `[{label, value}]`.
#[wasm_bindgen(js_name = "getTimeSlotOptions")]
pub fn time_slot_options(
    day: u8,
    start_hour: u8,
    start_minute: u8,
    end_hour: u8,
    end_options: bool,
) -> Result<String, JsValue> {
    let options = allocation_engine::time_slot_options(
        parse_day(day)?,
        start_hour,
        start_minute,
        end_hour,
        end_options,
    );
    to_json(&options)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEDULES: &str = r#"[
        {"pk": 10, "day": 2, "begin": "10:00:00", "end": "11:00:00", "priority": 300},
        {"pk": 11, "day": 2, "begin": "09:00:00", "end": "10:00:00", "priority": 300},
        {"pk": 12, "day": 4, "begin": "08:00:00", "end": "09:00:00", "priority": 300}
    ]"#;

    #[test]
    fn slot_key_to_time() {
        assert_eq!(time_slot_key_to_time("2-9-30").unwrap(), "09:30:00");
    }

    #[test]
    fn matching_schedules_returns_overlaps_in_input_order() {
        let json = matching_schedules(r#"["2-9-30", "2-10-00"]"#, SCHEDULES).unwrap();
        let matched: Vec<serde_json::Value> = serde_json::from_str(&json).unwrap();
        let pks: Vec<u64> = matched.iter().map(|s| s["pk"].as_u64().unwrap()).collect();
        assert_eq!(pks, [10, 11]);
    }

    #[test]
    fn matching_percentage_over_all_schedules() {
        // 10:30 is requested, 11:00 is not.
        let percentage = time_slot_matching_percentage(r#"["2-10-30", "2-11-00"]"#, SCHEDULES)
            .unwrap();
        assert_eq!(percentage, 50.0);
    }

    #[test]
    fn earliest_start_ignores_day() {
        assert_eq!(
            earliest_schedule_start(SCHEDULES).unwrap().as_deref(),
            Some("08:00:00")
        );
        assert_eq!(earliest_schedule_start("[]").unwrap(), None);
    }
}
