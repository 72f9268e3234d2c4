//! Ordering of candidate application events for the side panel.
//!
//! Events are ranked by three keys, in order:
//!
//! 1. match percentage with the current selection, descending
//! 2. earliest requested start time, ascending
//! 3. event name, ascending
//!
//! The sort is stable, so events equal on all three keys keep input order.

use std::cmp::Ordering;
use std::collections::HashSet;

use chrono::NaiveTime;
use serde::Serialize;

use crate::expander::time_slots;
use crate::model::{ApplicationEvent, ApplicationEventSchedule, Priority};
use crate::slot::SlotId;

/// A candidate event with the keys it was ranked by.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedEvent<'a> {
    pub event: &'a ApplicationEvent,
    pub matching_percentage: f64,
    pub earliest_start: Option<NaiveTime>,
}

/// Share of the selection covered by the schedules' slots, 0-100.
///
/// Each selection entry counts once per occurrence. An empty selection
/// matches 0%.
pub fn time_slot_matching_percentage(
    selection: &[SlotId],
    schedules: &[&ApplicationEventSchedule],
) -> f64 {
    let slots = time_slots(schedules.iter().map(|schedule| schedule.window()));
    percentage_covered(selection, &slots.into_iter().collect())
}

/// Earliest `begin` among the schedules, or `None` if there are none.
pub fn earliest_schedule_start(schedules: &[&ApplicationEventSchedule]) -> Option<NaiveTime> {
    schedules.iter().map(|schedule| schedule.begin).min()
}

/// Events with at least one `priority` schedule overlapping the selection,
/// ranked best match first.
pub fn rank_application_events<'a>(
    events: &'a [ApplicationEvent],
    selection: &[SlotId],
    priority: Priority,
) -> Vec<RankedEvent<'a>> {
    let selected: HashSet<SlotId> = selection.iter().copied().collect();

    let mut ranked: Vec<RankedEvent<'a>> = events
        .iter()
        .filter_map(|event| {
            let schedules = event.schedules_with_priority(priority);
            let slots: HashSet<SlotId> =
                time_slots(schedules.iter().map(|schedule| schedule.window()))
                    .into_iter()
                    .collect();
            if slots.is_disjoint(&selected) {
                return None;
            }
            Some(RankedEvent {
                event,
                matching_percentage: percentage_covered(selection, &slots),
                earliest_start: earliest_schedule_start(&schedules),
            })
        })
        .collect();

    ranked.sort_by(compare_ranked);

    tracing::debug!(
        candidates = events.len(),
        selected = ranked.len(),
        priority = priority.0,
        "ranked application events"
    );
    ranked
}

/// [`rank_application_events`] without the ranking keys.
pub fn selected_application_events<'a>(
    events: &'a [ApplicationEvent],
    selection: &[SlotId],
    priority: Priority,
) -> Vec<&'a ApplicationEvent> {
    rank_application_events(events, selection, priority)
        .into_iter()
        .map(|ranked| ranked.event)
        .collect()
}

fn compare_ranked(a: &RankedEvent<'_>, b: &RankedEvent<'_>) -> Ordering {
    b.matching_percentage
        .total_cmp(&a.matching_percentage)
        .then_with(|| a.earliest_start.cmp(&b.earliest_start))
        .then_with(|| a.event.name.cmp(&b.event.name))
}

fn percentage_covered(selection: &[SlotId], slots: &HashSet<SlotId>) -> f64 {
    if selection.is_empty() {
        return 0.0;
    }
    let matching = selection.iter().filter(|slot| slots.contains(slot)).count();
    matching as f64 / selection.len() as f64 * 100.0
}
