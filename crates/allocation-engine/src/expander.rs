//! Schedule window → half-hour slot expansion.
//!
//! Expansion walks whole hours `begin.hour()..=end.hour()` and emits both
//! half-hour slots of each, then trims the over-emission at the edges:
//!
//! - begin at `:30` drops the first slot
//! - end at `:00` drops the last two slots
//! - end at `:30` drops the last slot
//!
//! The trims run in that order on each window. Windows ending at 00:00
//! (midnight) walk an empty hour range and expand to nothing.

use chrono::Timelike;
use serde::{Deserialize, Serialize};

use crate::model::{ApplicationEvent, ScheduleWindow};
use crate::slot::SlotId;

/// Expand windows into the half-hour slots they cover, in input order.
///
/// ```
/// use allocation_engine::{time_slots, DayOfWeek, ScheduleWindow};
/// use chrono::NaiveTime;
///
/// let window = ScheduleWindow::new(
///     DayOfWeek::WEDNESDAY,
///     NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
///     NaiveTime::from_hms_opt(10, 30, 0).unwrap(),
/// );
/// let keys: Vec<String> = time_slots([window]).iter().map(|s| s.to_string()).collect();
/// assert_eq!(keys, ["2-9-00", "2-9-30", "2-10-00"]);
/// ```
pub fn time_slots<I>(windows: I) -> Vec<SlotId>
where
    I: IntoIterator<Item = ScheduleWindow>,
{
    let mut slots = Vec::new();
    for window in windows {
        slots.extend(expand_window(&window));
    }
    slots
}

fn expand_window(window: &ScheduleWindow) -> Vec<SlotId> {
    let first_hour = window.begin.hour() as u8;
    let last_hour = window.end.hour() as u8;

    let mut run: Vec<SlotId> = (first_hour..=last_hour)
        .flat_map(|hour| {
            [
                SlotId::on_the_hour(window.day, hour),
                SlotId::half_past(window.day, hour),
            ]
        })
        .collect();

    if window.begin.minute() == 30 && !run.is_empty() {
        run.remove(0);
    }
    match window.end.minute() {
        0 => {
            run.pop();
            run.pop();
        }
        30 => {
            run.pop();
        }
        _ => {}
    }
    run
}

/// Which decided-slot list to look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotStatus {
    Accepted,
    Declined,
}

/// Slots already decided by the backend across an application round.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResultStatuses {
    pub accepted_slots: Vec<SlotId>,
    pub declined_slots: Vec<SlotId>,
}

impl ScheduleResultStatuses {
    pub fn slots(&self, status: SlotStatus) -> &[SlotId] {
        match status {
            SlotStatus::Accepted => &self.accepted_slots,
            SlotStatus::Declined => &self.declined_slots,
        }
    }
}

/// Collect the allocated (not requested) slots of every schedule result into
/// accepted and declined lists.
///
/// Schedules without a result contribute nothing. A result flagged both
/// accepted and declined is passed through into both lists unvalidated.
pub fn schedule_result_statuses(events: &[ApplicationEvent]) -> ScheduleResultStatuses {
    let mut statuses = ScheduleResultStatuses::default();

    for result in events
        .iter()
        .flat_map(|event| &event.schedules)
        .filter_map(|schedule| schedule.result.as_ref())
    {
        let slots = expand_window(&result.allocated_window());
        if result.accepted && result.declined {
            tracing::debug!(
                day = %result.allocated_day,
                begin = %result.allocated_begin,
                "schedule result is both accepted and declined"
            );
        }
        if result.accepted {
            statuses.accepted_slots.extend_from_slice(&slots);
        }
        if result.declined {
            statuses.declined_slots.extend(slots);
        }
    }

    tracing::debug!(
        accepted = statuses.accepted_slots.len(),
        declined = statuses.declined_slots.len(),
        "collected schedule result statuses"
    );
    statuses
}
