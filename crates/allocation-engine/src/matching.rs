//! Overlap tests between a slot selection and applicant schedules.
//!
//! A schedule overlaps a set of slots when at least one slot is on the
//! schedule's day and starts inside `[begin, end)`. See
//! [`ScheduleWindow::fits_any`](crate::model::ScheduleWindow::fits_any).

use std::collections::{BTreeSet, HashSet};

use crate::expander::{ScheduleResultStatuses, SlotStatus};
use crate::model::{Application, ApplicationEvent, ApplicationEventSchedule, ReservationUnit};
use crate::slot::SlotId;

pub fn do_some_slots_fit_schedule(schedule: &ApplicationEventSchedule, slots: &[SlotId]) -> bool {
    schedule.window().fits_any(slots)
}

/// Schedules overlapping the selection, in input order.
pub fn matching_schedules<'a>(
    selection: &[SlotId],
    schedules: &'a [ApplicationEventSchedule],
) -> Vec<&'a ApplicationEventSchedule> {
    schedules
        .iter()
        .filter(|schedule| do_some_slots_fit_schedule(schedule, selection))
        .collect()
}

/// Number of distinct schedules (by pk) across all events overlapping `slots`.
///
/// Drives the density colour of an unselected calendar cell.
pub fn slot_application_event_count(slots: &[SlotId], events: &[ApplicationEvent]) -> usize {
    let schedule_pks: BTreeSet<u64> = events
        .iter()
        .flat_map(|event| &event.schedules)
        .filter(|schedule| do_some_slots_fit_schedule(schedule, slots))
        .map(|schedule| schedule.pk)
        .collect();
    schedule_pks.len()
}

/// True only if every slot is in the given status list.
///
/// An empty `slots` is vacuously on every status.
pub fn are_slots_on_status(
    slots: &[SlotId],
    statuses: &ScheduleResultStatuses,
    status: SlotStatus,
) -> bool {
    let decided: HashSet<&SlotId> = statuses.slots(status).iter().collect();
    slots.iter().all(|slot| decided.contains(slot))
}

/// Events having any schedule that overlaps `slots`, first occurrence of each
/// pk kept, in input order.
pub fn slot_application_events<'a>(
    slots: &[SlotId],
    events: &'a [ApplicationEvent],
) -> Vec<&'a ApplicationEvent> {
    let mut seen = HashSet::new();
    let matched: Vec<&ApplicationEvent> = events
        .iter()
        .filter(|event| {
            event
                .schedules
                .iter()
                .any(|schedule| do_some_slots_fit_schedule(schedule, slots))
        })
        .filter(|event| seen.insert(event.pk))
        .collect();
    tracing::debug!(
        slots = slots.len(),
        events = matched.len(),
        "matched application events to slots"
    );
    matched
}

pub fn events_for_reservation_unit<'a>(
    events: &'a [ApplicationEvent],
    unit: &ReservationUnit,
) -> Vec<&'a ApplicationEvent> {
    events
        .iter()
        .filter(|event| event.is_for_reservation_unit(unit.pk))
        .collect()
}

pub fn application_for_event<'a>(
    applications: &'a [Application],
    event: &ApplicationEvent,
) -> Option<&'a Application> {
    let pk = event.application_pk?;
    applications.iter().find(|application| application.pk == pk)
}
