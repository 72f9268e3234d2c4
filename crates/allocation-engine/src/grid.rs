//! Calendar grid cells and drag-selection series.

use serde::Serialize;

use crate::slot::{DayOfWeek, SlotId};

/// One rendered cell of the weekly allocation calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Cell {
    pub day: DayOfWeek,
    pub hour: u8,
    pub minute: u8,
    pub key: SlotId,
}

impl From<SlotId> for Cell {
    fn from(key: SlotId) -> Self {
        Self {
            day: key.day(),
            hour: key.hour(),
            minute: key.minute(),
            key,
        }
    }
}

/// Build the 7-day grid of half-hour cells for hours `first_hour..=last_hour`.
///
/// The outer vector is indexed by day (0 = Monday). `last_hour` is capped
/// at 23; a range with `first_hour > last_hour` yields seven empty days.
pub fn calendar_cells(first_hour: u8, last_hour: u8) -> Vec<Vec<Cell>> {
    let last_hour = last_hour.min(23);
    DayOfWeek::week()
        .map(|day| {
            (first_hour..=last_hour)
                .flat_map(|hour| [SlotId::on_the_hour(day, hour), SlotId::half_past(day, hour)])
                .map(Cell::from)
                .collect()
        })
        .collect()
}

/// Every slot on `day` from `begin` through `end`, both inclusive.
///
/// Whole hours `begin.hour()..=end.hour()` are emitted as `:00` and `:30`
/// pairs, then the leading `:00` is dropped when `begin` is a `:30` slot and
/// the trailing `:30` is dropped when `end` is a `:00` slot. The days of
/// `begin` and `end` are ignored.
///
/// Endpoints are not reordered: out-of-order endpoints produce an empty
/// series. Use [`selection_between`] for drag gestures.
pub fn time_series(day: DayOfWeek, begin: SlotId, end: SlotId) -> Vec<SlotId> {
    let mut series: Vec<SlotId> = (begin.hour()..=end.hour())
        .flat_map(|hour| [SlotId::on_the_hour(day, hour), SlotId::half_past(day, hour)])
        .collect();
    if begin.minute() == 30 && !series.is_empty() {
        series.remove(0);
    }
    if end.minute() == 0 {
        series.pop();
    }
    series
}

/// The running selection of a drag from `anchor` to `current`.
///
/// Endpoints are ordered by clock time first, so dragging upwards selects the
/// same range as dragging downwards. The selection stays on the anchor's day.
pub fn selection_between(anchor: SlotId, current: SlotId) -> Vec<SlotId> {
    let (begin, end) = if anchor.time() <= current.time() {
        (anchor, current)
    } else {
        (current, anchor)
    };
    time_series(anchor.day(), begin, end)
}

pub fn is_slot_first(selection: &[SlotId], slot: SlotId) -> bool {
    selection.first() == Some(&slot)
}

pub fn is_slot_last(selection: &[SlotId], slot: SlotId) -> bool {
    selection.last() == Some(&slot)
}
