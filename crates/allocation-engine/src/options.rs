//! Start/end picker options for a day's time range.

use serde::Serialize;

use crate::slot::{DayOfWeek, SlotId};

/// A selectable picker entry. `value` is always the slot the option stands for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeSlotOption {
    pub label: String,
    pub value: SlotId,
}

/// Half-hour options on `day` for hours `start_hour..=end_hour`.
///
/// Start options are labelled with the slot's own start (`"9:00"`, `"9:30"`).
/// End options are labelled one slot later, so `"9:30"` carries the value
/// `{day}-9-00`: "ends at 9:30" stores the last included slot. The end label
/// after 23:30 is `"0:00"`.
///
/// In start mode with `start_minute == 30` the first option is dropped. End
/// mode never drops an option. `end_hour` is capped at 23.
pub fn time_slot_options(
    day: DayOfWeek,
    start_hour: u8,
    start_minute: u8,
    end_hour: u8,
    end_options: bool,
) -> Vec<TimeSlotOption> {
    let mut options: Vec<TimeSlotOption> = (start_hour..=end_hour.min(23))
        .flat_map(|hour| {
            let (on_hour_label, half_past_label) = if end_options {
                let next_hour = if hour == 23 { 0 } else { hour + 1 };
                (format!("{hour}:30"), format!("{next_hour}:00"))
            } else {
                (format!("{hour}:00"), format!("{hour}:30"))
            };
            [
                TimeSlotOption {
                    label: on_hour_label,
                    value: SlotId::on_the_hour(day, hour),
                },
                TimeSlotOption {
                    label: half_past_label,
                    value: SlotId::half_past(day, hour),
                },
            ]
        })
        .collect();

    if !end_options && start_minute == 30 && !options.is_empty() {
        options.remove(0);
    }
    options
}
