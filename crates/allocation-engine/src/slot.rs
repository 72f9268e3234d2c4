//! Half-hour slot identifiers and their string/time codec.
//!
//! A [`SlotId`] is the atomic 30-minute calendar unit. Its canonical string
//! form `"{day}-{hour}-{minute}"` (e.g. `"2-9-00"`) only appears at the serde
//! and `FromStr`/`Display` boundary; everything inside the engine works on the
//! typed value.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{AllocationError, Result};

/// Length of one calendar slot.
pub const SLOT_MINUTES: u32 = 30;

const MINUTES_PER_DAY: u32 = 24 * 60;

/// Day of week, 0 = Monday .. 6 = Sunday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct DayOfWeek(u8);

impl DayOfWeek {
    pub const MONDAY: Self = Self(0);
    pub const TUESDAY: Self = Self(1);
    pub const WEDNESDAY: Self = Self(2);
    pub const THURSDAY: Self = Self(3);
    pub const FRIDAY: Self = Self(4);
    pub const SATURDAY: Self = Self(5);
    pub const SUNDAY: Self = Self(6);

    pub fn new(day: u8) -> Result<Self> {
        if day < 7 {
            Ok(Self(day))
        } else {
            Err(AllocationError::InvalidDay(day))
        }
    }

    /// All seven days, Monday first.
    pub fn week() -> impl Iterator<Item = Self> {
        (0..7).map(Self)
    }

    pub const fn index(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for DayOfWeek {
    type Error = AllocationError;

    fn try_from(day: u8) -> Result<Self> {
        Self::new(day)
    }
}

impl From<DayOfWeek> for u8 {
    fn from(day: DayOfWeek) -> u8 {
        day.0
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One 30-minute calendar cell on a given weekday.
///
/// Ordering is `(day, hour, minute)`, so sorting a list of slots groups them
/// by day and then runs chronologically within the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SlotId {
    day: DayOfWeek,
    hour: u8,
    minute: u8,
}

impl SlotId {
    /// Build a slot, rejecting hours outside 0-23 and minutes other than 0 or 30.
    pub fn new(day: DayOfWeek, hour: u8, minute: u8) -> Result<Self> {
        if hour > 23 || (minute != 0 && minute != 30) {
            return Err(AllocationError::InvalidSlotTime { hour, minute });
        }
        Ok(Self { day, hour, minute })
    }

    /// The `:00` slot of `hour`. Callers guarantee `hour < 24`.
    pub(crate) fn on_the_hour(day: DayOfWeek, hour: u8) -> Self {
        debug_assert!(hour < 24);
        Self {
            day,
            hour,
            minute: 0,
        }
    }

    /// The `:30` slot of `hour`. Callers guarantee `hour < 24`.
    pub(crate) fn half_past(day: DayOfWeek, hour: u8) -> Self {
        debug_assert!(hour < 24);
        Self {
            day,
            hour,
            minute: 30,
        }
    }

    pub fn day(self) -> DayOfWeek {
        self.day
    }

    pub fn hour(self) -> u8 {
        self.hour
    }

    pub fn minute(self) -> u8 {
        self.minute
    }

    pub fn minutes_since_midnight(self) -> u32 {
        u32::from(self.hour) * 60 + u32::from(self.minute)
    }

    /// Clock time of the slot start, ignoring the day.
    ///
    /// Only meaningful for chronological comparison within a single day.
    pub fn time(self) -> NaiveTime {
        time_from_minutes(self.minutes_since_midnight())
    }

    /// Clock time for submitting a schedule boundary to the backend.
    ///
    /// With `pad_end` the time is advanced by one slot, turning an inclusive
    /// last selected slot into an exclusive end. 23:30 pads to 00:00.
    /// Pass `pad_end = true` only for the final slot of a selection.
    pub fn schedule_time(self, pad_end: bool) -> NaiveTime {
        let pad = if pad_end { SLOT_MINUTES } else { 0 };
        time_from_minutes(self.minutes_since_midnight() + pad)
    }

    /// [`schedule_time`](Self::schedule_time) formatted as `HH:MM:SS`.
    pub fn schedule_time_string(self, pad_end: bool) -> String {
        self.schedule_time(pad_end).format("%H:%M:%S").to_string()
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{:02}", self.day, self.hour, self.minute)
    }
}

impl FromStr for SlotId {
    type Err = AllocationError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || AllocationError::InvalidSlotKey(s.to_string());
        let mut parts = s.split('-');
        let (Some(day), Some(hour), Some(minute), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };
        let number = |part: &str| part.parse::<u8>().map_err(|_| invalid());
        Self::new(DayOfWeek::new(number(day)?)?, number(hour)?, number(minute)?)
    }
}

impl TryFrom<String> for SlotId {
    type Error = AllocationError;

    fn try_from(key: String) -> Result<Self> {
        key.parse()
    }
}

impl From<SlotId> for String {
    fn from(slot: SlotId) -> String {
        slot.to_string()
    }
}

/// Begin and end boundaries (`HH:MM:SS`) for submitting a selection.
///
/// The first slot is used as-is and the last slot is end-padded, so a
/// selection `["2-9-00", "2-9-30"]` becomes `("09:00:00", "10:00:00")`.
/// Returns `None` for an empty selection.
pub fn selection_schedule_window(selection: &[SlotId]) -> Option<(String, String)> {
    let first = selection.first()?;
    let last = selection.last()?;
    Some((
        first.schedule_time_string(false),
        last.schedule_time_string(true),
    ))
}

/// Minutes since midnight of a clock time, dropping seconds.
pub(crate) fn minutes_of(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

fn time_from_minutes(minutes: u32) -> NaiveTime {
    NaiveTime::from_num_seconds_from_midnight_opt((minutes % MINUTES_PER_DAY) * 60, 0)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_unpadded_hour_and_padded_minute() {
        let slot = SlotId::new(DayOfWeek::WEDNESDAY, 9, 0).unwrap();
        assert_eq!(slot.to_string(), "2-9-00");
    }

    #[test]
    fn rejects_quarter_hours() {
        assert!(SlotId::new(DayOfWeek::MONDAY, 9, 15).is_err());
    }
}
