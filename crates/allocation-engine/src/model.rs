//! Read-only projections of the allocation data served by the GraphQL API.
//!
//! Field names follow the API's JSON (camelCase), and clock times arrive as
//! `HH:MM:SS` strings decoded into [`NaiveTime`].

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::slot::{minutes_of, DayOfWeek, SlotId};

/// Priority tier of a requested schedule.
///
/// The backend sends a bare integer. Tiers other than the two named
/// constants are carried through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Priority(pub u16);

impl Priority {
    pub const PRIMARY: Self = Self(300);
    pub const SECONDARY: Self = Self(200);
}

/// A weekly time window: `[begin, end)` on `day`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleWindow {
    pub day: DayOfWeek,
    pub begin: NaiveTime,
    pub end: NaiveTime,
}

impl ScheduleWindow {
    pub fn new(day: DayOfWeek, begin: NaiveTime, end: NaiveTime) -> Self {
        Self { day, begin, end }
    }

    /// True if any slot lies on this window's day with
    /// `begin <= slot < end` in minutes since midnight.
    ///
    /// A window ending at 00:00 has an end of zero minutes and never fits.
    pub fn fits_any(&self, slots: &[SlotId]) -> bool {
        let begin = minutes_of(self.begin);
        let end = minutes_of(self.end);
        slots.iter().any(|slot| {
            let at = slot.minutes_since_midnight();
            slot.day() == self.day && at >= begin && at < end
        })
    }
}

/// The backend's allocation decision for one schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationEventScheduleResult {
    #[serde(default)]
    pub accepted: bool,
    #[serde(default)]
    pub declined: bool,
    pub allocated_day: DayOfWeek,
    pub allocated_begin: NaiveTime,
    pub allocated_end: NaiveTime,
}

impl ApplicationEventScheduleResult {
    /// The window actually allocated, which may differ from the request.
    pub fn allocated_window(&self) -> ScheduleWindow {
        ScheduleWindow::new(self.allocated_day, self.allocated_begin, self.allocated_end)
    }
}

/// One applicant-declared desired weekly window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationEventSchedule {
    pub pk: u64,
    pub day: DayOfWeek,
    pub begin: NaiveTime,
    pub end: NaiveTime,
    pub priority: Priority,
    #[serde(default, rename = "applicationEventScheduleResult")]
    pub result: Option<ApplicationEventScheduleResult>,
}

impl ApplicationEventSchedule {
    pub fn window(&self) -> ScheduleWindow {
        ScheduleWindow::new(self.day, self.begin, self.end)
    }
}

/// One applicant's recurring-booking request within an application round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationEvent {
    pub pk: u64,
    pub name: String,
    #[serde(default)]
    pub events_per_week: u32,
    /// Seconds.
    #[serde(default)]
    pub min_duration: Option<u32>,
    /// Seconds.
    #[serde(default)]
    pub max_duration: Option<u32>,
    #[serde(default, rename = "applicationEventSchedules")]
    pub schedules: Vec<ApplicationEventSchedule>,
    #[serde(default)]
    pub application_pk: Option<u64>,
    #[serde(default)]
    pub reservation_unit_pks: Vec<u64>,
}

impl ApplicationEvent {
    pub fn schedules_with_priority(&self, priority: Priority) -> Vec<&ApplicationEventSchedule> {
        self.schedules
            .iter()
            .filter(|schedule| schedule.priority == priority)
            .collect()
    }

    pub fn is_for_reservation_unit(&self, unit_pk: u64) -> bool {
        self.reservation_unit_pks.contains(&unit_pk)
    }
}

/// The application an event belongs to; only the applicant identity is used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub pk: u64,
    #[serde(default)]
    pub organisation_name: Option<String>,
    #[serde(default)]
    pub contact_person_name: Option<String>,
}

impl Application {
    /// Organisation name, falling back to the contact person, else empty.
    pub fn applicant_name(&self) -> &str {
        [&self.organisation_name, &self.contact_person_name]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|name| !name.trim().is_empty())
            .unwrap_or("")
    }
}

/// The unit being allocated against. Used only as a filter key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationUnit {
    pub pk: u64,
    #[serde(default)]
    pub name: String,
}

/// Everything loaded for one allocation session: events, their applications,
/// the operator's current selection and the unit being allocated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationSession {
    #[serde(default)]
    pub application_events: Vec<ApplicationEvent>,
    #[serde(default)]
    pub applications: Vec<Application>,
    #[serde(default)]
    pub selection: Vec<SlotId>,
    #[serde(default)]
    pub reservation_unit: Option<ReservationUnit>,
}

impl AllocationSession {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Drop events not requested for the session's reservation unit.
    /// Sessions without a unit are returned unchanged.
    pub fn scoped_to_reservation_unit(mut self) -> Self {
        if let Some(unit) = &self.reservation_unit {
            let unit_pk = unit.pk;
            self.application_events
                .retain(|event| event.is_for_reservation_unit(unit_pk));
        }
        self
    }
}
