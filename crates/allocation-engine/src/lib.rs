//! # allocation-engine
//!
//! Half-hour slot bookkeeping for manually allocating recurring-reservation
//! applications to calendar time.
//!
//! An operator drags across a weekly calendar grid; the engine turns that
//! selection into [`SlotId`]s, finds which applicant schedules overlap it,
//! counts schedule density per cell, collects already-decided slots and ranks
//! candidate application events for the side panel. Every operation is a pure
//! function over values decoded from the reservation API.
//!
//! ## Quick start
//!
//! ```rust
//! use allocation_engine::{selection_between, selection_schedule_window, SlotId};
//!
//! let anchor: SlotId = "2-10-30".parse().unwrap();
//! let current: SlotId = "2-9-00".parse().unwrap();
//! let selection = selection_between(anchor, current);
//! assert_eq!(selection.len(), 4);
//!
//! let (begin, end) = selection_schedule_window(&selection).unwrap();
//! assert_eq!((begin.as_str(), end.as_str()), ("09:00:00", "11:00:00"));
//! ```
//!
//! ## Modules
//!
//! - [`slot`] — `SlotId` value type and its string/clock-time codec
//! - [`grid`] — calendar cells and drag-selection series
//! - [`expander`] — schedule windows → slots, decided-slot statuses
//! - [`matching`] — overlap predicates and counts
//! - [`ranking`] — side-panel ordering of candidate events
//! - [`options`] — start/end picker options
//! - [`model`] — API data projections
//! - [`config`] — calendar hour range
//! - [`error`] — Error types

pub mod config;
pub mod error;
pub mod expander;
pub mod grid;
pub mod matching;
pub mod model;
pub mod options;
pub mod ranking;
pub mod slot;

pub use config::CalendarConfig;
pub use error::AllocationError;
pub use expander::{schedule_result_statuses, time_slots, ScheduleResultStatuses, SlotStatus};
pub use grid::{calendar_cells, is_slot_first, is_slot_last, selection_between, time_series, Cell};
pub use matching::{
    application_for_event, are_slots_on_status, do_some_slots_fit_schedule,
    events_for_reservation_unit, matching_schedules, slot_application_event_count,
    slot_application_events,
};
pub use model::{
    AllocationSession, Application, ApplicationEvent, ApplicationEventSchedule,
    ApplicationEventScheduleResult, Priority, ReservationUnit, ScheduleWindow,
};
pub use options::{time_slot_options, TimeSlotOption};
pub use ranking::{
    earliest_schedule_start, rank_application_events, selected_application_events,
    time_slot_matching_percentage, RankedEvent,
};
pub use slot::{selection_schedule_window, DayOfWeek, SlotId};
