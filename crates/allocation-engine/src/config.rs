//! Calendar configuration.

use serde::{Deserialize, Serialize};

use crate::error::{AllocationError, Result};
use crate::grid::{calendar_cells, Cell};

/// Hour range shown by the allocation calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CalendarConfig {
    /// First hour row, inclusive.
    pub first_hour: u8,
    /// Last hour row, inclusive.
    pub last_hour: u8,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            first_hour: 7,
            last_hour: 23,
        }
    }
}

impl CalendarConfig {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Self::parse(json)?.validate()
    }

    /// Decode without validating, for callers that override fields before
    /// calling [`validate`](Self::validate).
    pub fn parse(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn validate(self) -> Result<Self> {
        if self.first_hour > self.last_hour || self.last_hour > 23 {
            return Err(AllocationError::InvalidHourRange {
                first: self.first_hour,
                last: self.last_hour,
            });
        }
        Ok(self)
    }

    pub fn cells(&self) -> Vec<Vec<Cell>> {
        calendar_cells(self.first_hour, self.last_hour)
    }
}
