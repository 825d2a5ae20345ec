// Day module
// A single calendar date within a trip, the grouping unit for scheduling

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Trip day: stable identifier plus its calendar date.
/// All events referencing a day must start and end on this date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Day {
    pub id: String,
    pub date: NaiveDate,
}

impl Day {
    pub fn new(id: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: id.into(),
            date,
        }
    }
}
