// Settings module
// Planner-wide scheduling configuration

use serde::{Deserialize, Serialize};

/// Increment size, visible-hour window and display timezone.
/// Callers validate once before handing these to the algorithms;
/// the algorithms themselves assume valid input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannerSettings {
    /// Snapping granularity in minutes. Should divide 60 evenly for
    /// visual alignment; the algorithms tolerate any positive value.
    pub increment_minutes: u32,
    /// First whole hour rendered on the timeline (inclusive)
    pub visible_start_hour: u32,
    /// Last whole hour rendered on the timeline (exclusive)
    pub visible_end_hour: u32,
    /// Display label only; timestamps are wall-clock in this zone
    pub timezone: String,
}

impl Default for PlannerSettings {
    fn default() -> Self {
        Self {
            increment_minutes: 30,
            visible_start_hour: 8,
            visible_end_hour: 20,
            timezone: "UTC".to_string(),
        }
    }
}

impl PlannerSettings {
    /// Validate the settings
    pub fn validate(&self) -> Result<(), String> {
        if self.increment_minutes == 0 {
            return Err("Increment must be a positive number of minutes".to_string());
        }

        if self.visible_start_hour >= self.visible_end_hour {
            return Err("Visible window must cover at least one hour".to_string());
        }

        if self.visible_end_hour > 24 {
            return Err("Visible window cannot extend past midnight".to_string());
        }

        Ok(())
    }

    /// Length of the visible window in minutes
    pub fn visible_window_minutes(&self) -> i64 {
        i64::from(self.visible_end_hour - self.visible_start_hour) * 60
    }
}
