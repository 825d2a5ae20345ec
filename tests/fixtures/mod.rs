// Test fixtures - reusable test data
// Provides consistent trip, day and event data across test files

use chrono::{NaiveDate, NaiveDateTime};
use std::collections::HashMap;

use trip_planner::models::event::Event;
use trip_planner::models::settings::PlannerSettings;

/// Sample dates for testing
pub mod dates {
    use super::*;

    /// First day of the sample trip
    pub fn trip_start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()
    }

    /// A time on the trip's first day
    pub fn first_day_at(hour: u32, minute: u32) -> NaiveDateTime {
        trip_start().and_hms_opt(hour, minute, 0).unwrap()
    }
}

/// A five-day sample trip
pub mod trips {
    use super::*;

    pub fn day_order() -> Vec<String> {
        (0..5).map(|i| format!("day-{i}")).collect()
    }

    pub fn day_dates() -> HashMap<String, NaiveDate> {
        day_order()
            .into_iter()
            .enumerate()
            .map(|(i, id)| {
                (
                    id,
                    NaiveDate::from_ymd_opt(2025, 6, 10 + i as u32).unwrap(),
                )
            })
            .collect()
    }
}

/// Sample events and settings for testing
pub mod events {
    use super::*;

    /// Default planner settings: 30-minute increments, 08:00-20:00 window
    pub fn settings() -> PlannerSettings {
        PlannerSettings::default()
    }

    /// A committed event on the trip's first day
    pub fn booked(start: (u32, u32), end: (u32, u32)) -> Event {
        Event::new(
            "Booked",
            "day-0",
            dates::first_day_at(start.0, start.1),
            dates::first_day_at(end.0, end.1),
        )
        .unwrap()
    }
}
