// Slot finder
// First-fit placement of a new item on a day's timeline

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::models::event::Event;
use crate::models::settings::PlannerSettings;
use crate::services::timegrid::{add_minutes, diff_minutes, snap_to_increment, Rounding};

/// A computed landing interval for a new item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// Compute where a new item of `duration_minutes` should land on `date`,
/// given the day's already-committed events.
///
/// Placement is gap-first: the earliest opening large enough wins, even
/// when a later gap would fit better. When the visible window is already
/// filled the item is pushed after the last event rather than dropped,
/// and a provisional slot overflowing the window is compressed against
/// the window ceiling as a last resort.
///
/// Deterministic for a fixed input. A zero or negative duration is not
/// validated here; callers must reject it beforehand.
pub fn compute_slot(
    date: NaiveDate,
    settings: &PlannerSettings,
    duration_minutes: i64,
    existing_events: &[Event],
) -> Slot {
    let increment = settings.increment_minutes;
    let window_start = date
        .and_hms_opt(settings.visible_start_hour, 0, 0)
        .expect("visible start hour validated to be < 24");
    // Built by offset so a 24:00 ceiling lands on the next midnight
    let window_end = window_start + Duration::minutes(settings.visible_window_minutes());

    // Private stable sort by start; ties keep their input order
    let mut sorted: Vec<&Event> = existing_events.iter().collect();
    sorted.sort_by_key(|event| event.start);

    // Fallback landing point when the window is full: after whichever
    // event ends latest, snapped up
    let latest_end = sorted
        .iter()
        .map(|event| snap_to_increment(event.end, increment, Rounding::Up))
        .max();

    let mut cursor = snap_to_increment(window_start, increment, Rounding::Up);
    let mut reached_window_end = false;

    for event in &sorted {
        if event.end <= cursor {
            // Already passed
            continue;
        }
        if event.start > cursor && diff_minutes(event.start, cursor) >= duration_minutes {
            // First fit: the gap before this event is large enough
            break;
        }
        cursor = snap_to_increment(event.end, increment, Rounding::Up);
        if cursor >= window_end {
            reached_window_end = true;
            break;
        }
    }

    if reached_window_end {
        if let Some(start) = latest_end {
            // Pushed to the very end of the day. The slot may exceed the
            // visible window but never overlaps an existing event.
            return Slot {
                start,
                end: add_minutes(start, duration_minutes),
            };
        }
    }

    if add_minutes(cursor, duration_minutes) > window_end {
        // Compress against the window ceiling
        let end = snap_to_increment(window_end, increment, Rounding::Down);
        let mut start = add_minutes(end, -duration_minutes);
        if start < window_start {
            // Last resort: the duration is silently truncated
            start = window_start;
        }
        return Slot { start, end };
    }

    Slot {
        start: cursor,
        end: add_minutes(cursor, duration_minutes),
    }
}
