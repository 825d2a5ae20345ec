// Recurrence expansion
// Duplicates a drafted event across subsequent trip days

use chrono::NaiveDate;

use crate::models::event::Event;
use crate::models::recurrence::RecurrencePolicy;

/// Expand a drafted event according to its recurrence policy.
///
/// Element 0 is always the draft itself. Additional events re-anchor the
/// draft's time-of-day onto each subsequent day's date, one per day,
/// each under a fresh identity. Days without date metadata are skipped.
/// A draft whose day is missing from `day_order` degrades silently to
/// no recurrence.
pub fn expand<F>(
    draft: &Event,
    policy: RecurrencePolicy,
    day_order: &[String],
    date_for: F,
) -> Vec<Event>
where
    F: Fn(&str) -> Option<NaiveDate>,
{
    let mut events = vec![draft.clone()];

    let Some(start_index) = day_order.iter().position(|id| *id == draft.day_id) else {
        log::debug!(
            "day {} not found in trip order; scheduling without recurrence",
            draft.day_id
        );
        return events;
    };

    let remaining = match policy {
        RecurrencePolicy::None => return events,
        // `days` counts the draft's own day
        RecurrencePolicy::Daily { days } => days.saturating_sub(1) as usize,
        RecurrencePolicy::UntilTripEnd => usize::MAX,
    };

    let start_time = draft.start.time();
    let end_time = draft.end.time();
    let mut produced = 0usize;

    for day_id in day_order.iter().skip(start_index + 1) {
        if produced >= remaining {
            break;
        }
        let Some(date) = date_for(day_id) else {
            log::debug!("day {day_id} has no date metadata; skipping occurrence");
            continue;
        };

        let mut event = draft.with_fresh_id();
        event.day_id = day_id.clone();
        event.start = date.and_time(start_time);
        event.end = date.and_time(end_time);
        events.push(event);
        produced += 1;
    }

    events
}
