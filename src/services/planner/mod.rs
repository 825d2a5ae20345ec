// Planner facade
// Schedules saved ideas onto trip days through the external collaborators

use anyhow::{anyhow, bail, Context, Result};
use chrono::{NaiveDate, NaiveDateTime};

use crate::models::event::{Event, EventKind};
use crate::models::idea::Idea;
use crate::models::recurrence::RecurrencePolicy;
use crate::models::settings::PlannerSettings;
use crate::services::recurrence::expand;
use crate::services::slot::compute_slot;
use crate::utils::date::end_of_day;

/// Persistent event store keyed by day. The day's event list is a
/// snapshot at call time; writes are last-write-wins.
pub trait EventStore {
    fn events_for_day(&self, day_id: &str) -> Result<Vec<Event>>;
    fn create_event(&mut self, event: &Event) -> Result<()>;
    fn update_event_times(
        &mut self,
        event_id: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<()>;
}

/// Trip metadata: ordered day identifiers plus a date per identifier
pub trait DayProvider {
    fn day_order(&self) -> Vec<String>;
    fn date_for(&self, day_id: &str) -> Option<NaiveDate>;
}

/// Scheduling facade over the slot finder and recurrence expander.
/// Settings are validated once at construction; the algorithms behind
/// it assume valid input.
pub struct PlannerService {
    settings: PlannerSettings,
}

impl PlannerService {
    pub fn new(settings: PlannerSettings) -> Result<Self> {
        settings
            .validate()
            .map_err(|e| anyhow!("Invalid planner settings: {e}"))?;
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &PlannerSettings {
        &self.settings
    }

    /// Schedule a saved idea onto a day's timeline, expanding recurrence
    /// and persisting every produced event. Returns the created events,
    /// the draft first. A pushed slot whose end would run past midnight
    /// is clamped to the end of its day; a day with no room left before
    /// midnight at all is an error.
    pub fn schedule_idea(
        &self,
        store: &mut dyn EventStore,
        days: &dyn DayProvider,
        idea: &Idea,
        day_id: &str,
        policy: RecurrencePolicy,
    ) -> Result<Vec<Event>> {
        let date = days
            .date_for(day_id)
            .ok_or_else(|| anyhow!("Day {day_id} has no date metadata"))?;

        let existing = store
            .events_for_day(day_id)
            .with_context(|| format!("Failed to list events for day {day_id}"))?;

        let slot = compute_slot(
            date,
            &self.settings,
            i64::from(idea.duration_minutes()),
            &existing,
        );

        // A full day can push the slot past midnight; keep the booking
        // on its day instead of handing the event model a cross-day span
        if slot.start.date() != date {
            bail!("Day {day_id} has no remaining room on its timeline");
        }
        let mut end = slot.end;
        if end.date() != date {
            log::warn!("clamping '{}' to the end of day {day_id}", idea.title);
            end = end_of_day(date);
        }

        let draft = Event::builder()
            .title(&idea.title)
            .day_id(day_id)
            .start(slot.start)
            .end(end)
            .kind(EventKind::Activity {
                tags: idea.tags.clone(),
                address: idea.address.clone(),
            })
            .build()
            .map_err(|e| anyhow!("Drafted event failed validation: {e}"))?;

        let day_order = days.day_order();
        let events = expand(&draft, policy, &day_order, |id| days.date_for(id));

        for event in &events {
            store
                .create_event(event)
                .with_context(|| format!("Failed to persist event on day {}", event.day_id))?;
        }

        log::info!(
            "scheduled '{}' as {} event(s) starting {}",
            idea.title,
            events.len(),
            slot.start
        );
        Ok(events)
    }

    /// Write a drag/resize commit through the store. The controller only
    /// produces increment-aligned times; this guards the interval before
    /// the write, mirroring the store's last-write-wins contract.
    pub fn apply_time_change(
        &self,
        store: &mut dyn EventStore,
        event_id: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<()> {
        if end <= start {
            bail!("Refusing to write event {event_id} with end at or before start");
        }
        store
            .update_event_times(event_id, start, end)
            .with_context(|| format!("Failed to update times for event {event_id}"))
    }
}
