// Event module
// Scheduled itinerary entry, bound to a single trip day

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How a travel event gets from A to B.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    Walk,
    Drive,
    Transit,
    Fly,
}

/// Closed set of event variants. Per-variant fields are required at
/// construction, so a travel event can never be missing its mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EventKind {
    /// Plain reserved time on the timeline
    Block,
    /// Getting between places
    Travel {
        mode: TravelMode,
        address: Option<String>,
    },
    /// Something to actually do
    Activity {
        tags: Vec<String>,
        address: Option<String>,
    },
}

/// Itinerary event with wall-clock start/end on one calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub day_id: String,
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub kind: EventKind,
    pub note: Option<String>,
    pub image_refs: Vec<String>,
}

impl Event {
    /// Create a new block event with required fields
    ///
    /// # Arguments
    /// * `title` - Event title (required, non-empty)
    /// * `day_id` - Identifier of the trip day the event belongs to
    /// * `start` - Event start time
    /// * `end` - Event end time
    ///
    /// # Returns
    /// Returns `Result<Event, String>` with validation
    pub fn new(
        title: impl Into<String>,
        day_id: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Self, String> {
        Self::builder()
            .title(title)
            .day_id(day_id)
            .start(start)
            .end(end)
            .build()
    }

    /// Create a builder for constructing events with optional fields
    pub fn builder() -> EventBuilder {
        EventBuilder::new()
    }

    /// Validate the event
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Event title cannot be empty".to_string());
        }

        if self.day_id.trim().is_empty() {
            return Err("Event must reference a trip day".to_string());
        }

        if self.end <= self.start {
            return Err("Event end time must be after start time".to_string());
        }

        if self.start.date() != self.end.date() {
            return Err("Event must start and end on the same calendar day".to_string());
        }

        Ok(())
    }

    /// Get the duration of the event in whole minutes
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Clone this event under a freshly generated identity
    pub fn with_fresh_id(&self) -> Self {
        let mut event = self.clone();
        event.id = new_event_id();
        event
    }
}

/// Generate an opaque event identity
pub fn new_event_id() -> String {
    Uuid::new_v4().to_string()
}

/// Builder for creating events with optional fields
pub struct EventBuilder {
    title: Option<String>,
    day_id: Option<String>,
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
    kind: EventKind,
    note: Option<String>,
    image_refs: Vec<String>,
}

impl EventBuilder {
    /// Create a new event builder
    pub fn new() -> Self {
        Self {
            title: None,
            day_id: None,
            start: None,
            end: None,
            kind: EventKind::Block,
            note: None,
            image_refs: Vec::new(),
        }
    }

    /// Set the event title
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the trip day the event belongs to
    pub fn day_id(mut self, day_id: impl Into<String>) -> Self {
        self.day_id = Some(day_id.into());
        self
    }

    /// Set the start time
    pub fn start(mut self, start: NaiveDateTime) -> Self {
        self.start = Some(start);
        self
    }

    /// Set the end time
    pub fn end(mut self, end: NaiveDateTime) -> Self {
        self.end = Some(end);
        self
    }

    /// Set the event kind
    pub fn kind(mut self, kind: EventKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set the free-form note
    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Set attached image references
    pub fn image_refs(mut self, refs: Vec<String>) -> Self {
        self.image_refs = refs;
        self
    }

    /// Build the event
    pub fn build(self) -> Result<Event, String> {
        let title = self.title.ok_or("Event title is required")?;
        let day_id = self.day_id.ok_or("Event day is required")?;
        let start = self.start.ok_or("Event start time is required")?;
        let end = self.end.ok_or("Event end time is required")?;

        let event = Event {
            id: new_event_id(),
            day_id,
            title,
            start,
            end,
            kind: self.kind,
            note: self.note,
            image_refs: self.image_refs,
        };

        event.validate()?;
        Ok(event)
    }
}

impl Default for EventBuilder {
    fn default() -> Self {
        Self::new()
    }
}
