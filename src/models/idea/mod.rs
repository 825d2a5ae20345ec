// Idea module
// Reusable, day-independent activity template

use serde::{Deserialize, Serialize};

/// Fallback scheduling duration when an idea carries no suggestion
pub const DEFAULT_IDEA_DURATION_MINUTES: u32 = 60;

/// A saved idea, not yet bound to a day or time. Read-only input to the
/// slot finder; the core never mutates one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Idea {
    pub title: String,
    pub suggested_duration_minutes: Option<u32>,
    pub tags: Vec<String>,
    pub address: Option<String>,
}

impl Idea {
    /// Create an idea with just a title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            suggested_duration_minutes: None,
            tags: Vec::new(),
            address: None,
        }
    }

    /// Duration to schedule this idea with, falling back to the default
    pub fn duration_minutes(&self) -> u32 {
        self.suggested_duration_minutes
            .unwrap_or(DEFAULT_IDEA_DURATION_MINUTES)
    }
}
