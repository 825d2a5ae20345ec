// Recurrence module
// Policy controlling how a drafted event is duplicated across trip days

use serde::{Deserialize, Serialize};

/// Consumed once per scheduling action; never persisted on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum RecurrencePolicy {
    /// Schedule on the chosen day only
    None,
    /// Repeat daily for a total of `days` days, counting the chosen day
    Daily { days: u32 },
    /// Repeat daily through the trip's last day
    UntilTripEnd,
}
