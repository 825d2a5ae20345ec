// Service module exports

pub mod drag;
pub mod planner;
pub mod recurrence;
pub mod slot;
pub mod timegrid;
