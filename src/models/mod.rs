// Module exports for models

pub mod day;
pub mod event;
pub mod idea;
pub mod recurrence;
pub mod settings;
