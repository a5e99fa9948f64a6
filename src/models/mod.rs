// Module exports for models

pub mod date_profile;
pub mod schedule;
pub mod segment;
pub mod settings;
pub mod slot;
pub mod time_range;
