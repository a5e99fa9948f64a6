// Service module exports

pub mod config;
pub mod coord_cache;
pub mod day_table;
pub mod interaction;
pub mod time_grid;
