//! egui adapter for the agenda time grid: geometry measured from widgets,
//! painting, and drag state kept across frames.

pub mod drag;
pub mod geometry;
pub mod painter;

pub use drag::DragManager;
pub use geometry::{geometry_from_rects, horizontal_cache_from_rects, query_hit_at, vertical_cache_from_rects};
pub use painter::{paint_now_indicator, paint_slats, TimeGridPalette};
