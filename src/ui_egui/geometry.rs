//! Building grid geometry from laid-out egui widgets.

use egui::{Pos2, Rect};

use crate::models::segment::Hit;
use crate::services::coord_cache::{Axis, CoordinateCache, GridGeometry, Span};
use crate::services::day_table::DayTable;
use crate::services::time_grid::TimeGrid;

/// Slat cache from the rects of the slat rows, measured from `origin_top`.
pub fn vertical_cache_from_rects(rects: &[Rect], origin_top: f32) -> CoordinateCache {
    let spans = rects
        .iter()
        .map(|rect| Span::new(rect.top() as f64, rect.bottom() as f64))
        .collect();
    CoordinateCache::new(Axis::Vertical, origin_top as f64, spans)
}

/// Column cache from the rects of the day columns, measured from
/// `origin_left`.
pub fn horizontal_cache_from_rects(rects: &[Rect], origin_left: f32) -> CoordinateCache {
    let spans = rects
        .iter()
        .map(|rect| Span::new(rect.left() as f64, rect.right() as f64))
        .collect();
    CoordinateCache::new(Axis::Horizontal, origin_left as f64, spans)
}

/// Geometry of a grid drawn inside `grid_rect`.
pub fn geometry_from_rects(grid_rect: Rect, slat_rects: &[Rect], col_rects: &[Rect]) -> GridGeometry {
    GridGeometry::new(
        vertical_cache_from_rects(slat_rects, grid_rect.top()),
        horizontal_cache_from_rects(col_rects, grid_rect.left()),
        grid_rect.height() as f64,
    )
}

pub fn query_hit_at<D: DayTable>(grid: &TimeGrid<D>, pos: Pos2) -> Option<Hit> {
    grid.query_hit(pos.x as f64, pos.y as f64)
}

/// Screen rect of the cell a hit stands for.
pub fn hit_rect(hit: &Hit) -> Rect {
    Rect::from_min_max(
        egui::pos2(hit.left as f32, hit.top as f32),
        egui::pos2(hit.right as f32, hit.bottom as f32),
    )
}
