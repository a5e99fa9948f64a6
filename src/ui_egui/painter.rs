//! Painting the slat rows and the now-indicator.

use egui::{pos2, Align2, Color32, FontId, Painter, Rect, Shape, Stroke, Visuals};

use crate::services::day_table::DayTable;
use crate::services::time_grid::{AxisSide, NowIndicator, SlatRow, TimeGrid};

fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

fn blend(a: Color32, b: Color32, t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let lerp = |c1: u8, c2: u8| -> u8 { ((c1 as f32 * (1.0 - t)) + (c2 as f32 * t)).round() as u8 };
    Color32::from_rgb(lerp(a.r(), b.r()), lerp(a.g(), b.g()), lerp(a.b(), b.b()))
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeGridPalette {
    pub major_line: Color32,
    pub minor_line: Color32,
    pub break_bg: Color32,
    pub label_text: Color32,
    pub now_line: Color32,
}

impl Default for TimeGridPalette {
    fn default() -> Self {
        Self::from_visuals(&Visuals::light())
    }
}

impl TimeGridPalette {
    pub fn from_visuals(visuals: &Visuals) -> Self {
        let border = visuals.widgets.noninteractive.bg_stroke.color;
        Self {
            major_line: border,
            minor_line: with_alpha(border, 120),
            break_bg: blend(visuals.extreme_bg_color, visuals.faint_bg_color, 0.5),
            label_text: visuals.weak_text_color(),
            now_line: Color32::from_rgb(255, 100, 100),
        }
    }
}

const LABEL_GAP: f32 = 4.0;

/// Horizontal extent of the day columns, or `None` before layout.
fn columns_span<D: DayTable>(grid: &TimeGrid<D>) -> Option<(f32, f32)> {
    let cols = &grid.geometry().cols;
    if cols.is_empty() {
        return None;
    }
    Some((cols.left_offset(0) as f32, cols.right_offset(cols.len() - 1) as f32))
}

/// Row separators and break fills for `rows` stacked from `top`.
pub fn slat_shapes(rows: &[SlatRow], left: f32, right: f32, top: f32, palette: &TimeGridPalette) -> Vec<Shape> {
    let mut shapes = Vec::with_capacity(rows.len() + 1);
    let mut y = top;

    for row in rows {
        let height = row.height.max(0.0) as f32;
        if row.is_break() {
            shapes.push(Shape::rect_filled(
                Rect::from_min_max(pos2(left, y), pos2(right, y + height)),
                0.0,
                palette.break_bg,
            ));
        } else {
            let color = if row.is_minor { palette.minor_line } else { palette.major_line };
            shapes.push(Shape::line_segment([pos2(left, y), pos2(right, y)], Stroke::new(1.0, color)));
        }
        y += height;
    }

    if !rows.is_empty() {
        shapes.push(Shape::line_segment(
            [pos2(left, y), pos2(right, y)],
            Stroke::new(1.0, palette.major_line),
        ));
    }
    shapes
}

/// Draw the slat rows across the day columns and their labels on the axis
/// side. Does nothing before the grid has been laid out.
pub fn paint_slats<D: DayTable>(painter: &Painter, grid: &TimeGrid<D>, palette: &TimeGridPalette) {
    let Some((left, right)) = columns_span(grid) else {
        return;
    };
    let top = grid.geometry().origin_top() as f32;
    let rows = grid.slat_rows();
    painter.extend(slat_shapes(&rows, left, right, top, palette));

    let (x, anchor) = match grid.axis_side() {
        AxisSide::Left => (left - LABEL_GAP, Align2::RIGHT_TOP),
        AxisSide::Right => (right + LABEL_GAP, Align2::LEFT_TOP),
    };
    let mut y = top;
    for row in &rows {
        if let Some(label) = &row.label {
            painter.text(pos2(x, y), anchor, label, FontId::proportional(11.0), palette.label_text);
        }
        y += row.height.max(0.0) as f32;
    }
}

/// Lines across each column showing now, plus the axis arrow.
pub fn now_indicator_shapes<D: DayTable>(
    grid: &TimeGrid<D>,
    indicator: &NowIndicator,
    palette: &TimeGridPalette,
) -> Vec<Shape> {
    let geometry = grid.geometry();
    let origin_top = geometry.origin_top() as f32;
    let stroke = Stroke::new(2.0, palette.now_line);

    let mut shapes: Vec<Shape> = indicator
        .lines
        .iter()
        .filter(|line| line.col < geometry.cols.len())
        .map(|line| {
            let y = origin_top + line.top as f32;
            Shape::line_segment(
                [
                    pos2(geometry.cols.left_offset(line.col) as f32, y),
                    pos2(geometry.cols.right_offset(line.col) as f32, y),
                ],
                stroke,
            )
        })
        .collect();

    if let (Some(arrow), Some((left, right))) = (indicator.arrow, columns_span(grid)) {
        let x = match grid.axis_side() {
            AxisSide::Left => left - LABEL_GAP,
            AxisSide::Right => right + LABEL_GAP,
        };
        shapes.push(Shape::circle_filled(pos2(x, origin_top + arrow as f32), 3.0, palette.now_line));
    }
    shapes
}

/// Paint the indicator for `now_ms`. Returns whether anything was drawn.
pub fn paint_now_indicator<D: DayTable>(
    painter: &Painter,
    grid: &TimeGrid<D>,
    now_ms: i64,
    palette: &TimeGridPalette,
) -> bool {
    let Some(indicator) = grid.render_now_indicator(now_ms) else {
        return false;
    };
    let shapes = now_indicator_shapes(grid, &indicator, palette);
    let drawn = !shapes.is_empty();
    painter.extend(shapes);
    drawn
}
