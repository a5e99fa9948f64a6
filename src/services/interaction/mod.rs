// Interaction module
// Pointer-driven selection and drag over any time coordinate provider

use crate::models::segment::Hit;
use crate::models::time_range::{ComponentFootprint, TimeRange};
use crate::services::time_grid::TimeCoordinateProvider;

/// Tracks a click-and-drag selection of empty grid cells.
#[derive(Debug, Clone, Default)]
pub struct SelectionTracker {
    origin: Option<Hit>,
    current: Option<Hit>,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.origin.is_some()
    }

    pub fn origin(&self) -> Option<&Hit> {
        self.origin.as_ref()
    }

    pub fn current(&self) -> Option<&Hit> {
        self.current.as_ref()
    }

    /// Start selecting at the pointer. Returns the origin hit, or `None`
    /// when the pointer is not over a cell.
    pub fn pointer_down<P: TimeCoordinateProvider>(&mut self, provider: &P, left: f64, top: f64) -> Option<Hit> {
        let hit = provider.query_hit(left, top);
        self.origin = hit;
        self.current = hit;
        hit
    }

    /// Follow the pointer. Reports the hit only when it moved to another
    /// cell; leaving the grid keeps the last cell.
    pub fn pointer_move<P: TimeCoordinateProvider>(&mut self, provider: &P, left: f64, top: f64) -> Option<Hit> {
        self.origin?;
        let hit = provider.query_hit(left, top)?;
        let changed = self.current.map_or(true, |current| !current.is_same_cell(&hit));
        if changed {
            self.current = Some(hit);
            Some(hit)
        } else {
            None
        }
    }

    /// Finish the selection and return the footprint spanning the origin
    /// and final cells.
    pub fn pointer_up<P: TimeCoordinateProvider>(&mut self, provider: &P) -> Option<ComponentFootprint> {
        let origin = self.origin.take()?;
        let current = self.current.take().unwrap_or(origin);

        let first = provider.hit_footprint(&origin)?;
        let last = provider.hit_footprint(&current)?;
        let range = TimeRange::new(
            first.range.start_ms.min(last.range.start_ms),
            first.range.end_ms.max(last.range.end_ms),
        );
        log::debug!("selection finished: {}..{}", range.start_ms, range.end_ms);
        Some(ComponentFootprint::new(range, false))
    }

    pub fn cancel(&mut self) {
        self.origin = None;
        self.current = None;
    }
}

/// State of one drag of an existing range.
#[derive(Debug, Clone, PartialEq)]
pub struct DragContext {
    pub original: TimeRange,
    /// Footprint of the cell the drag started from.
    pub origin: ComponentFootprint,
    pub hovered: Option<Hit>,
}

impl DragContext {
    pub fn duration_ms(&self) -> i64 {
        self.original.duration_ms()
    }
}

/// Moves a range so that its start follows the pointer in whole snaps.
#[derive(Debug, Clone, Default)]
pub struct DragTracker {
    context: Option<DragContext>,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<&DragContext> {
        self.context.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.context.is_some()
    }

    /// Grab `range` at the pointer. Returns `false` when the pointer is
    /// outside the grid.
    pub fn begin<P: TimeCoordinateProvider>(&mut self, provider: &P, range: TimeRange, left: f64, top: f64) -> bool {
        let Some(hit) = provider.query_hit(left, top) else {
            return false;
        };
        let Some(origin) = provider.hit_footprint(&hit) else {
            return false;
        };
        self.context = Some(DragContext {
            original: range,
            origin,
            hovered: Some(hit),
        });
        true
    }

    /// Range the dragged item would occupy with the pointer at this
    /// position, or `None` outside the grid.
    pub fn update<P: TimeCoordinateProvider>(&mut self, provider: &P, left: f64, top: f64) -> Option<TimeRange> {
        let context = self.context.as_mut()?;
        let hit = provider.query_hit(left, top)?;
        context.hovered = Some(hit);
        let footprint = provider.hit_footprint(&hit)?;
        Some(Self::moved_range(provider, context, &footprint))
    }

    /// Drop at the last hovered cell.
    pub fn finish<P: TimeCoordinateProvider>(&mut self, provider: &P) -> Option<TimeRange> {
        let context = self.context.take()?;
        let hit = context.hovered?;
        let footprint = provider.hit_footprint(&hit)?;
        let moved = Self::moved_range(provider, &context, &footprint);
        log::debug!(
            "drag moved {}..{} to {}..{}",
            context.original.start_ms,
            context.original.end_ms,
            moved.start_ms,
            moved.end_ms
        );
        Some(moved)
    }

    pub fn cancel(&mut self) {
        self.context = None;
    }

    fn moved_range<P: TimeCoordinateProvider>(
        provider: &P,
        context: &DragContext,
        hovered: &ComponentFootprint,
    ) -> TimeRange {
        let delta = hovered.range.start_ms - context.origin.range.start_ms;
        let moved = TimeRange::new(context.original.start_ms + delta, context.original.end_ms + delta);
        provider.snap_range(moved)
    }
}
