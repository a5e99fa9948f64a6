//! Slicing ranges into day segments and placing them vertically.

use super::TimeGrid;
use crate::models::segment::Segment;
use crate::models::time_range::{ComponentFootprint, TimeRange};
use crate::services::day_table::DayTable;
use crate::utils::date::date_to_ms;

/// Top/bottom offsets for a segment's element. `bottom` is the distance
/// beyond the bottom edge of the column, hence negated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegVerticalCss {
    pub top: f64,
    pub bottom: f64,
}

impl SegVerticalCss {
    pub fn for_segment(seg: &Segment) -> Option<Self> {
        Some(Self {
            top: seg.top?,
            bottom: -seg.bottom?,
        })
    }
}

/// Something drawn for a segment that follows its vertical placement.
pub trait SegmentView {
    fn segment(&self) -> &Segment;

    fn segment_mut(&mut self) -> &mut Segment;

    /// Push freshly computed verticals to whatever draws the segment.
    fn apply_verticals(&mut self, css: SegVerticalCss);
}

impl SegmentView for Segment {
    fn segment(&self) -> &Segment {
        self
    }

    fn segment_mut(&mut self) -> &mut Segment {
        self
    }

    fn apply_verticals(&mut self, _css: SegVerticalCss) {}
}

/// A per-column holder that segment views are attached to.
pub trait SegmentContainer<S> {
    fn attach(&mut self, seg: S);
}

impl<S> SegmentContainer<S> for Vec<S> {
    fn attach(&mut self, seg: S) {
        self.push(seg);
    }
}

impl<D: DayTable> TimeGrid<D> {
    /// Intersect `range` with each visible day, one segment per overlap.
    pub fn slice_range_by_times(&self, range: &TimeRange) -> Vec<Segment> {
        self.day_ranges
            .iter()
            .enumerate()
            .filter_map(|(day_index, day_range)| {
                range
                    .intersect(day_range)
                    .map(|seg_range| Segment::from_range(&seg_range, day_index))
            })
            .collect()
    }

    /// Slice a footprint and assign each segment its visual column.
    pub fn component_footprint_to_segs(&self, footprint: &ComponentFootprint) -> Vec<Segment> {
        let mut segs = self.slice_range_by_times(&footprint.range);
        for seg in &mut segs {
            seg.col = self.days.day_index_to_col(seg.day_index);
        }
        segs
    }

    /// Partition segments by column, keeping input order within a column.
    pub fn group_segs_by_col<S: SegmentView>(&self, segs: Vec<S>) -> Vec<Vec<S>> {
        let col_count = self.days.col_count();
        let mut segs_by_col: Vec<Vec<S>> = (0..col_count).map(|_| Vec::new()).collect();

        for seg in segs {
            let col = seg.segment().col;
            match segs_by_col.get_mut(col) {
                Some(column) => column.push(seg),
                None => log::warn!("segment in column {} outside {} columns, skipping", col, col_count),
            }
        }

        segs_by_col
    }

    /// Hand each column's segments, in order, to the matching container.
    pub fn attach_segs_by_col<S, C>(&self, segs_by_col: Vec<Vec<S>>, containers: &mut [C])
    where
        C: SegmentContainer<S>,
    {
        for (segs, container) in segs_by_col.into_iter().zip(containers.iter_mut()) {
            for seg in segs {
                container.attach(seg);
            }
        }
    }

    /// Fill in `top`/`bottom` of each segment. Every segment is at least the
    /// minimum event height tall.
    pub fn compute_seg_verticals<S: SegmentView>(&self, segs: &mut [S]) {
        let min_height = self.metrics.min_event_height;
        let day_dates = self.days.day_dates();

        for view in segs.iter_mut() {
            let seg = view.segment_mut();
            let Some(day_ms) = day_dates.get(seg.day_index).map(|day| date_to_ms(*day)) else {
                continue;
            };
            let top = self.compute_date_top(seg.start_ms, day_ms);
            let bottom = (top + min_height).max(self.compute_date_top(seg.end_ms, day_ms));
            seg.top = Some(top);
            seg.bottom = Some(bottom);
        }
    }

    /// Push already computed verticals to the segment views.
    pub fn assign_seg_verticals<S: SegmentView>(&self, segs: &mut [S]) {
        for view in segs.iter_mut() {
            if let Some(css) = SegVerticalCss::for_segment(view.segment()) {
                view.apply_verticals(css);
            }
        }
    }

    /// Recompute and apply verticals, e.g. after a resize.
    pub fn update_seg_verticals<S: SegmentView>(&self, segs: &mut [S]) {
        self.compute_seg_verticals(segs);
        self.assign_seg_verticals(segs);
    }

    /// Rebuild the geometry for a new frame and re-place `segs` on it.
    pub fn resize<S: SegmentView>(&mut self, frame: super::GridFrame, segs: &mut [S]) {
        self.layout(frame);
        self.update_seg_verticals(segs);
    }
}
