// Coordinate cache
// Pixel spans of laid-out rows or columns, queried by index or offset

/// Direction a cache measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Vertical,
    Horizontal,
}

/// One row or column, in absolute (pointer-space) pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub start: f64,
    pub end: f64,
}

impl Span {
    pub fn new(start: f64, end: f64) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    pub fn size(&self) -> f64 {
        self.end - self.start
    }
}

/// Cumulative offsets of an ordered run of rows (or columns).
///
/// Spans are sorted and never overlap, but may leave gaps (break rows that
/// take space without being addressable). Offsets are absolute; positions
/// are relative to `origin`, the edge of the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateCache {
    axis: Axis,
    origin: f64,
    spans: Vec<Span>,
}

impl CoordinateCache {
    pub fn new(axis: Axis, origin: f64, mut spans: Vec<Span>) -> Self {
        spans.sort_by(|a, b| a.start.total_cmp(&b.start));
        Self { axis, origin, spans }
    }

    /// Contiguous spans of the given sizes starting at `origin`.
    pub fn from_sizes(axis: Axis, origin: f64, sizes: &[f64]) -> Self {
        let mut cursor = origin;
        let spans = sizes
            .iter()
            .map(|size| {
                let span = Span::new(cursor, cursor + size.max(0.0));
                cursor = span.end;
                span
            })
            .collect();
        Self { axis, origin, spans }
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn origin(&self) -> f64 {
        self.origin
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// Index of the span containing `offset` (start inclusive, end
    /// exclusive). Offsets in a gap or outside the cache resolve to `None`.
    pub fn index_at(&self, offset: f64) -> Option<usize> {
        let index = self.spans.partition_point(|span| span.end <= offset);
        self.spans
            .get(index)
            .filter(|span| span.start <= offset && offset < span.end)
            .map(|_| index)
    }

    pub fn is_in_bounds(&self, offset: f64) -> bool {
        match (self.spans.first(), self.spans.last()) {
            (Some(first), Some(last)) => first.start <= offset && offset < last.end,
            _ => false,
        }
    }

    pub fn start_offset(&self, index: usize) -> f64 {
        self.span_or_edge(index).start
    }

    pub fn end_offset(&self, index: usize) -> f64 {
        self.span_or_edge(index).end
    }

    pub fn size(&self, index: usize) -> f64 {
        self.spans.get(index).map_or(0.0, Span::size)
    }

    /// Start relative to the origin. `index == len()` is the virtual span
    /// just past the last one, i.e. the end of the last span.
    pub fn start_position(&self, index: usize) -> f64 {
        self.start_offset(index) - self.origin
    }

    pub fn end_position(&self, index: usize) -> f64 {
        self.end_offset(index) - self.origin
    }

    /// Distance from the origin to the end of the last span.
    pub fn extent(&self) -> f64 {
        self.spans.last().map_or(0.0, |span| span.end - self.origin)
    }

    fn span_or_edge(&self, index: usize) -> Span {
        match self.spans.get(index) {
            Some(span) => *span,
            None => {
                let edge = self.spans.last().map_or(self.origin, |span| span.end);
                Span::new(edge, edge)
            }
        }
    }

    // Vertical vocabulary

    pub fn top_offset(&self, index: usize) -> f64 {
        self.start_offset(index)
    }

    pub fn bottom_offset(&self, index: usize) -> f64 {
        self.end_offset(index)
    }

    pub fn top_position(&self, index: usize) -> f64 {
        self.start_position(index)
    }

    pub fn bottom_position(&self, index: usize) -> f64 {
        self.end_position(index)
    }

    pub fn height(&self, index: usize) -> f64 {
        self.size(index)
    }

    // Horizontal vocabulary

    pub fn left_offset(&self, index: usize) -> f64 {
        self.start_offset(index)
    }

    pub fn right_offset(&self, index: usize) -> f64 {
        self.end_offset(index)
    }
}

/// The two caches of a laid-out grid: slat rows and day columns.
#[derive(Debug, Clone, PartialEq)]
pub struct GridGeometry {
    pub slats: CoordinateCache,
    pub cols: CoordinateCache,
    /// Full height of the slat area including break rows.
    pub total_height: f64,
}

impl GridGeometry {
    pub fn new(slats: CoordinateCache, cols: CoordinateCache, total_height: f64) -> Self {
        Self {
            slats,
            cols,
            total_height,
        }
    }

    /// Top edge of the grid in pointer space.
    pub fn origin_top(&self) -> f64 {
        self.slats.origin()
    }

    pub fn has_columns(&self) -> bool {
        !self.cols.is_empty()
    }
}
