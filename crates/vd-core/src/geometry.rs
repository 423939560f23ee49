//! Path geometry: segments, figures, and geometries.
//!
//! A figure's first segment starts at `start_point`; every later segment
//! starts where the previous one ends. Segments store only the points they
//! introduce, so the start anchor of segment *n+1* is, by construction, the
//! very same [`PointId`] as the end of segment *n*.

use crate::id::PointId;
use serde::{Deserialize, Serialize};

/// Width/height pair. Used for the radii of an elliptical arc.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Axis-aligned extent of the rectangle spanned by two corners.
    pub fn between(a: (f64, f64), b: (f64, f64)) -> Self {
        Self {
            width: (a.0 - b.0).abs(),
            height: (a.1 - b.1).abs(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SweepDirection {
    #[default]
    Clockwise,
    CounterClockwise,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FillRule {
    #[default]
    EvenOdd,
    NonZero,
}

/// Rendering flags carried by every segment. Opaque to the editing logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentFlags {
    pub is_stroked: bool,
    pub is_smooth_join: bool,
}

impl Default for SegmentFlags {
    fn default() -> Self {
        Self {
            is_stroked: true,
            is_smooth_join: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub point: PointId,
    pub flags: SegmentFlags,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcSegment {
    pub point: PointId,
    pub size: Size,
    /// Rotation of the ellipse's x-axis, in degrees.
    pub rotation_angle: f64,
    pub is_large_arc: bool,
    pub sweep_direction: SweepDirection,
    pub flags: SegmentFlags,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuadraticBezierSegment {
    /// Control point.
    pub point1: PointId,
    /// End point.
    pub point2: PointId,
    pub flags: SegmentFlags,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubicBezierSegment {
    pub point1: PointId,
    pub point2: PointId,
    /// End point.
    pub point3: PointId,
    pub flags: SegmentFlags,
}

/// One piece of a figure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Segment {
    Line(LineSegment),
    Arc(ArcSegment),
    QuadraticBezier(QuadraticBezierSegment),
    CubicBezier(CubicBezierSegment),
}

/// Discriminant of [`Segment`], used for type-checked removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SegmentKind {
    Line,
    Arc,
    QuadraticBezier,
    CubicBezier,
}

impl Segment {
    pub fn line(point: PointId, flags: SegmentFlags) -> Self {
        Segment::Line(LineSegment { point, flags })
    }

    /// An arc with no rotation, small-arc, clockwise sweep.
    pub fn arc(point: PointId, size: Size, flags: SegmentFlags) -> Self {
        Segment::Arc(ArcSegment {
            point,
            size,
            rotation_angle: 0.0,
            is_large_arc: false,
            sweep_direction: SweepDirection::Clockwise,
            flags,
        })
    }

    pub fn quadratic(point1: PointId, point2: PointId, flags: SegmentFlags) -> Self {
        Segment::QuadraticBezier(QuadraticBezierSegment {
            point1,
            point2,
            flags,
        })
    }

    pub fn cubic(point1: PointId, point2: PointId, point3: PointId, flags: SegmentFlags) -> Self {
        Segment::CubicBezier(CubicBezierSegment {
            point1,
            point2,
            point3,
            flags,
        })
    }

    pub fn kind(&self) -> SegmentKind {
        match self {
            Segment::Line(_) => SegmentKind::Line,
            Segment::Arc(_) => SegmentKind::Arc,
            Segment::QuadraticBezier(_) => SegmentKind::QuadraticBezier,
            Segment::CubicBezier(_) => SegmentKind::CubicBezier,
        }
    }

    /// The point where this segment ends and the next one starts.
    pub fn end_point(&self) -> PointId {
        match self {
            Segment::Line(s) => s.point,
            Segment::Arc(s) => s.point,
            Segment::QuadraticBezier(s) => s.point2,
            Segment::CubicBezier(s) => s.point3,
        }
    }

    pub fn flags(&self) -> SegmentFlags {
        match self {
            Segment::Line(s) => s.flags,
            Segment::Arc(s) => s.flags,
            Segment::QuadraticBezier(s) => s.flags,
            Segment::CubicBezier(s) => s.flags,
        }
    }

    /// Every point this segment introduces, control points first.
    pub fn points(&self) -> impl Iterator<Item = PointId> {
        let (buf, len): ([PointId; 3], usize) = match *self {
            Segment::Line(s) => ([s.point; 3], 1),
            Segment::Arc(s) => ([s.point; 3], 1),
            Segment::QuadraticBezier(s) => ([s.point1, s.point2, s.point2], 2),
            Segment::CubicBezier(s) => ([s.point1, s.point2, s.point3], 3),
        };
        buf.into_iter().take(len)
    }
}

/// One continuous sub-path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub start_point: PointId,
    pub segments: Vec<Segment>,
    pub is_closed: bool,
}

impl Figure {
    pub fn new(start_point: PointId, is_closed: bool) -> Self {
        Self {
            start_point,
            segments: Vec::new(),
            is_closed,
        }
    }

    /// The figure's logical end: the last segment's end point, or the start
    /// point while the figure has no segments.
    pub fn last_point(&self) -> PointId {
        self.segments
            .last()
            .map(Segment::end_point)
            .unwrap_or(self.start_point)
    }

    /// The start anchor of the segment at `index`.
    pub fn segment_start(&self, index: usize) -> Option<PointId> {
        match index {
            0 if !self.segments.is_empty() => Some(self.start_point),
            i => self.segments.get(i).map(|_| self.segments[i - 1].end_point()),
        }
    }

    /// Pop the last segment only if it is of `kind`.
    pub fn remove_last_of(&mut self, kind: SegmentKind) -> Option<Segment> {
        match self.segments.last() {
            Some(last) if last.kind() == kind => self.segments.pop(),
            _ => None,
        }
    }

    /// Every point the figure references, start point first.
    pub fn points(&self) -> impl Iterator<Item = PointId> + '_ {
        std::iter::once(self.start_point).chain(self.segments.iter().flat_map(Segment::points))
    }
}

/// An ordered set of figures.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Geometry {
    pub figures: Vec<Figure>,
    pub fill_rule: FillRule,
}

impl Geometry {
    pub fn new(fill_rule: FillRule) -> Self {
        Self {
            figures: Vec::new(),
            fill_rule,
        }
    }

    pub fn last_figure(&self) -> Option<&Figure> {
        self.figures.last()
    }

    pub fn last_figure_mut(&mut self) -> Option<&mut Figure> {
        self.figures.last_mut()
    }

    /// Total number of segments across all figures.
    pub fn segment_count(&self) -> usize {
        self.figures.iter().map(|f| f.segments.len()).sum()
    }

    pub fn points(&self) -> impl Iterator<Item = PointId> + '_ {
        self.figures.iter().flat_map(Figure::points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::PointStore;
    use pretty_assertions::assert_eq;

    fn flags() -> SegmentFlags {
        SegmentFlags::default()
    }

    #[test]
    fn last_point_follows_segment_variant() {
        let mut store = PointStore::new();
        let start = store.create(0.0, 0.0);
        let c1 = store.create(1.0, 1.0);
        let c2 = store.create(2.0, 2.0);
        let end = store.create(3.0, 3.0);

        let mut figure = Figure::new(start, false);
        assert_eq!(figure.last_point(), start);

        figure.segments.push(Segment::cubic(c1, c2, end, flags()));
        assert_eq!(figure.last_point(), end);

        let q_end = store.create(4.0, 4.0);
        figure.segments.push(Segment::quadratic(c1, q_end, flags()));
        assert_eq!(figure.last_point(), q_end);
    }

    #[test]
    fn remove_last_of_checks_kind() {
        let mut store = PointStore::new();
        let start = store.create(0.0, 0.0);
        let p = store.create(1.0, 0.0);
        let mut figure = Figure::new(start, false);
        figure.segments.push(Segment::cubic(p, p, p, flags()));

        assert!(figure.remove_last_of(SegmentKind::Line).is_none());
        assert_eq!(figure.segments.len(), 1);

        assert!(figure.remove_last_of(SegmentKind::CubicBezier).is_some());
        assert!(figure.segments.is_empty());
        assert!(figure.remove_last_of(SegmentKind::CubicBezier).is_none());
    }

    #[test]
    fn segment_start_is_previous_end() {
        let mut store = PointStore::new();
        let start = store.create(0.0, 0.0);
        let a = store.create(1.0, 0.0);
        let b = store.create(2.0, 0.0);
        let mut figure = Figure::new(start, false);
        figure.segments.push(Segment::line(a, flags()));
        figure.segments.push(Segment::arc(b, Size::ZERO, flags()));

        assert_eq!(figure.segment_start(0), Some(start));
        assert_eq!(figure.segment_start(1), Some(a));
        assert_eq!(figure.segment_start(2), None);
    }

    #[test]
    fn size_between_is_axis_aligned_extent() {
        assert_eq!(
            Size::between((10.0, 2.0), (4.0, 7.0)),
            Size::new(6.0, 5.0)
        );
    }

    #[test]
    fn figure_points_lists_start_then_segment_points() {
        let mut store = PointStore::new();
        let start = store.create(0.0, 0.0);
        let c = store.create(1.0, 1.0);
        let e = store.create(2.0, 0.0);
        let mut figure = Figure::new(start, false);
        figure.segments.push(Segment::quadratic(c, e, flags()));

        let points: Vec<_> = figure.points().collect();
        assert_eq!(points, vec![start, c, e]);
    }
}
