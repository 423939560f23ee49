//! Scene geometry → `kurbo` paths and bounds.
//!
//! Arcs use the SVG endpoint parameterization: the figure's previous point
//! is `from`, the segment's point is `to`, and `size` holds the radii.
//! Degenerate arcs (zero radius, coincident ends) become straight lines.

use kurbo::{Arc, BezPath, Line, Point, Rect, Shape, SvgArc, Vec2};
use vd_core::{Geometry, PointId, PointStore, Scene, Segment, ShapeKind, ShapeNode, SweepDirection};

/// Flattening tolerance used when approximating arcs with cubics.
pub const ARC_TOLERANCE: f64 = 0.1;

pub(crate) fn kurbo_point(points: &PointStore, id: PointId) -> Point {
    let (x, y) = points.position(id);
    Point::new(x, y)
}

/// Build a `BezPath` for a geometry.
pub fn to_bez_path(points: &PointStore, geometry: &Geometry) -> BezPath {
    let mut path = BezPath::new();

    for figure in &geometry.figures {
        let mut current = kurbo_point(points, figure.start_point);
        path.move_to(current);

        for segment in &figure.segments {
            match segment {
                Segment::Line(s) => {
                    current = kurbo_point(points, s.point);
                    path.line_to(current);
                }
                Segment::Arc(s) => {
                    let to = kurbo_point(points, s.point);
                    let svg = SvgArc {
                        from: current,
                        to,
                        radii: Vec2::new(s.size.width, s.size.height),
                        x_rotation: s.rotation_angle.to_radians(),
                        large_arc: s.is_large_arc,
                        // Positive-angle sweep is clockwise with y pointing down.
                        sweep: s.sweep_direction == SweepDirection::Clockwise,
                    };
                    match Arc::from_svg_arc(&svg) {
                        Some(arc) => path.extend(arc.append_iter(ARC_TOLERANCE)),
                        None => path.line_to(to),
                    }
                    current = to;
                }
                Segment::QuadraticBezier(s) => {
                    current = kurbo_point(points, s.point2);
                    path.quad_to(kurbo_point(points, s.point1), current);
                }
                Segment::CubicBezier(s) => {
                    current = kurbo_point(points, s.point3);
                    path.curve_to(
                        kurbo_point(points, s.point1),
                        kurbo_point(points, s.point2),
                        current,
                    );
                }
            }
        }

        if figure.is_closed {
            path.close_path();
        }
    }

    path
}

/// Outline of a shape as a `BezPath`.
pub fn shape_outline(scene: &Scene, node: &ShapeNode) -> BezPath {
    match &node.kind {
        ShapeKind::Path(geometry) => to_bez_path(&scene.points, geometry),
        ShapeKind::Line { start, end } => {
            let line = Line::new(
                kurbo_point(&scene.points, *start),
                kurbo_point(&scene.points, *end),
            );
            line.to_path(ARC_TOLERANCE)
        }
        ShapeKind::Point { point } => {
            let p = kurbo_point(&scene.points, *point);
            let mut path = BezPath::new();
            path.move_to(p);
            path
        }
    }
}

/// Axis-aligned bounds of a shape. `None` for a path with no figures.
pub fn shape_bounds(scene: &Scene, node: &ShapeNode) -> Option<Rect> {
    match &node.kind {
        ShapeKind::Path(geometry) if geometry.figures.is_empty() => None,
        ShapeKind::Path(geometry) => Some(to_bez_path(&scene.points, geometry).bounding_box()),
        ShapeKind::Line { start, end } => Some(Rect::from_points(
            kurbo_point(&scene.points, *start),
            kurbo_point(&scene.points, *end),
        )),
        ShapeKind::Point { point } => {
            let p = kurbo_point(&scene.points, *point);
            Some(Rect::from_points(p, p))
        }
    }
}
