//! Hit testing: point → connection point / shape lookup.
//!
//! Candidates are passed in drawing order; they are walked in reverse so the
//! topmost shape wins. Distances are in canvas units and compared against
//! the tester's threshold.

use crate::path::{kurbo_point, shape_outline};
use kurbo::{Line, ParamCurveNearest, Point, Shape};
use vd_core::{PointId, Scene, ShapeId, ShapeKind, ShapeNode};

/// Accuracy passed to `kurbo`'s nearest-point solver.
const NEAREST_ACCURACY: f64 = 1e-6;

/// Queries the editor makes against existing geometry.
pub trait HitTester {
    /// Find an existing point (shape point or connector) near `(x, y)`.
    fn try_get_connection_point(
        &self,
        scene: &Scene,
        candidates: &[ShapeId],
        x: f64,
        y: f64,
    ) -> Option<PointId>;

    /// Find the shape under `(x, y)` for hover feedback.
    fn try_hover_shape(&self, scene: &Scene, candidates: &[ShapeId], x: f64, y: f64)
    -> Option<ShapeId>;

    /// Split a line shape near `(x, y)` at `point`.
    ///
    /// The default implementation never splits.
    fn try_split_line(
        &self,
        _scene: &mut Scene,
        _candidates: &[ShapeId],
        _x: f64,
        _y: f64,
        _point: PointId,
    ) -> Option<LineSplit> {
        None
    }
}

/// Result of splitting a line at a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSplit {
    /// The original line, now ending at the split point.
    pub line: ShapeId,
    /// The new second half, from the split point to `old_end`.
    pub added: ShapeId,
    pub old_end: PointId,
}

/// Hit tester over the scene's own geometry.
#[derive(Debug, Clone, Copy)]
pub struct SceneHitTester {
    pub threshold: f64,
}

impl Default for SceneHitTester {
    fn default() -> Self {
        Self { threshold: 7.0 }
    }
}

impl SceneHitTester {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    fn distance_to_outline(scene: &Scene, node: &ShapeNode, p: Point) -> f64 {
        match &node.kind {
            ShapeKind::Point { point } => kurbo_point(&scene.points, *point).distance(p),
            ShapeKind::Line { start, end } => {
                let line = Line::new(
                    kurbo_point(&scene.points, *start),
                    kurbo_point(&scene.points, *end),
                );
                line.nearest(p, NEAREST_ACCURACY).distance_sq.sqrt()
            }
            ShapeKind::Path(_) => shape_outline(scene, node)
                .segments()
                .map(|seg| seg.nearest(p, NEAREST_ACCURACY).distance_sq)
                .fold(f64::INFINITY, f64::min)
                .sqrt(),
        }
    }
}

impl HitTester for SceneHitTester {
    fn try_get_connection_point(
        &self,
        scene: &Scene,
        candidates: &[ShapeId],
        x: f64,
        y: f64,
    ) -> Option<PointId> {
        let mut best: Option<(PointId, f64)> = None;

        for &id in candidates.iter().rev() {
            let Some(node) = scene.shape(id) else {
                continue;
            };
            let points = node.points();
            for p in node.connectors.iter().chain(points.iter()).copied() {
                let Some(point) = scene.point(p) else {
                    continue;
                };
                // A connector only counts for the shape that owns it.
                if point.owner.is_some_and(|owner| owner != id) {
                    continue;
                }
                let d = point.distance_to(x, y);
                if d <= self.threshold && best.is_none_or(|(_, bd)| d < bd) {
                    best = Some((p, d));
                }
            }
        }

        if let Some((p, d)) = best {
            log::trace!("connection point {p} at distance {d:.2} near ({x}, {y})");
        }
        best.map(|(p, _)| p)
    }

    fn try_hover_shape(
        &self,
        scene: &Scene,
        candidates: &[ShapeId],
        x: f64,
        y: f64,
    ) -> Option<ShapeId> {
        let p = Point::new(x, y);
        candidates.iter().rev().copied().find(|&id| {
            let Some(node) = scene.shape(id) else {
                return false;
            };
            if node.is_filled
                && matches!(node.kind, ShapeKind::Path(_))
                && shape_outline(scene, node).contains(p)
            {
                return true;
            }
            Self::distance_to_outline(scene, node, p) <= self.threshold
        })
    }

    fn try_split_line(
        &self,
        scene: &mut Scene,
        candidates: &[ShapeId],
        x: f64,
        y: f64,
        point: PointId,
    ) -> Option<LineSplit> {
        let p = Point::new(x, y);

        let target = candidates.iter().rev().copied().find(|&id| {
            let Some(node) = scene.shape(id) else {
                return false;
            };
            let ShapeKind::Line { start, end } = node.kind else {
                return false;
            };
            if start == point || end == point {
                return false;
            }
            let line = Line::new(
                kurbo_point(&scene.points, start),
                kurbo_point(&scene.points, end),
            );
            let nearest = line.nearest(p, NEAREST_ACCURACY);
            nearest.distance_sq.sqrt() <= self.threshold && nearest.t > 0.0 && nearest.t < 1.0
        })?;

        let node = scene.shape_mut(target)?;
        let ShapeKind::Line { end, .. } = &mut node.kind else {
            return None;
        };
        let old_end = std::mem::replace(end, point);

        let mut second = node.clone();
        second.id = ShapeId::with_prefix("line");
        second.kind = ShapeKind::Line {
            start: point,
            end: old_end,
        };
        second.connectors.clear();

        log::debug!("split line {target} at {point} into {}", second.id);
        Some(LineSplit {
            line: target,
            added: scene.insert_shape(second),
            old_end,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use vd_core::{Figure, FillRule, Segment, SegmentFlags};

    fn line_shape(scene: &mut Scene, name: &str, a: (f64, f64), b: (f64, f64)) -> ShapeId {
        let start = scene.points.create(a.0, a.1);
        let end = scene.points.create(b.0, b.1);
        scene.insert_shape(ShapeNode::new(
            ShapeId::intern(name),
            ShapeKind::Line { start, end },
        ))
    }

    #[test]
    fn connection_point_within_threshold() {
        let mut scene = Scene::new();
        let id = line_shape(&mut scene, "hit_line_a", (0.0, 0.0), (100.0, 0.0));
        let tester = SceneHitTester::new(5.0);

        let hit = tester.try_get_connection_point(&scene, &[id], 98.0, 2.0);
        let ShapeKind::Line { end, .. } = scene.shape(id).unwrap().kind else {
            panic!("expected line");
        };
        assert_eq!(hit, Some(end));

        assert!(tester.try_get_connection_point(&scene, &[id], 50.0, 0.0).is_none());
    }

    #[test]
    fn connection_point_ignores_non_candidates() {
        let mut scene = Scene::new();
        let _ = line_shape(&mut scene, "hit_line_hidden", (0.0, 0.0), (10.0, 0.0));
        let tester = SceneHitTester::new(5.0);
        assert!(tester.try_get_connection_point(&scene, &[], 0.0, 0.0).is_none());
    }

    #[test]
    fn connector_points_are_connectable() {
        let mut scene = Scene::new();
        let id = line_shape(&mut scene, "hit_line_connector", (0.0, 0.0), (100.0, 0.0));
        let connector = scene.add_connector(id, 50.0, 0.0).unwrap();
        let tester = SceneHitTester::new(5.0);

        assert_eq!(
            tester.try_get_connection_point(&scene, &[id], 51.0, 1.0),
            Some(connector)
        );
    }

    #[test]
    fn hover_prefers_topmost() {
        let mut scene = Scene::new();
        let below = line_shape(&mut scene, "hover_below", (0.0, 0.0), (100.0, 0.0));
        let above = line_shape(&mut scene, "hover_above", (0.0, 1.0), (100.0, 1.0));
        let tester = SceneHitTester::new(3.0);

        assert_eq!(
            tester.try_hover_shape(&scene, &[below, above], 50.0, 0.5),
            Some(above)
        );
        assert_eq!(tester.try_hover_shape(&scene, &[below, above], 50.0, 50.0), None);
    }

    #[test]
    fn hover_inside_filled_path() {
        let mut scene = Scene::new();
        let a = scene.points.create(0.0, 0.0);
        let b = scene.points.create(100.0, 0.0);
        let c = scene.points.create(100.0, 100.0);
        let mut node = ShapeNode::path(ShapeId::intern("hover_triangle"), FillRule::NonZero);
        node.is_filled = true;
        let mut figure = Figure::new(a, true);
        figure.segments.push(Segment::line(b, SegmentFlags::default()));
        figure.segments.push(Segment::line(c, SegmentFlags::default()));
        node.geometry_mut().unwrap().figures.push(figure);
        let id = scene.insert_shape(node);

        let tester = SceneHitTester::new(1.0);
        assert_eq!(tester.try_hover_shape(&scene, &[id], 80.0, 20.0), Some(id));
        assert_eq!(tester.try_hover_shape(&scene, &[id], 20.0, 80.0), None);
    }

    #[test]
    fn split_line_at_point() {
        let mut scene = Scene::new();
        let id = line_shape(&mut scene, "split_me", (0.0, 0.0), (100.0, 0.0));
        let ShapeKind::Line {
            start: old_start,
            end: old_end,
        } = scene.shape(id).unwrap().kind
        else {
            panic!("expected line");
        };
        let split = scene.points.create(40.0, 0.0);
        let tester = SceneHitTester::new(5.0);

        let result = tester
            .try_split_line(&mut scene, &[id], 40.0, 0.0, split)
            .expect("line should split");
        assert_eq!(result.line, id);
        assert_eq!(result.old_end, old_end);
        let second = result.added;

        assert_eq!(
            scene.shape(id).unwrap().kind,
            ShapeKind::Line {
                start: old_start,
                end: split
            }
        );
        assert_eq!(
            scene.shape(second).unwrap().kind,
            ShapeKind::Line {
                start: split,
                end: old_end
            }
        );
    }

    #[test]
    fn split_skips_line_endpoints() {
        let mut scene = Scene::new();
        let id = line_shape(&mut scene, "split_endpoint", (0.0, 0.0), (100.0, 0.0));
        let p = scene.points.create(0.0, 0.0);
        let tester = SceneHitTester::new(5.0);
        assert!(tester.try_split_line(&mut scene, &[id], 0.0, 0.0, p).is_none());
    }
}
