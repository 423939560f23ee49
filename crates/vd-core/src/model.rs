//! Shapes and the scene that owns them.
//!
//! The scene owns every point (in its [`PointStore`]), every shape, and the
//! named styles shapes may reference. Which shapes are visible, and on which
//! layer, is decided by the editor; the scene itself is unordered.

use crate::geometry::{FillRule, Geometry};
use crate::id::{PointId, ShapeId, StyleId};
use crate::point::{Point, PointStore};
use crate::style::Style;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::HashMap;

/// The kinds of shape a scene can hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ShapeKind {
    /// A path made of figures.
    Path(Geometry),
    /// A straight line between two points.
    Line { start: PointId, end: PointId },
    /// A single point (used for helper handles).
    Point { point: PointId },
}

/// A single shape in the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeNode {
    pub id: ShapeId,
    pub kind: ShapeKind,
    /// Inline style overrides on this shape.
    pub style: Style,
    /// Shared style reference.
    pub use_style: Option<StyleId>,
    /// Points other shapes may connect to.
    pub connectors: SmallVec<[PointId; 4]>,
    pub is_stroked: bool,
    pub is_filled: bool,
}

impl ShapeNode {
    pub fn new(id: ShapeId, kind: ShapeKind) -> Self {
        Self {
            id,
            kind,
            style: Style::default(),
            use_style: None,
            connectors: SmallVec::new(),
            is_stroked: true,
            is_filled: false,
        }
    }

    pub fn path(id: ShapeId, fill_rule: FillRule) -> Self {
        Self::new(id, ShapeKind::Path(Geometry::new(fill_rule)))
    }

    pub fn geometry(&self) -> Option<&Geometry> {
        match &self.kind {
            ShapeKind::Path(geometry) => Some(geometry),
            _ => None,
        }
    }

    pub fn geometry_mut(&mut self) -> Option<&mut Geometry> {
        match &mut self.kind {
            ShapeKind::Path(geometry) => Some(geometry),
            _ => None,
        }
    }

    /// Every point the shape's outline is built from (connectors excluded).
    pub fn points(&self) -> Vec<PointId> {
        match &self.kind {
            ShapeKind::Path(geometry) => geometry.points().collect(),
            ShapeKind::Line { start, end } => vec![*start, *end],
            ShapeKind::Point { point } => vec![*point],
        }
    }
}

/// Points, shapes, and named styles.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scene {
    pub points: PointStore,
    shapes: HashMap<ShapeId, ShapeNode>,
    /// Named styles (`use_style` targets).
    pub styles: HashMap<StyleId, Style>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_shape(&mut self, node: ShapeNode) -> ShapeId {
        let id = node.id;
        self.shapes.insert(id, node);
        id
    }

    pub fn remove_shape(&mut self, id: ShapeId) -> Option<ShapeNode> {
        self.shapes.remove(&id)
    }

    pub fn shape(&self, id: ShapeId) -> Option<&ShapeNode> {
        self.shapes.get(&id)
    }

    pub fn shape_mut(&mut self, id: ShapeId) -> Option<&mut ShapeNode> {
        self.shapes.get_mut(&id)
    }

    pub fn contains(&self, id: ShapeId) -> bool {
        self.shapes.contains_key(&id)
    }

    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    pub fn geometry(&self, id: ShapeId) -> Option<&Geometry> {
        self.shape(id).and_then(ShapeNode::geometry)
    }

    pub fn geometry_mut(&mut self, id: ShapeId) -> Option<&mut Geometry> {
        self.shape_mut(id).and_then(ShapeNode::geometry_mut)
    }

    pub fn point(&self, id: PointId) -> Option<&Point> {
        self.points.get(id)
    }

    /// Add a connector point at `(x, y)` to `owner`.
    pub fn add_connector(&mut self, owner: ShapeId, x: f64, y: f64) -> Option<PointId> {
        if !self.contains(owner) {
            return None;
        }
        let point = self.points.insert(Point::connector(x, y, owner));
        if let Some(node) = self.shape_mut(owner) {
            node.connectors.push(point);
        }
        Some(point)
    }

    /// Move a set of points by the same delta. Each distinct point moves once.
    pub fn translate_points(&mut self, points: &[PointId], dx: f64, dy: f64) {
        let mut seen: SmallVec<[PointId; 8]> = SmallVec::new();
        for &p in points {
            if !seen.contains(&p) {
                seen.push(p);
                self.points.translate(p, dx, dy);
            }
        }
    }

    /// Resolve a shape's effective style: shared style first, then inline overrides.
    pub fn resolve_style(&self, node: &ShapeNode) -> Style {
        let mut resolved = Style::default();
        if let Some(base) = node.use_style.and_then(|id| self.styles.get(&id)) {
            resolved.merge(base);
        }
        resolved.merge(&node.style);
        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Figure, Segment, SegmentFlags};
    use crate::style::{Color, Stroke};

    #[test]
    fn connectors_are_owned_by_their_shape() {
        let mut scene = Scene::new();
        let a = scene.points.create(0.0, 0.0);
        let b = scene.points.create(10.0, 0.0);
        let id = scene.insert_shape(ShapeNode::new(
            ShapeId::intern("wire"),
            ShapeKind::Line { start: a, end: b },
        ));

        let c = scene.add_connector(id, 5.0, 0.0).unwrap();
        assert_eq!(scene.point(c).unwrap().owner, Some(id));
        assert_eq!(scene.shape(id).unwrap().connectors.as_slice(), &[c]);

        assert!(
            scene
                .add_connector(ShapeId::intern("missing_shape"), 0.0, 0.0)
                .is_none()
        );
    }

    #[test]
    fn translate_moves_shared_points_once() {
        let mut scene = Scene::new();
        let p = scene.points.create(1.0, 1.0);
        scene.translate_points(&[p, p], 2.0, 3.0);
        assert_eq!(scene.points.position(p), (3.0, 4.0));
    }

    #[test]
    fn resolve_style_prefers_inline() {
        let mut scene = Scene::new();
        let shared = StyleId::intern("shared_outline");
        scene.styles.insert(
            shared,
            Style {
                stroke: Some(Stroke::default()),
                fill: Some(Color::BLACK),
                opacity: None,
            },
        );

        let mut node = ShapeNode::path(ShapeId::with_prefix("path"), FillRule::EvenOdd);
        node.use_style = Some(shared);
        node.style.fill = Some(Color::rgba(1.0, 0.0, 0.0, 1.0));

        let style = scene.resolve_style(&node);
        assert_eq!(style.stroke, Some(Stroke::default()));
        assert_eq!(style.fill, Some(Color::rgba(1.0, 0.0, 0.0, 1.0)));
    }

    #[test]
    fn path_points_include_start() {
        let mut scene = Scene::new();
        let start = scene.points.create(0.0, 0.0);
        let end = scene.points.create(1.0, 0.0);
        let mut node = ShapeNode::path(ShapeId::with_prefix("path"), FillRule::NonZero);
        let mut figure = Figure::new(start, false);
        figure
            .segments
            .push(Segment::line(end, SegmentFlags::default()));
        node.geometry_mut().unwrap().figures.push(figure);

        assert_eq!(node.points(), vec![start, end]);
    }
}
