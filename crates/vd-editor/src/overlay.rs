//! Preview overlay: handles and guide lines for the segment in progress.
//!
//! Helper shapes reference the working path's own points, so they follow
//! the cursor without being rebuilt. They are rebuilt only on state
//! transitions and torn down on cancel or finish.

use crate::layers::{LayerKind, LayerSink};
use smallvec::SmallVec;
use vd_core::{PointId, Scene, ShapeId, ShapeKind, ShapeNode};

/// A helper shape to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Helper {
    /// A handle drawn at a point.
    Point(PointId),
    /// A guide line between two points.
    Line(PointId, PointId),
}

#[derive(Debug, Default)]
pub struct Overlay {
    shapes: SmallVec<[ShapeId; 6]>,
    /// Every id this overlay has minted. Reused across rebuilds so the
    /// interner does not grow per click.
    pool: SmallVec<[ShapeId; 6]>,
}

impl Overlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current helpers with `helpers`.
    pub fn rebuild(&mut self, scene: &mut Scene, layers: &mut dyn LayerSink, helpers: &[Helper]) {
        self.clear(scene, layers);
        for (i, helper) in helpers.iter().enumerate() {
            let kind = match *helper {
                Helper::Point(point) => ShapeKind::Point { point },
                Helper::Line(start, end) => ShapeKind::Line { start, end },
            };
            let id = match self.pool.get(i) {
                Some(&id) => id,
                None => {
                    let id = ShapeId::with_prefix("helper");
                    self.pool.push(id);
                    id
                }
            };
            let id = scene.insert_shape(ShapeNode::new(id, kind));
            layers.add_shape(LayerKind::Helper, id);
            self.shapes.push(id);
        }
        layers.invalidate(LayerKind::Helper);
    }

    /// Remove every helper from the helper layer and the scene.
    pub fn clear(&mut self, scene: &mut Scene, layers: &mut dyn LayerSink) {
        if self.shapes.is_empty() {
            return;
        }
        for id in self.shapes.drain(..) {
            layers.remove_shape(LayerKind::Helper, id);
            scene.remove_shape(id);
        }
        layers.invalidate(LayerKind::Helper);
    }

    pub fn shapes(&self) -> &[ShapeId] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}
