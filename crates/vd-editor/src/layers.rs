//! Layer sink: where tools put the shapes they create.
//!
//! Tools only append and remove their own shapes. The three layers are
//! drawn bottom to top: permanent, working, helper.

use vd_core::ShapeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    /// Committed document shapes.
    Permanent,
    /// The path being drawn.
    Working,
    /// Preview handles and guide lines.
    Helper,
}

impl LayerKind {
    pub const ALL: [LayerKind; 3] = [LayerKind::Permanent, LayerKind::Working, LayerKind::Helper];

    fn index(self) -> usize {
        match self {
            LayerKind::Permanent => 0,
            LayerKind::Working => 1,
            LayerKind::Helper => 2,
        }
    }
}

pub trait LayerSink {
    fn add_shape(&mut self, layer: LayerKind, shape: ShapeId);

    /// Remove a shape. Returns false if it was not on the layer.
    fn remove_shape(&mut self, layer: LayerKind, shape: ShapeId) -> bool;

    /// Request a redraw of a layer.
    fn invalidate(&mut self, layer: LayerKind);

    /// Shapes on a layer, bottom first.
    fn shapes(&self, layer: LayerKind) -> &[ShapeId];
}

/// In-memory layers that count redraw requests.
#[derive(Debug, Clone, Default)]
pub struct Layers {
    shapes: [Vec<ShapeId>; 3],
    invalidations: [u64; 3],
}

impl Layers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, layer: LayerKind, shape: ShapeId) -> bool {
        self.shapes[layer.index()].contains(&shape)
    }

    pub fn len(&self, layer: LayerKind) -> usize {
        self.shapes[layer.index()].len()
    }

    pub fn is_empty(&self, layer: LayerKind) -> bool {
        self.shapes[layer.index()].is_empty()
    }

    /// Number of redraws requested for a layer so far.
    pub fn invalidations(&self, layer: LayerKind) -> u64 {
        self.invalidations[layer.index()]
    }
}

impl LayerSink for Layers {
    fn add_shape(&mut self, layer: LayerKind, shape: ShapeId) {
        self.shapes[layer.index()].push(shape);
    }

    fn remove_shape(&mut self, layer: LayerKind, shape: ShapeId) -> bool {
        let list = &mut self.shapes[layer.index()];
        match list.iter().position(|s| *s == shape) {
            Some(pos) => {
                list.remove(pos);
                true
            }
            None => false,
        }
    }

    fn invalidate(&mut self, layer: LayerKind) {
        self.invalidations[layer.index()] += 1;
    }

    fn shapes(&self, layer: LayerKind) -> &[ShapeId] {
        &self.shapes[layer.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_remove_keeps_order() {
        let mut layers = Layers::new();
        let a = ShapeId::intern("layer_a");
        let b = ShapeId::intern("layer_b");
        let c = ShapeId::intern("layer_c");
        layers.add_shape(LayerKind::Permanent, a);
        layers.add_shape(LayerKind::Permanent, b);
        layers.add_shape(LayerKind::Permanent, c);

        assert!(layers.remove_shape(LayerKind::Permanent, b));
        assert_eq!(layers.shapes(LayerKind::Permanent), &[a, c]);
        assert!(!layers.remove_shape(LayerKind::Permanent, b));
        assert!(!layers.remove_shape(LayerKind::Helper, a));
    }

    #[test]
    fn invalidation_is_per_layer() {
        let mut layers = Layers::new();
        layers.invalidate(LayerKind::Working);
        layers.invalidate(LayerKind::Working);
        assert_eq!(layers.invalidations(LayerKind::Working), 2);
        assert_eq!(layers.invalidations(LayerKind::Helper), 0);
    }
}
