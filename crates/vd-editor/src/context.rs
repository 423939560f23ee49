//! Working path context.
//!
//! Holds the path being drawn between the first click and the finish
//! gesture. The path itself lives in the scene; the context only remembers
//! which shape it is, the line splits made while drawing it, and guards the
//! figure/segment invariants.

use crate::commands::Edit;
use crate::config::EditorSettings;
use crate::error::EditorError;
use crate::layers::{LayerKind, LayerSink};
use crate::style::StyleProvider;
use vd_core::{Figure, Geometry, PointId, Scene, Segment, SegmentKind, ShapeId, ShapeNode};

#[derive(Debug, Default)]
pub struct PathContext {
    shape: Option<ShapeId>,
    /// `Edit::SplitLine`s already applied to the scene.
    splits: Vec<Edit>,
}

impl PathContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_initialized(&self) -> bool {
        self.shape.is_some()
    }

    /// The working path shape, if one is open.
    pub fn shape_id(&self) -> Option<ShapeId> {
        self.shape
    }

    /// Create a new path with a single empty figure starting at `start` and
    /// put it on the working layer.
    ///
    /// # Errors
    /// Returns [`EditorError::InvariantViolation`] if a path is already open.
    pub fn initialize(
        &mut self,
        scene: &mut Scene,
        layers: &mut dyn LayerSink,
        style: &dyn StyleProvider,
        settings: &EditorSettings,
        start: PointId,
    ) -> Result<ShapeId, EditorError> {
        if self.shape.is_some() {
            return Err(EditorError::invariant("working path already initialized"));
        }

        let defaults = style.defaults();
        let mut node = ShapeNode::path(ShapeId::with_prefix("path"), settings.fill_rule);
        node.is_stroked = defaults.is_stroked;
        node.is_filled = defaults.is_filled;

        let (style_id, current) = style.current_style();
        if settings.clone_style {
            node.style = current;
        } else {
            scene.styles.insert(style_id, current);
            node.use_style = Some(style_id);
        }

        if let Some(geometry) = node.geometry_mut() {
            geometry.figures.push(Figure::new(start, defaults.is_closed));
        }

        let id = scene.insert_shape(node);
        layers.add_shape(LayerKind::Working, id);
        layers.invalidate(LayerKind::Working);
        self.shape = Some(id);
        log::debug!("opened working path {id} at {start}");
        Ok(id)
    }

    /// Forget the working path and its splits. The shape stays in the scene.
    pub fn deinitialize(&mut self) -> Option<ShapeId> {
        self.splits.clear();
        self.shape.take()
    }

    pub fn record_split(&mut self, split: Edit) {
        self.splits.push(split);
    }

    /// Hand over the splits made while drawing, oldest first.
    pub fn take_splits(&mut self) -> Vec<Edit> {
        std::mem::take(&mut self.splits)
    }

    /// Start another figure in the open path.
    pub fn begin_figure(
        &self,
        scene: &mut Scene,
        start: PointId,
        is_closed: bool,
    ) -> Result<(), EditorError> {
        self.geometry_mut(scene)?
            .figures
            .push(Figure::new(start, is_closed));
        Ok(())
    }

    pub fn geometry<'s>(&self, scene: &'s Scene) -> Option<&'s Geometry> {
        scene.geometry(self.shape?)
    }

    fn geometry_mut<'s>(&self, scene: &'s mut Scene) -> Result<&'s mut Geometry, EditorError> {
        let id = self
            .shape
            .ok_or_else(|| EditorError::invariant("no working path"))?;
        scene.geometry_mut(id).ok_or(EditorError::UnknownShape(id))
    }

    /// Append a segment to the last figure.
    pub fn append_segment(&self, scene: &mut Scene, segment: Segment) -> Result<(), EditorError> {
        let figure = self
            .geometry_mut(scene)?
            .last_figure_mut()
            .ok_or_else(|| EditorError::invariant("working path has no figure"))?;
        figure.segments.push(segment);
        Ok(())
    }

    /// Remove the last segment of the last figure if it is of `kind`.
    /// Anything else is a no-op.
    pub fn remove_last_segment(&self, scene: &mut Scene, kind: SegmentKind) -> Option<Segment> {
        let figure = self.geometry_mut(scene).ok()?.last_figure_mut()?;
        let removed = figure.remove_last_of(kind);
        if let Some(segment) = &removed {
            log::trace!("removed {:?} ending at {}", segment.kind(), segment.end_point());
        }
        removed
    }

    /// The point the next segment starts from: the end of the last segment,
    /// or the figure start when it has none.
    ///
    /// # Errors
    /// Returns [`EditorError::InvariantViolation`] if no path or figure is open.
    pub fn last_path_point(&self, scene: &Scene) -> Result<PointId, EditorError> {
        self.geometry(scene)
            .and_then(Geometry::last_figure)
            .map(Figure::last_point)
            .ok_or_else(|| EditorError::invariant("no open figure"))
    }

    pub fn last_segment_mut<'s>(&self, scene: &'s mut Scene) -> Option<&'s mut Segment> {
        self.geometry_mut(scene)
            .ok()?
            .last_figure_mut()?
            .segments
            .last_mut()
    }

    /// Segments across every figure of the working path.
    pub fn segment_count(&self, scene: &Scene) -> usize {
        self.geometry(scene).map_or(0, Geometry::segment_count)
    }
}
