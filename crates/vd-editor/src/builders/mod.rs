//! Segment builders.
//!
//! Each builder is a small state machine that turns primary clicks and
//! pointer moves into one kind of segment. Builders never own the path:
//! everything they touch is lent to them through a [`BuildContext`].
//!
//! Every builder keeps exactly one in-progress segment at the end of the
//! working path while it is out of its initial state. Cancelling removes
//! that segment and nothing else.

mod arc;
mod cubic;
mod line;
mod quadratic;

pub use arc::ArcBuilder;
pub use cubic::CubicBuilder;
pub use line::LineBuilder;
pub use quadratic::QuadraticBuilder;

use crate::commands::Edit;
use crate::config::EditorSettings;
use crate::context::PathContext;
use crate::error::EditorError;
use crate::layers::{LayerKind, LayerSink};
use crate::overlay::{Helper, Overlay};
use crate::resolver::PointResolver;
use crate::style::StyleProvider;
use vd_core::{PointId, Scene, Segment, SegmentFlags, SegmentKind};
use vd_hit::HitTester;

/// Everything a builder may read or mutate while handling one event.
pub struct BuildContext<'a> {
    pub scene: &'a mut Scene,
    pub path: &'a mut PathContext,
    pub overlay: &'a mut Overlay,
    pub layers: &'a mut dyn LayerSink,
    pub hit: &'a dyn HitTester,
    pub style: &'a dyn StyleProvider,
    pub resolver: &'a PointResolver,
    pub settings: &'a EditorSettings,
}

impl BuildContext<'_> {
    pub fn snap(&self, x: f64, y: f64) -> (f64, f64) {
        self.resolver.snap(x, y)
    }

    pub fn segment_flags(&self) -> SegmentFlags {
        let defaults = self.style.defaults();
        SegmentFlags {
            is_stroked: defaults.is_stroked,
            is_smooth_join: defaults.is_smooth_join,
        }
    }

    /// The start point for a new segment: the end of the working path when
    /// one is open, otherwise a resolved point that opens a new path.
    pub fn start_point(&mut self, x: f64, y: f64) -> Result<PointId, EditorError> {
        if self.path.is_initialized() {
            return self.path.last_path_point(self.scene);
        }
        let start = self.resolver.resolve(
            self.scene,
            self.hit,
            self.layers.shapes(LayerKind::Permanent),
            x,
            y,
            self.settings.try_to_connect,
        );
        self.path
            .initialize(self.scene, self.layers, self.style, self.settings, start)?;
        Ok(start)
    }

    pub fn append(&mut self, segment: Segment) -> Result<(), EditorError> {
        self.path.append_segment(self.scene, segment)
    }

    /// Move `point` to the pointer.
    pub fn track(&mut self, point: PointId, x: f64, y: f64) {
        let (sx, sy) = self.snap(x, y);
        self.scene.points.set_position(point, sx, sy);
    }

    /// Fix `point` at the pointer.
    ///
    /// With connection enabled, an existing point under the pointer is
    /// returned in its place and the caller rebinds the segment to it.
    pub fn fix_point(&mut self, point: PointId, x: f64, y: f64) -> PointId {
        self.track(point, x, y);
        if !self.settings.try_to_connect {
            return point;
        }
        let candidates = self.layers.shapes(LayerKind::Permanent);
        match self.resolver.connect(self.scene, self.hit, candidates, x, y) {
            Some(existing) => {
                log::debug!("connected {point} to {existing}");
                existing
            }
            None => point,
        }
    }

    /// Split a permanent line lying under the end point of a finished
    /// segment. Only called for fresh (unconnected) end points.
    pub fn split_lines_at(&mut self, point: PointId) {
        if !(self.settings.try_to_connect && self.settings.split_lines) {
            return;
        }
        let (x, y) = self.scene.points.position(point);
        let candidates = self.layers.shapes(LayerKind::Permanent).to_vec();
        let Some(split) = self.hit.try_split_line(self.scene, &candidates, x, y, point) else {
            return;
        };
        log::debug!("split {} at {point}, added {}", split.line, split.added);
        let edit = Edit::SplitLine {
            line: split.line,
            at: point,
            added: split.added,
            old_end: split.old_end,
        };
        // The line itself was already cut by the hit tester; this puts the
        // new half on the permanent layer.
        edit.apply(self.scene, self.layers);
        self.path.record_split(edit);
    }

    /// Borrow the in-progress segment.
    pub fn last_segment(&mut self) -> Option<&mut Segment> {
        self.path.last_segment_mut(self.scene)
    }

    pub fn show_helpers(&mut self, helpers: &[Helper]) {
        self.overlay.rebuild(self.scene, self.layers, helpers);
    }

    pub fn clear_helpers(&mut self) {
        self.overlay.clear(self.scene, self.layers);
    }

    pub fn invalidate(&mut self) {
        self.layers.invalidate(LayerKind::Working);
        self.layers.invalidate(LayerKind::Helper);
    }
}

/// A state machine that builds one kind of segment.
pub trait SegmentBuilder {
    /// The kind of segment this builder appends.
    fn kind(&self) -> SegmentKind;

    /// True in the initial state, when no segment is in progress.
    fn is_idle(&self) -> bool;

    fn state_name(&self) -> &'static str;

    /// Fix the current point and advance.
    fn on_primary(&mut self, cx: &mut BuildContext<'_>, x: f64, y: f64) -> Result<(), EditorError>;

    /// Drag the current point with the pointer.
    fn on_move(&mut self, cx: &mut BuildContext<'_>, x: f64, y: f64);

    /// Return to the initial state, forgetting any tracked points.
    fn reset(&mut self);

    /// Drop the in-progress segment and return to the initial state.
    /// No-op when idle.
    fn on_cancel(&mut self, cx: &mut BuildContext<'_>) {
        if self.is_idle() {
            return;
        }
        let kind = self.kind();
        if cx.path.remove_last_segment(cx.scene, kind).is_none() {
            log::warn!("no in-progress {kind:?} segment to remove");
        }
        cx.clear_helpers();
        cx.invalidate();
        log::debug!("{kind:?} builder cancelled from {}", self.state_name());
        self.reset();
    }
}

/// Replace the last segment's point selected by `slot` with `point`.
/// Does nothing when the last segment is not of the expected kind.
pub(crate) fn rebind(cx: &mut BuildContext<'_>, slot: Slot, point: PointId) {
    match (cx.last_segment(), slot) {
        (Some(Segment::Line(s)), Slot::End) => s.point = point,
        (Some(Segment::Arc(s)), Slot::End) => s.point = point,
        (Some(Segment::QuadraticBezier(s)), Slot::Control1) => s.point1 = point,
        (Some(Segment::QuadraticBezier(s)), Slot::End) => s.point2 = point,
        (Some(Segment::CubicBezier(s)), Slot::Control1) => s.point1 = point,
        (Some(Segment::CubicBezier(s)), Slot::Control2) => s.point2 = point,
        (Some(Segment::CubicBezier(s)), Slot::End) => s.point3 = point,
        _ => log::warn!("cannot rebind {slot:?} of the in-progress segment"),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Slot {
    Control1,
    Control2,
    End,
}

#[cfg(test)]
pub(crate) mod harness {
    //! A self-contained scene and context for driving one builder.

    use super::*;
    use crate::layers::Layers;
    use crate::style::DefaultStyleProvider;
    use vd_hit::SceneHitTester;

    pub struct Harness {
        pub scene: Scene,
        pub path: PathContext,
        pub overlay: Overlay,
        pub layers: Layers,
        pub hit: SceneHitTester,
        pub style: DefaultStyleProvider,
        pub resolver: PointResolver,
        pub settings: EditorSettings,
    }

    impl Harness {
        pub fn new() -> Self {
            Self::with_settings(EditorSettings::default())
        }

        pub fn with_settings(settings: EditorSettings) -> Self {
            Self {
                scene: Scene::new(),
                path: PathContext::new(),
                overlay: Overlay::new(),
                layers: Layers::new(),
                hit: SceneHitTester::new(settings.hit_threshold),
                style: DefaultStyleProvider::default(),
                resolver: PointResolver::from_settings(&settings),
                settings,
            }
        }

        pub fn cx(&mut self) -> BuildContext<'_> {
            BuildContext {
                scene: &mut self.scene,
                path: &mut self.path,
                overlay: &mut self.overlay,
                layers: &mut self.layers,
                hit: &self.hit,
                style: &self.style,
                resolver: &self.resolver,
                settings: &self.settings,
            }
        }

        pub fn click(&mut self, builder: &mut dyn SegmentBuilder, x: f64, y: f64) {
            let mut cx = self.cx();
            builder.on_primary(&mut cx, x, y).unwrap();
        }

        pub fn hover(&mut self, builder: &mut dyn SegmentBuilder, x: f64, y: f64) {
            let mut cx = self.cx();
            builder.on_move(&mut cx, x, y);
        }

        pub fn cancel(&mut self, builder: &mut dyn SegmentBuilder) {
            let mut cx = self.cx();
            builder.on_cancel(&mut cx);
        }

        pub fn segments(&self) -> Vec<Segment> {
            self.path
                .geometry(&self.scene)
                .and_then(|g| g.last_figure())
                .map(|f| f.segments.clone())
                .unwrap_or_default()
        }

        pub fn start(&self) -> PointId {
            self.path
                .geometry(&self.scene)
                .and_then(|g| g.last_figure())
                .map(|f| f.start_point)
                .unwrap()
        }

        pub fn pos(&self, point: PointId) -> (f64, f64) {
            self.scene.points.position(point)
        }
    }
}
