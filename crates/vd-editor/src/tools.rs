//! Tool system for canvas interactions.
//!
//! The path tool owns the scene while drawing and routes each input event to
//! the active segment builder. Builders can be switched mid-path: the old
//! builder's in-progress segment is dropped and the new builder continues
//! from the path's last point.
//!
//! ## Input
//!
//! | Event | Effect |
//! |-------|--------|
//! | **Primary down** | Fix the current point, advance the active builder |
//! | **Move** | Drag the current point, update hover |
//! | **Secondary down** | Drop the in-progress segment, commit or discard |
//! | **Keys** | See [`ShortcutMap`] |

use crate::builders::{
    ArcBuilder, BuildContext, CubicBuilder, LineBuilder, QuadraticBuilder, SegmentBuilder,
};
use crate::commands::{Command, CommandStack, Edit};
use crate::config::EditorSettings;
use crate::context::PathContext;
use crate::error::EditorError;
use crate::input::{InputEvent, PointerButton};
use crate::layers::{LayerKind, LayerSink, Layers};
use crate::overlay::Overlay;
use crate::resolver::PointResolver;
use crate::shortcuts::{ShortcutAction, ShortcutMap};
use crate::style::{DefaultStyleProvider, StyleProvider};
use vd_core::{Scene, SegmentKind, ShapeId, Style};
use vd_hit::{HitTester, SceneHitTester};

/// Trait for tools that handle input.
pub trait Tool {
    fn name(&self) -> &'static str;

    /// Handle an input event, returning what changed for the host.
    fn handle(&mut self, event: &InputEvent) -> Result<Vec<ToolEvent>, EditorError>;
}

/// Notifications a tool hands back to its host.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolEvent {
    /// A path was moved to the permanent layer.
    Committed(ShapeId),
    /// The working path had no segments and was dropped.
    Discarded,
    BuilderChanged(SegmentKind),
    Undone(String),
    Redone(String),
    GridSnapChanged(bool),
}

// ─── Builders ────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct Builders {
    line: LineBuilder,
    arc: ArcBuilder,
    quadratic: QuadraticBuilder,
    cubic: CubicBuilder,
}

impl Builders {
    fn get(&self, kind: SegmentKind) -> &dyn SegmentBuilder {
        match kind {
            SegmentKind::Line => &self.line,
            SegmentKind::Arc => &self.arc,
            SegmentKind::QuadraticBezier => &self.quadratic,
            SegmentKind::CubicBezier => &self.cubic,
        }
    }

    fn get_mut(&mut self, kind: SegmentKind) -> &mut dyn SegmentBuilder {
        match kind {
            SegmentKind::Line => &mut self.line,
            SegmentKind::Arc => &mut self.arc,
            SegmentKind::QuadraticBezier => &mut self.quadratic,
            SegmentKind::CubicBezier => &mut self.cubic,
        }
    }
}

// ─── Path Tool ───────────────────────────────────────────────────────────

pub struct PathTool<H = SceneHitTester, L = Layers> {
    scene: Scene,
    layers: L,
    hit: H,
    style: Box<dyn StyleProvider>,
    settings: EditorSettings,
    resolver: PointResolver,
    path: PathContext,
    overlay: Overlay,
    builders: Builders,
    active: SegmentKind,
    /// Builder active before the last switch (Tab toggles back to it).
    previous: Option<SegmentKind>,
    /// `None` when `history_depth` is 0.
    history: Option<CommandStack>,
    hovered: Option<ShapeId>,
}

impl PathTool {
    /// A tool over an empty scene with in-memory layers, the scene hit
    /// tester and the default style (using `settings.defaults`).
    pub fn new(settings: EditorSettings) -> Self {
        let hit = SceneHitTester::new(settings.hit_threshold);
        let style = DefaultStyleProvider {
            defaults: settings.defaults,
            ..DefaultStyleProvider::default()
        };
        Self::with_parts(Scene::new(), hit, Layers::new(), Box::new(style), settings)
    }
}

impl Default for PathTool {
    fn default() -> Self {
        Self::new(EditorSettings::default())
    }
}

impl<H: HitTester, L: LayerSink> PathTool<H, L> {
    pub fn with_parts(
        scene: Scene,
        hit: H,
        layers: L,
        style: Box<dyn StyleProvider>,
        settings: EditorSettings,
    ) -> Self {
        let history = (settings.history_depth > 0).then(|| CommandStack::new(settings.history_depth));
        Self {
            resolver: PointResolver::from_settings(&settings),
            scene,
            layers,
            hit,
            style,
            settings,
            path: PathContext::new(),
            overlay: Overlay::new(),
            builders: Builders::default(),
            active: SegmentKind::Line,
            previous: None,
            history,
            hovered: None,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn layers(&self) -> &L {
        &self.layers
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    /// Effective style of a shape: its shared style overlaid with its
    /// inline overrides.
    pub fn shape_style(&self, id: ShapeId) -> Option<Style> {
        self.scene.shape(id).map(|node| self.scene.resolve_style(node))
    }

    /// The path being drawn, if any.
    pub fn working_path(&self) -> Option<ShapeId> {
        self.path.shape_id()
    }

    pub fn active_builder(&self) -> SegmentKind {
        self.active
    }

    pub fn previous_builder(&self) -> Option<SegmentKind> {
        self.previous
    }

    pub fn builder_state(&self) -> &'static str {
        self.builders.get(self.active).state_name()
    }

    /// True while there is a working path to commit or discard.
    pub fn can_cancel(&self) -> bool {
        self.path.is_initialized()
    }

    /// The permanent shape under the pointer at the last move.
    pub fn hovered(&self) -> Option<ShapeId> {
        self.hovered
    }

    pub fn can_undo(&self) -> bool {
        self.history.as_ref().is_some_and(CommandStack::can_undo)
    }

    pub fn can_redo(&self) -> bool {
        self.history.as_ref().is_some_and(CommandStack::can_redo)
    }

    pub fn set_snap_to_grid(&mut self, enabled: bool) {
        self.settings.snap_to_grid = enabled;
        self.resolver = PointResolver::from_settings(&self.settings);
    }

    /// Lend the builder of `kind` and a context over the tool's state.
    fn with_builder<R>(
        &mut self,
        kind: SegmentKind,
        f: impl FnOnce(&mut dyn SegmentBuilder, &mut BuildContext<'_>) -> R,
    ) -> R {
        let mut cx = BuildContext {
            scene: &mut self.scene,
            path: &mut self.path,
            overlay: &mut self.overlay,
            layers: &mut self.layers,
            hit: &self.hit,
            style: self.style.as_ref(),
            resolver: &self.resolver,
            settings: &self.settings,
        };
        f(self.builders.get_mut(kind), &mut cx)
    }

    pub fn primary_down(&mut self, x: f64, y: f64) -> Result<(), EditorError> {
        let kind = self.active;
        self.with_builder(kind, |builder, cx| builder.on_primary(cx, x, y))?;
        log::debug!("{kind:?} builder now in {}", self.builder_state());
        Ok(())
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.update_hover(x, y);
        let kind = self.active;
        self.with_builder(kind, |builder, cx| builder.on_move(cx, x, y));
    }

    fn update_hover(&mut self, x: f64, y: f64) {
        let hovered = self.hit.try_hover_shape(
            &self.scene,
            self.layers.shapes(LayerKind::Permanent),
            x,
            y,
        );
        if hovered != self.hovered {
            log::trace!("hover {:?} -> {:?}", self.hovered, hovered);
            self.hovered = hovered;
            self.layers.invalidate(LayerKind::Permanent);
        }
    }

    /// Drop the in-progress segment, then commit the working path, or
    /// discard it when no segment is left. `None` when nothing was open.
    pub fn finish(&mut self) -> Option<ToolEvent> {
        let id = self.path.shape_id()?;
        let kind = self.active;
        self.with_builder(kind, |builder, cx| builder.on_cancel(cx));
        self.overlay.clear(&mut self.scene, &mut self.layers);

        self.layers.remove_shape(LayerKind::Working, id);
        self.layers.invalidate(LayerKind::Working);
        if let Some(geometry) = self.scene.geometry_mut(id) {
            geometry.figures.retain(|figure| !figure.segments.is_empty());
        }
        let segments = self.path.segment_count(&self.scene);
        let splits = self.path.take_splits();
        self.path.deinitialize();

        if segments == 0 {
            self.scene.remove_shape(id);
            log::debug!("discarded empty path {id}");
            return Some(ToolEvent::Discarded);
        }

        self.layers.add_shape(LayerKind::Permanent, id);
        self.layers.invalidate(LayerKind::Permanent);
        if let Some(history) = &mut self.history {
            let add = Edit::AddShape {
                layer: LayerKind::Permanent,
                id,
            };
            let edit = if splits.is_empty() {
                add
            } else {
                Edit::Batch(std::iter::once(add).chain(splits).collect())
            };
            history.record(Command::new(edit, "draw path"));
        }
        log::debug!("committed {id} with {segments} segments");
        Some(ToolEvent::Committed(id))
    }

    /// Make `kind` the active builder. Returns false if it already was.
    pub fn set_builder(&mut self, kind: SegmentKind) -> bool {
        if kind == self.active {
            return false;
        }
        let old = self.active;
        self.with_builder(old, |builder, cx| builder.on_cancel(cx));
        self.previous = Some(old);
        self.active = kind;
        log::debug!("switched builder {old:?} -> {kind:?}");
        true
    }

    /// Switch back to the previous builder.
    pub fn toggle_builder(&mut self) -> bool {
        match self.previous {
            Some(previous) => self.set_builder(previous),
            None => false,
        }
    }

    /// Translate every point of a committed shape, connectors included.
    /// Paths sharing those points move with it.
    pub fn move_shape(&mut self, id: ShapeId, dx: f64, dy: f64) -> Result<(), EditorError> {
        let node = self.scene.shape(id).ok_or(EditorError::UnknownShape(id))?;
        let mut points = node.points();
        points.extend(node.connectors.iter().copied());
        let edit = Edit::MovePoints { points, dx, dy };
        match &mut self.history {
            Some(history) => history.execute(&mut self.scene, &mut self.layers, edit, "move shape"),
            None => edit.apply(&mut self.scene, &mut self.layers),
        }
        Ok(())
    }

    /// Undo the last committed change. Ignored while a path is being drawn.
    pub fn undo(&mut self) -> Option<String> {
        if self.path.is_initialized() {
            log::debug!("undo ignored while drawing");
            return None;
        }
        let desc = self.history.as_mut()?.undo(&mut self.scene, &mut self.layers)?;
        self.hovered = None;
        Some(desc)
    }

    /// Redo the last undone change. Ignored while a path is being drawn.
    pub fn redo(&mut self) -> Option<String> {
        if self.path.is_initialized() {
            log::debug!("redo ignored while drawing");
            return None;
        }
        let desc = self.history.as_mut()?.redo(&mut self.scene, &mut self.layers)?;
        self.hovered = None;
        Some(desc)
    }

    fn switch_to(&mut self, kind: SegmentKind) -> Vec<ToolEvent> {
        if self.set_builder(kind) {
            vec![ToolEvent::BuilderChanged(kind)]
        } else {
            Vec::new()
        }
    }

    fn apply_shortcut(&mut self, action: ShortcutAction) -> Vec<ToolEvent> {
        match action {
            ShortcutAction::BuilderLine => self.switch_to(SegmentKind::Line),
            ShortcutAction::BuilderArc => self.switch_to(SegmentKind::Arc),
            ShortcutAction::BuilderQuadratic => self.switch_to(SegmentKind::QuadraticBezier),
            ShortcutAction::BuilderCubic => self.switch_to(SegmentKind::CubicBezier),
            ShortcutAction::ToggleLastBuilder => match self.previous {
                Some(previous) => self.switch_to(previous),
                None => Vec::new(),
            },
            ShortcutAction::Finish => self.finish().into_iter().collect(),
            ShortcutAction::Undo => self.undo().map(ToolEvent::Undone).into_iter().collect(),
            ShortcutAction::Redo => self.redo().map(ToolEvent::Redone).into_iter().collect(),
            ShortcutAction::ToggleGridSnap => {
                let enabled = !self.settings.snap_to_grid;
                self.set_snap_to_grid(enabled);
                vec![ToolEvent::GridSnapChanged(enabled)]
            }
        }
    }
}

impl<H: HitTester, L: LayerSink> Tool for PathTool<H, L> {
    fn name(&self) -> &'static str {
        "path"
    }

    fn handle(&mut self, event: &InputEvent) -> Result<Vec<ToolEvent>, EditorError> {
        match event {
            InputEvent::PointerDown {
                x,
                y,
                button: PointerButton::Primary,
                ..
            } => {
                self.primary_down(*x, *y)?;
                Ok(Vec::new())
            }
            InputEvent::PointerDown {
                button: PointerButton::Secondary,
                ..
            } => Ok(self.finish().into_iter().collect()),
            InputEvent::PointerMove { x, y, .. } => {
                self.pointer_move(*x, *y);
                Ok(Vec::new())
            }
            InputEvent::PointerUp { .. } => Ok(Vec::new()),
            InputEvent::Key { key, modifiers } => {
                let action = ShortcutMap::resolve(
                    key,
                    modifiers.ctrl,
                    modifiers.shift,
                    modifiers.alt,
                    modifiers.meta,
                );
                Ok(action
                    .map(|action| self.apply_shortcut(action))
                    .unwrap_or_default())
            }
        }
    }
}
