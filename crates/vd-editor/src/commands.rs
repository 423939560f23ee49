//! Undo/Redo command stack.
//!
//! Every committed change is wrapped in a reversible `Command`. Commands are
//! pushed to a stack; undo pops and applies the inverse.
//!
//! Shapes are never dropped from the scene by undo: removing a committed
//! path only takes it off its layer, so redo can put it back unchanged.

use crate::layers::{LayerKind, LayerSink};
use vd_core::{PointId, Scene, ShapeId, ShapeKind};

/// A single reversible change.
#[derive(Debug, Clone, PartialEq)]
pub enum Edit {
    AddShape { layer: LayerKind, id: ShapeId },
    RemoveShape { layer: LayerKind, id: ShapeId },
    MovePoints {
        points: Vec<PointId>,
        dx: f64,
        dy: f64,
    },
    /// `line` ends at `at`; `added` runs from `at` to `old_end` on the
    /// permanent layer.
    SplitLine {
        line: ShapeId,
        at: PointId,
        added: ShapeId,
        old_end: PointId,
    },
    /// Undo of `SplitLine`: `line` ends at `old_end` again and `added` is
    /// taken off the permanent layer.
    JoinLine {
        line: ShapeId,
        at: PointId,
        added: ShapeId,
        old_end: PointId,
    },
    /// Edits applied in order, undone in reverse.
    Batch(Vec<Edit>),
}

fn set_line_end(scene: &mut Scene, line: ShapeId, point: PointId) {
    match scene.shape_mut(line).map(|node| &mut node.kind) {
        Some(ShapeKind::Line { end, .. }) => *end = point,
        _ => log::warn!("{line} is not a line"),
    }
}

impl Edit {
    pub fn apply(&self, scene: &mut Scene, layers: &mut dyn LayerSink) {
        match self {
            Edit::AddShape { layer, id } => {
                layers.add_shape(*layer, *id);
                layers.invalidate(*layer);
            }
            Edit::RemoveShape { layer, id } => {
                if layers.remove_shape(*layer, *id) {
                    layers.invalidate(*layer);
                }
            }
            Edit::MovePoints { points, dx, dy } => {
                scene.translate_points(points, *dx, *dy);
                for layer in LayerKind::ALL {
                    layers.invalidate(layer);
                }
            }
            Edit::SplitLine { line, at, added, .. } => {
                set_line_end(scene, *line, *at);
                layers.add_shape(LayerKind::Permanent, *added);
                layers.invalidate(LayerKind::Permanent);
            }
            Edit::JoinLine {
                line,
                added,
                old_end,
                ..
            } => {
                set_line_end(scene, *line, *old_end);
                layers.remove_shape(LayerKind::Permanent, *added);
                layers.invalidate(LayerKind::Permanent);
            }
            Edit::Batch(edits) => {
                for edit in edits {
                    edit.apply(scene, layers);
                }
            }
        }
    }

    /// The edit that undoes this one.
    fn inverse(&self) -> Edit {
        match self {
            Edit::AddShape { layer, id } => Edit::RemoveShape {
                layer: *layer,
                id: *id,
            },
            Edit::RemoveShape { layer, id } => Edit::AddShape {
                layer: *layer,
                id: *id,
            },
            Edit::MovePoints { points, dx, dy } => Edit::MovePoints {
                points: points.clone(),
                dx: -dx,
                dy: -dy,
            },
            &Edit::SplitLine {
                line,
                at,
                added,
                old_end,
            } => Edit::JoinLine {
                line,
                at,
                added,
                old_end,
            },
            &Edit::JoinLine {
                line,
                at,
                added,
                old_end,
            } => Edit::SplitLine {
                line,
                at,
                added,
                old_end,
            },
            Edit::Batch(edits) => Edit::Batch(edits.iter().rev().map(Edit::inverse).collect()),
        }
    }
}

/// An edit with its inverse and a human-readable label.
#[derive(Debug, Clone)]
pub struct Command {
    forward: Edit,
    inverse: Edit,
    description: String,
}

impl Command {
    pub fn new(forward: Edit, description: &str) -> Self {
        Self {
            inverse: forward.inverse(),
            forward,
            description: description.to_string(),
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Manages undo/redo stacks.
pub struct CommandStack {
    undo_stack: Vec<Command>,
    redo_stack: Vec<Command>,
    /// Maximum undo depth.
    max_depth: usize,
}

impl CommandStack {
    pub fn new(max_depth: usize) -> Self {
        Self {
            undo_stack: Vec::with_capacity(max_depth),
            redo_stack: Vec::new(),
            max_depth,
        }
    }

    /// Apply an edit and push it to the undo stack.
    pub fn execute(
        &mut self,
        scene: &mut Scene,
        layers: &mut dyn LayerSink,
        edit: Edit,
        description: &str,
    ) {
        edit.apply(scene, layers);
        self.record(Command::new(edit, description));
    }

    /// Push a command whose edit has already been applied.
    pub fn record(&mut self, command: Command) {
        log::debug!("recorded {}", command.description);
        self.undo_stack.push(command);
        if self.undo_stack.len() > self.max_depth {
            self.undo_stack.remove(0);
        }

        // Clear redo stack on new action
        self.redo_stack.clear();
    }

    /// Undo the last command.
    pub fn undo(&mut self, scene: &mut Scene, layers: &mut dyn LayerSink) -> Option<String> {
        let cmd = self.undo_stack.pop()?;
        cmd.inverse.apply(scene, layers);
        let desc = cmd.description.clone();
        self.redo_stack.push(cmd);
        Some(desc)
    }

    /// Redo the last undone command.
    pub fn redo(&mut self, scene: &mut Scene, layers: &mut dyn LayerSink) -> Option<String> {
        let cmd = self.redo_stack.pop()?;
        cmd.forward.apply(scene, layers);
        let desc = cmd.description.clone();
        self.undo_stack.push(cmd);
        Some(desc)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }
}
