//! Interactive path editing for VD.
//!
//! The [`PathTool`] turns pointer input into paths made of lines, arcs and
//! Bézier curves. Points are resolved against the grid and existing
//! geometry, chained segment to segment, and previewed with helper shapes
//! until the path is committed to the permanent layer.

pub mod builders;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod input;
pub mod layers;
pub mod overlay;
pub mod resolver;
pub mod shortcuts;
pub mod style;
pub mod tools;

pub use builders::{ArcBuilder, BuildContext, CubicBuilder, LineBuilder, QuadraticBuilder, SegmentBuilder};
pub use commands::{Command, CommandStack, Edit};
pub use config::EditorSettings;
pub use context::PathContext;
pub use error::EditorError;
pub use input::{InputEvent, Modifiers, PointerButton};
pub use layers::{LayerKind, LayerSink, Layers};
pub use overlay::{Helper, Overlay};
pub use resolver::PointResolver;
pub use shortcuts::{ShortcutAction, ShortcutMap};
pub use style::{DefaultStyleProvider, ShapeDefaults, StyleProvider};
pub use tools::{PathTool, Tool, ToolEvent};
