pub mod geometry;
pub mod id;
pub mod model;
pub mod point;
pub mod style;

pub use geometry::*;
pub use id::{PointId, ShapeId, StyleId};
pub use model::{Scene, ShapeKind, ShapeNode};
pub use point::{Point, PointMarker, PointStore};
pub use style::{Color, Stroke, StrokeCap, Style};
