//! Geometry queries over a `vd-core` scene, backed by `kurbo`.

pub mod hit;
pub mod path;

pub use hit::{HitTester, LineSplit, SceneHitTester};
pub use path::{shape_bounds, shape_outline, to_bez_path};
