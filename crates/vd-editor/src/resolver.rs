//! Point resolver: raw canvas coordinates → working point.
//!
//! Coordinates are snapped to the grid first, then matched against existing
//! connection points. A hit returns the existing point itself, so later
//! edits to it move the shape that owns it too.

use crate::config::EditorSettings;
use vd_core::{PointId, Scene, ShapeId};
use vd_hit::HitTester;

/// Round `value` to the nearest multiple of `increment`.
/// Non-positive increments leave the value unchanged.
pub fn snap(value: f64, increment: f64) -> f64 {
    if increment > 0.0 {
        (value / increment).round() * increment
    } else {
        value
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointResolver {
    pub snap_to_grid: bool,
    pub snap_x: f64,
    pub snap_y: f64,
}

impl PointResolver {
    pub fn new(snap_to_grid: bool, snap_x: f64, snap_y: f64) -> Self {
        Self {
            snap_to_grid,
            snap_x,
            snap_y,
        }
    }

    pub fn from_settings(settings: &EditorSettings) -> Self {
        Self::new(settings.snap_to_grid, settings.snap_x, settings.snap_y)
    }

    /// Apply grid snapping, each axis independently.
    pub fn snap(&self, x: f64, y: f64) -> (f64, f64) {
        if self.snap_to_grid {
            (snap(x, self.snap_x), snap(y, self.snap_y))
        } else {
            (x, y)
        }
    }

    /// Look for an existing point near the snapped position of `(x, y)`.
    pub fn connect(
        &self,
        scene: &Scene,
        hit: &dyn HitTester,
        candidates: &[ShapeId],
        x: f64,
        y: f64,
    ) -> Option<PointId> {
        let (sx, sy) = self.snap(x, y);
        hit.try_get_connection_point(scene, candidates, sx, sy)
    }

    /// Resolve `(x, y)` to a point: an existing connection point when
    /// `try_connect` finds one, otherwise a new point at the snapped position.
    pub fn resolve(
        &self,
        scene: &mut Scene,
        hit: &dyn HitTester,
        candidates: &[ShapeId],
        x: f64,
        y: f64,
        try_connect: bool,
    ) -> PointId {
        if try_connect && let Some(existing) = self.connect(scene, hit, candidates, x, y) {
            log::trace!("resolved ({x}, {y}) to existing point {existing}");
            return existing;
        }
        let (sx, sy) = self.snap(x, y);
        scene.points.create(sx, sy)
    }
}
