//! Points and the point arena.
//!
//! Geometry is edited by mutating point coordinates in place, never by
//! replacing points: the end of one segment is the start of the next, and a
//! connection point on another shape may be shared by a path. Every point
//! therefore lives in a [`PointStore`] and is addressed by a [`PointId`].

use crate::id::{PointId, ShapeId};
use serde::{Deserialize, Serialize};

/// Marker drawn for a point when it is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PointMarker {
    #[default]
    None,
    Ellipse,
}

/// A 2D point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub marker: PointMarker,
    /// Shape this point is a connector of. Non-owning; only used to tell
    /// connectors apart from free points.
    pub owner: Option<ShapeId>,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            marker: PointMarker::None,
            owner: None,
        }
    }

    /// A connector point owned by `owner`.
    pub const fn connector(x: f64, y: f64, owner: ShapeId) -> Self {
        Self {
            x,
            y,
            marker: PointMarker::Ellipse,
            owner: Some(owner),
        }
    }

    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    pub fn distance_to(&self, x: f64, y: f64) -> f64 {
        (self.x - x).hypot(self.y - y)
    }
}

/// Append-only arena of points.
///
/// Points are never removed: a point abandoned by a cancelled segment simply
/// becomes unreachable. Ids stay valid for the lifetime of the store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PointStore {
    points: Vec<Point>,
}

impl PointStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a point and return its id.
    pub fn insert(&mut self, point: Point) -> PointId {
        let id = PointId(self.points.len() as u32);
        self.points.push(point);
        id
    }

    /// Insert a free point at `(x, y)`.
    pub fn create(&mut self, x: f64, y: f64) -> PointId {
        self.insert(Point::new(x, y))
    }

    /// Insert a free point at the current position of `source`.
    pub fn create_at(&mut self, source: PointId) -> PointId {
        let (x, y) = self.position(source);
        self.create(x, y)
    }

    pub fn get(&self, id: PointId) -> Option<&Point> {
        self.points.get(id.index())
    }

    pub fn get_mut(&mut self, id: PointId) -> Option<&mut Point> {
        self.points.get_mut(id.index())
    }

    /// Coordinates of a point. Unknown ids resolve to the origin.
    pub fn position(&self, id: PointId) -> (f64, f64) {
        self.get(id).map(Point::position).unwrap_or((0.0, 0.0))
    }

    /// Move a point in place. Unknown ids are ignored.
    pub fn set_position(&mut self, id: PointId, x: f64, y: f64) {
        if let Some(point) = self.get_mut(id) {
            point.x = x;
            point.y = y;
        }
    }

    pub fn translate(&mut self, id: PointId, dx: f64, dy: f64) {
        if let Some(point) = self.get_mut(id) {
            point.x += dx;
            point.y += dy;
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PointId, &Point)> {
        self.points
            .iter()
            .enumerate()
            .map(|(i, p)| (PointId(i as u32), p))
    }
}
