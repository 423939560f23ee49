use super::{BuildContext, SegmentBuilder, Slot, rebind};
use crate::error::EditorError;
use crate::overlay::Helper;
use vd_core::{PointId, Segment, SegmentKind};

/// States are named after the point the next click fixes. Point 1 is the
/// segment start; the end (`Point4`) is fixed before both controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum State {
    #[default]
    Point1,
    Point4,
    Point2,
    Point3,
}

/// Cubic Bézier segments: click the end, then each control in turn.
#[derive(Debug, Default)]
pub struct CubicBuilder {
    state: State,
    point1: Option<PointId>,
    point2: Option<PointId>,
    point3: Option<PointId>,
    point4: Option<PointId>,
    /// Point 4 was bound to an existing point and is never split at.
    end_connected: bool,
}

impl CubicBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn begin(&mut self, cx: &mut BuildContext<'_>, start: PointId) -> Result<(), EditorError> {
        let point2 = cx.scene.points.create_at(start);
        let point3 = cx.scene.points.create_at(start);
        let point4 = cx.scene.points.create_at(start);
        cx.append(Segment::cubic(point2, point3, point4, cx.segment_flags()))?;
        *self = Self {
            state: State::Point4,
            point1: Some(start),
            point2: Some(point2),
            point3: Some(point3),
            point4: Some(point4),
            end_connected: false,
        };
        cx.show_helpers(&[Helper::Point(start), Helper::Point(point4)]);
        Ok(())
    }

    fn tracked(&self) -> Option<[PointId; 4]> {
        match (self.point1, self.point2, self.point3, self.point4) {
            (Some(p1), Some(p2), Some(p3), Some(p4)) => Some([p1, p2, p3, p4]),
            _ => None,
        }
    }

    fn require_tracked(&self) -> Result<[PointId; 4], EditorError> {
        self.tracked()
            .ok_or_else(|| EditorError::invariant("cubic points not tracked"))
    }

    fn show_handles(&self, cx: &mut BuildContext<'_>, [p1, p2, p3, p4]: [PointId; 4]) {
        cx.show_helpers(&[
            Helper::Line(p1, p2),
            Helper::Line(p3, p4),
            Helper::Point(p2),
            Helper::Point(p3),
        ]);
    }
}

impl SegmentBuilder for CubicBuilder {
    fn kind(&self) -> SegmentKind {
        SegmentKind::CubicBezier
    }

    fn is_idle(&self) -> bool {
        self.state == State::Point1
    }

    fn state_name(&self) -> &'static str {
        match self.state {
            State::Point1 => "Point1",
            State::Point4 => "Point4",
            State::Point2 => "Point2",
            State::Point3 => "Point3",
        }
    }

    fn on_primary(&mut self, cx: &mut BuildContext<'_>, x: f64, y: f64) -> Result<(), EditorError> {
        match self.state {
            State::Point1 => {
                let start = cx.start_point(x, y)?;
                self.begin(cx, start)?;
            }
            State::Point4 => {
                let [p1, p2, p3, p4] = self.require_tracked()?;
                let fixed = cx.fix_point(p4, x, y);
                if fixed != p4 {
                    rebind(cx, Slot::End, fixed);
                    self.point4 = Some(fixed);
                    self.end_connected = true;
                }
                let (fx, fy) = cx.scene.points.position(fixed);
                cx.scene.points.set_position(p3, fx, fy);
                self.state = State::Point2;
                self.show_handles(cx, [p1, p2, p3, fixed]);
            }
            State::Point2 => {
                let points = self.require_tracked()?;
                let fixed = cx.fix_point(points[1], x, y);
                if fixed != points[1] {
                    rebind(cx, Slot::Control1, fixed);
                    self.point2 = Some(fixed);
                }
                self.state = State::Point3;
                self.show_handles(cx, [points[0], fixed, points[2], points[3]]);
            }
            State::Point3 => {
                let [_, _, p3, p4] = self.require_tracked()?;
                let fixed = cx.fix_point(p3, x, y);
                if fixed != p3 {
                    rebind(cx, Slot::Control2, fixed);
                }
                if !self.end_connected {
                    cx.split_lines_at(p4);
                }
                self.begin(cx, p4)?;
            }
        }
        cx.invalidate();
        Ok(())
    }

    fn on_move(&mut self, cx: &mut BuildContext<'_>, x: f64, y: f64) {
        let Some([_, p2, p3, p4]) = self.tracked() else {
            return;
        };
        match self.state {
            State::Point1 => return,
            State::Point4 => {
                cx.track(p3, x, y);
                cx.track(p4, x, y);
            }
            State::Point2 => cx.track(p2, x, y),
            State::Point3 => cx.track(p3, x, y),
        }
        cx.invalidate();
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::harness::Harness;
    use pretty_assertions::assert_eq;

    fn cubic_at(h: &Harness, index: usize) -> vd_core::CubicBezierSegment {
        match h.segments()[index] {
            Segment::CubicBezier(cubic) => cubic,
            other => panic!("expected cubic, got {other:?}"),
        }
    }

    #[test]
    fn four_clicks_place_four_points() {
        let mut h = Harness::new();
        let mut cubic = CubicBuilder::new();

        h.click(&mut cubic, 0.0, 0.0);
        assert_eq!(cubic.state_name(), "Point4");
        h.click(&mut cubic, 4.0, 0.0);
        assert_eq!(cubic.state_name(), "Point2");
        h.click(&mut cubic, 1.0, 3.0);
        assert_eq!(cubic.state_name(), "Point3");
        h.click(&mut cubic, 3.0, 3.0);
        assert_eq!(cubic.state_name(), "Point4");

        let first = cubic_at(&h, 0);
        assert_eq!(h.pos(h.start()), (0.0, 0.0));
        assert_eq!(h.pos(first.point1), (1.0, 3.0));
        assert_eq!(h.pos(first.point2), (3.0, 3.0));
        assert_eq!(h.pos(first.point3), (4.0, 0.0));

        let second = cubic_at(&h, 1);
        assert_eq!(h.pos(second.point1), (4.0, 0.0));
        assert_eq!(h.pos(second.point3), (4.0, 0.0));
    }

    #[test]
    fn moving_end_drags_second_control() {
        let mut h = Harness::new();
        let mut cubic = CubicBuilder::new();
        h.click(&mut cubic, 0.0, 0.0);
        h.hover(&mut cubic, 6.0, 2.0);

        let c = cubic_at(&h, 0);
        assert_eq!(h.pos(c.point1), (0.0, 0.0));
        assert_eq!(h.pos(c.point2), (6.0, 2.0));
        assert_eq!(h.pos(c.point3), (6.0, 2.0));
    }

    #[test]
    fn handles_shown_while_bending() {
        let mut h = Harness::new();
        let mut cubic = CubicBuilder::new();
        h.click(&mut cubic, 0.0, 0.0);
        assert_eq!(h.overlay.len(), 2);
        h.click(&mut cubic, 4.0, 0.0);
        assert_eq!(h.overlay.len(), 4);

        h.cancel(&mut cubic);
        assert!(h.overlay.is_empty());
        assert_eq!(h.segments().len(), 0);
    }
}
