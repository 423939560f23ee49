use super::{BuildContext, SegmentBuilder, Slot, rebind};
use crate::error::EditorError;
use crate::overlay::Helper;
use vd_core::{PointId, Segment, SegmentKind};

/// States are named after the point the next click fixes: the end point
/// (`Point3`) comes before the control point (`Point2`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum State {
    #[default]
    Point1,
    Point3,
    Point2,
}

/// Quadratic Bézier segments: click the end, then bend with the control.
#[derive(Debug, Default)]
pub struct QuadraticBuilder {
    state: State,
    start: Option<PointId>,
    control: Option<PointId>,
    end: Option<PointId>,
    /// The end was bound to an existing point and is never split at.
    end_connected: bool,
}

impl QuadraticBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn begin(&mut self, cx: &mut BuildContext<'_>, start: PointId) -> Result<(), EditorError> {
        let control = cx.scene.points.create_at(start);
        let end = cx.scene.points.create_at(start);
        cx.append(Segment::quadratic(control, end, cx.segment_flags()))?;
        self.start = Some(start);
        self.control = Some(control);
        self.end = Some(end);
        self.end_connected = false;
        self.state = State::Point3;
        cx.show_helpers(&[Helper::Point(start), Helper::Point(end)]);
        Ok(())
    }

    fn tracked(&self) -> Result<(PointId, PointId, PointId), EditorError> {
        match (self.start, self.control, self.end) {
            (Some(start), Some(control), Some(end)) => Ok((start, control, end)),
            _ => Err(EditorError::invariant("quadratic points not tracked")),
        }
    }
}

impl SegmentBuilder for QuadraticBuilder {
    fn kind(&self) -> SegmentKind {
        SegmentKind::QuadraticBezier
    }

    fn is_idle(&self) -> bool {
        self.state == State::Point1
    }

    fn state_name(&self) -> &'static str {
        match self.state {
            State::Point1 => "Point1",
            State::Point3 => "Point3",
            State::Point2 => "Point2",
        }
    }

    fn on_primary(&mut self, cx: &mut BuildContext<'_>, x: f64, y: f64) -> Result<(), EditorError> {
        match self.state {
            State::Point1 => {
                let start = cx.start_point(x, y)?;
                self.begin(cx, start)?;
            }
            State::Point3 => {
                let (start, control, end) = self.tracked()?;
                let fixed = cx.fix_point(end, x, y);
                if fixed != end {
                    rebind(cx, Slot::End, fixed);
                    self.end = Some(fixed);
                    self.end_connected = true;
                }
                let (fx, fy) = cx.scene.points.position(fixed);
                cx.scene.points.set_position(control, fx, fy);
                self.state = State::Point2;
                cx.show_helpers(&[
                    Helper::Line(start, control),
                    Helper::Line(control, fixed),
                    Helper::Point(control),
                ]);
            }
            State::Point2 => {
                let (_, control, end) = self.tracked()?;
                let fixed = cx.fix_point(control, x, y);
                if fixed != control {
                    rebind(cx, Slot::Control1, fixed);
                }
                if !self.end_connected {
                    cx.split_lines_at(end);
                }
                self.begin(cx, end)?;
            }
        }
        cx.invalidate();
        Ok(())
    }

    fn on_move(&mut self, cx: &mut BuildContext<'_>, x: f64, y: f64) {
        match (self.state, self.control, self.end) {
            (State::Point3, Some(control), Some(end)) => {
                cx.track(end, x, y);
                cx.track(control, x, y);
            }
            (State::Point2, Some(control), _) => cx.track(control, x, y),
            _ => return,
        }
        cx.invalidate();
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}
