use super::{BuildContext, SegmentBuilder, Slot, rebind};
use crate::error::EditorError;
use crate::overlay::Helper;
use vd_core::{PointId, Segment, SegmentKind, Size};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum State {
    #[default]
    None,
    One,
}

/// Elliptical arcs whose radii span the box between start and end.
#[derive(Debug, Default)]
pub struct ArcBuilder {
    state: State,
    start: Option<PointId>,
    end: Option<PointId>,
}

impl ArcBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn begin(&mut self, cx: &mut BuildContext<'_>, start: PointId) -> Result<(), EditorError> {
        let end = cx.scene.points.create_at(start);
        cx.append(Segment::arc(end, Size::ZERO, cx.segment_flags()))?;
        self.start = Some(start);
        self.end = Some(end);
        self.state = State::One;
        cx.show_helpers(&[Helper::Point(start), Helper::Point(end)]);
        Ok(())
    }

    /// Recompute the in-progress arc's radii from its current endpoints.
    fn update_size(&self, cx: &mut BuildContext<'_>) {
        let (Some(start), Some(end)) = (self.start, self.end) else {
            return;
        };
        let size = Size::between(cx.scene.points.position(start), cx.scene.points.position(end));
        if let Some(Segment::Arc(arc)) = cx.last_segment() {
            arc.size = size;
        }
    }
}

impl SegmentBuilder for ArcBuilder {
    fn kind(&self) -> SegmentKind {
        SegmentKind::Arc
    }

    fn is_idle(&self) -> bool {
        self.state == State::None
    }

    fn state_name(&self) -> &'static str {
        match self.state {
            State::None => "None",
            State::One => "One",
        }
    }

    fn on_primary(&mut self, cx: &mut BuildContext<'_>, x: f64, y: f64) -> Result<(), EditorError> {
        match self.state {
            State::None => {
                let start = cx.start_point(x, y)?;
                self.begin(cx, start)?;
            }
            State::One => {
                let end = self
                    .end
                    .ok_or_else(|| EditorError::invariant("arc end not tracked"))?;
                let fixed = cx.fix_point(end, x, y);
                if fixed != end {
                    rebind(cx, Slot::End, fixed);
                    self.end = Some(fixed);
                } else {
                    cx.split_lines_at(end);
                }
                self.update_size(cx);
                self.begin(cx, fixed)?;
            }
        }
        cx.invalidate();
        Ok(())
    }

    fn on_move(&mut self, cx: &mut BuildContext<'_>, x: f64, y: f64) {
        if let (State::One, Some(end)) = (self.state, self.end) {
            cx.track(end, x, y);
            self.update_size(cx);
            cx.invalidate();
        }
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

    fn arc_at(h: &Harness, index: usize) -> vd_core::ArcSegment {
        match h.segments()[index] {
            Segment::Arc(arc) => arc,
            other => panic!("expected arc, got {other:?}"),
        }
    }

    #[test]
    fn size_follows_pointer() {
        let mut h = Harness::new();
        let mut arc = ArcBuilder::new();
        h.click(&mut arc, 10.0, 20.0);
        assert_eq!(arc_at(&h, 0).size, Size::ZERO);

        h.hover(&mut arc, 4.0, 50.0);
        assert_eq!(arc_at(&h, 0).size, Size::new(6.0, 30.0));
    }

    #[test]
    fn fixing_end_chains_next_arc() {
        let mut h = Harness::new();
        let mut arc = ArcBuilder::new();
        h.click(&mut arc, 0.0, 0.0);
        h.click(&mut arc, 8.0, 6.0);

        let first = arc_at(&h, 0);
        assert_eq!(first.size, Size::new(8.0, 6.0));
        assert_eq!(first.rotation_angle, 0.0);
        assert!(!first.is_large_arc);
        assert_eq!(first.sweep_direction, vd_core::SweepDirection::Clockwise);

        let second = arc_at(&h, 1);
        assert_eq!(h.pos(second.point), (8.0, 6.0));
        assert_eq!(second.size, Size::ZERO);
        assert_eq!(arc.state_name(), "One");
    }

    #[test]
    fn cancel_from_none_is_noop() {
        let mut h = Harness::new();
        let mut arc = ArcBuilder::new();
        h.cancel(&mut arc);
        assert!(arc.is_idle());
        assert!(!h.path.is_initialized());
    }
}
