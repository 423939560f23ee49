use super::{BuildContext, SegmentBuilder, Slot, rebind};
use crate::error::EditorError;
use crate::overlay::Helper;
use vd_core::{PointId, Segment, SegmentKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum State {
    #[default]
    Start,
    End,
}

/// Straight segments. Each click fixes the end and starts the next line
/// from it.
#[derive(Debug, Default)]
pub struct LineBuilder {
    state: State,
    start: Option<PointId>,
    end: Option<PointId>,
}

impl LineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a zero-length line from `start` and track its end.
    fn begin(&mut self, cx: &mut BuildContext<'_>, start: PointId) -> Result<(), EditorError> {
        let end = cx.scene.points.create_at(start);
        cx.append(Segment::line(end, cx.segment_flags()))?;
        self.start = Some(start);
        self.end = Some(end);
        self.state = State::End;
        cx.show_helpers(&[Helper::Point(start), Helper::Point(end)]);
        Ok(())
    }
}

impl SegmentBuilder for LineBuilder {
    fn kind(&self) -> SegmentKind {
        SegmentKind::Line
    }

    fn is_idle(&self) -> bool {
        self.state == State::Start
    }

    fn state_name(&self) -> &'static str {
        match self.state {
            State::Start => "Start",
            State::End => "End",
        }
    }

    fn on_primary(&mut self, cx: &mut BuildContext<'_>, x: f64, y: f64) -> Result<(), EditorError> {
        match self.state {
            State::Start => {
                let start = cx.start_point(x, y)?;
                self.begin(cx, start)?;
            }
            State::End => {
                let end = self
                    .end
                    .ok_or_else(|| EditorError::invariant("line end not tracked"))?;
                let fixed = cx.fix_point(end, x, y);
                if fixed != end {
                    rebind(cx, Slot::End, fixed);
                } else {
                    cx.split_lines_at(end);
                }
                self.begin(cx, fixed)?;
            }
        }
        cx.invalidate();
        Ok(())
    }

    fn on_move(&mut self, cx: &mut BuildContext<'_>, x: f64, y: f64) {
        if let (State::End, Some(end)) = (self.state, self.end) {
            cx.track(end, x, y);
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

    #[test]
    fn click_click_chains_lines() {
        let mut h = Harness::new();
        let mut line = LineBuilder::new();

        h.click(&mut line, 0.0, 0.0);
        assert_eq!(line.state_name(), "End");
        assert_eq!(h.segments().len(), 1);

        h.hover(&mut line, 10.0, 10.0);
        h.click(&mut line, 10.0, 10.0);
        let segments = h.segments();
        assert_eq!(segments.len(), 2);
        assert_eq!(h.pos(segments[0].end_point()), (10.0, 10.0));
        // The new line is zero length, anchored at the fixed end.
        assert_eq!(h.pos(segments[1].end_point()), (10.0, 10.0));
        assert_ne!(segments[0].end_point(), segments[1].end_point());
        assert_eq!(h.overlay.len(), 2);
    }

    #[test]
    fn move_tracks_end() {
        let mut h = Harness::new();
        let mut line = LineBuilder::new();
        h.click(&mut line, 1.0, 2.0);
        h.hover(&mut line, 30.0, 40.0);

        let end = h.segments()[0].end_point();
        assert_eq!(h.pos(end), (30.0, 40.0));
        assert_eq!(h.pos(h.start()), (1.0, 2.0));
    }

    #[test]
    fn move_before_start_is_ignored() {
        let mut h = Harness::new();
        let mut line = LineBuilder::new();
        h.hover(&mut line, 30.0, 40.0);
        assert!(!h.path.is_initialized());
        assert!(h.scene.points.is_empty());
    }

    #[test]
    fn cancel_drops_only_in_progress_line() {
        let mut h = Harness::new();
        let mut line = LineBuilder::new();
        h.click(&mut line, 0.0, 0.0);
        h.click(&mut line, 10.0, 10.0);

        h.cancel(&mut line);
        assert!(line.is_idle());
        assert_eq!(h.segments().len(), 1);
        assert!(h.overlay.is_empty());

        h.cancel(&mut line);
        assert_eq!(h.segments().len(), 1);
    }
}
