//! Integration tests: point sharing across segments and shapes (vd-core).
//!
//! A path's segments and a connector on another shape may reference the same
//! point. Moving that point must be visible everywhere it is used.

use pretty_assertions::assert_eq;
use vd_core::*;

fn flags() -> SegmentFlags {
    SegmentFlags::default()
}

#[test]
fn chained_segments_share_their_joint() {
    let mut scene = Scene::new();
    let start = scene.points.create(0.0, 0.0);
    let joint = scene.points.create(10.0, 0.0);
    let end = scene.points.create(10.0, 10.0);

    let mut figure = Figure::new(start, false);
    figure.segments.push(Segment::line(joint, flags()));
    figure.segments.push(Segment::line(end, flags()));

    assert_eq!(figure.segment_start(1), Some(joint));

    scene.points.set_position(joint, 20.0, 0.0);
    let first_end = scene.points.position(figure.segments[0].end_point());
    let second_start = scene.points.position(figure.segment_start(1).unwrap());
    assert_eq!(first_end, (20.0, 0.0));
    assert_eq!(second_start, (20.0, 0.0));
}

#[test]
fn path_bound_to_connector_follows_owner_moves() {
    let mut scene = Scene::new();

    let a = scene.points.create(0.0, 0.0);
    let b = scene.points.create(100.0, 0.0);
    let wire = scene.insert_shape(ShapeNode::new(
        ShapeId::intern("moving_wire"),
        ShapeKind::Line { start: a, end: b },
    ));
    let connector = scene.add_connector(wire, 50.0, 0.0).unwrap();

    let start = scene.points.create(50.0, 50.0);
    let mut path = ShapeNode::path(ShapeId::with_prefix("path"), FillRule::NonZero);
    let mut figure = Figure::new(start, false);
    figure.segments.push(Segment::line(connector, flags()));
    path.geometry_mut().unwrap().figures.push(figure);
    let path = scene.insert_shape(path);

    // Move the wire together with its connector.
    let mut moving = scene.shape(wire).unwrap().points();
    moving.extend(scene.shape(wire).unwrap().connectors.iter().copied());
    scene.translate_points(&moving, 0.0, 25.0);

    let geometry = scene.geometry(path).unwrap();
    let tip = geometry.figures[0].last_point();
    assert_eq!(tip, connector);
    assert_eq!(scene.points.position(tip), (50.0, 25.0));
    assert_eq!(geometry.segment_count(), 1);
}
