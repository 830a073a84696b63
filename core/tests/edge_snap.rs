use bapsimi_core::geometry::{
    clamp_to_viewport, nearest_edge, snap_to_edge, Edge, Point, Viewport,
};

const VIEWPORT: Viewport = Viewport {
    width: 1000.0,
    height: 800.0,
};

#[test]
fn nearest_edge_picks_minimum_distance() {
    assert_eq!(nearest_edge(Point::new(10.0, 400.0), VIEWPORT), Edge::Left);
    assert_eq!(nearest_edge(Point::new(990.0, 400.0), VIEWPORT), Edge::Right);
    assert_eq!(nearest_edge(Point::new(500.0, 30.0), VIEWPORT), Edge::Top);
    assert_eq!(nearest_edge(Point::new(500.0, 780.0), VIEWPORT), Edge::Bottom);
}

#[test]
fn nearest_edge_ties_follow_enumeration_order() {
    // Dead center of a square viewport: all four distances equal.
    let square = Viewport::new(800.0, 800.0);
    assert_eq!(nearest_edge(Point::new(400.0, 400.0), square), Edge::Left);
    // Right and top equidistant: right wins.
    assert_eq!(nearest_edge(Point::new(970.0, 30.0), VIEWPORT), Edge::Right);
    // Top and bottom equidistant, both beating left/right: top wins.
    assert_eq!(nearest_edge(Point::new(500.0, 400.0), VIEWPORT), Edge::Top);
}

#[test]
fn snap_adjusts_only_the_chosen_axis() {
    let pos = Point::new(333.0, 444.0);
    assert_eq!(
        snap_to_edge(pos, Edge::Left, VIEWPORT, 60.0, 20.0),
        Point::new(20.0, 444.0)
    );
    assert_eq!(
        snap_to_edge(pos, Edge::Right, VIEWPORT, 60.0, 20.0),
        Point::new(920.0, 444.0)
    );
    assert_eq!(
        snap_to_edge(pos, Edge::Top, VIEWPORT, 60.0, 20.0),
        Point::new(333.0, 20.0)
    );
    assert_eq!(
        snap_to_edge(pos, Edge::Bottom, VIEWPORT, 60.0, 20.0),
        Point::new(333.0, 720.0)
    );
}

#[test]
fn clamp_keeps_the_button_inside() {
    assert_eq!(
        clamp_to_viewport(Point::new(-50.0, -50.0), VIEWPORT, 60.0),
        Point::new(0.0, 0.0)
    );
    assert_eq!(
        clamp_to_viewport(Point::new(2000.0, 2000.0), VIEWPORT, 60.0),
        Point::new(940.0, 740.0)
    );
    let inside = Point::new(123.0, 456.0);
    assert_eq!(clamp_to_viewport(inside, VIEWPORT, 60.0), inside);
}

#[test]
fn clamp_survives_a_viewport_smaller_than_the_button() {
    let tiny = Viewport::new(40.0, 40.0);
    assert_eq!(
        clamp_to_viewport(Point::new(30.0, 30.0), tiny, 60.0),
        Point::new(0.0, 0.0)
    );
}
