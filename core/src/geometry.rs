//! Viewport geometry for the floating launcher button.
//!
//! Positions are logical-pixel coordinates with the origin at the viewport's
//! top-left corner, matching DOM `fixed` positioning.

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// The four screen edges a released button can snap to.
///
/// Declaration order is load-bearing: distance ties resolve to the first
/// matching edge in this order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

/// Clamps an element's top-left corner so a `size`-sized square stays fully
/// inside the viewport.
pub fn clamp_to_viewport(pos: Point, viewport: Viewport, size: f64) -> Point {
    Point {
        x: pos.x.clamp(0.0, (viewport.width - size).max(0.0)),
        y: pos.y.clamp(0.0, (viewport.height - size).max(0.0)),
    }
}

/// Picks the edge closest to `center`, first match winning on ties.
pub fn nearest_edge(center: Point, viewport: Viewport) -> Edge {
    let candidates = [
        (Edge::Left, center.x),
        (Edge::Right, viewport.width - center.x),
        (Edge::Top, center.y),
        (Edge::Bottom, viewport.height - center.y),
    ];
    let mut best = candidates[0];
    for candidate in &candidates[1..] {
        if candidate.1 < best.1 {
            best = *candidate;
        }
    }
    best.0
}

/// Moves `pos` flush against `edge` with `margin` clearance, adjusting only
/// the axis that edge controls. The other coordinate passes through.
pub fn snap_to_edge(pos: Point, edge: Edge, viewport: Viewport, size: f64, margin: f64) -> Point {
    match edge {
        Edge::Left => Point { x: margin, y: pos.y },
        Edge::Right => Point {
            x: viewport.width - size - margin,
            y: pos.y,
        },
        Edge::Top => Point { x: pos.x, y: margin },
        Edge::Bottom => Point {
            x: pos.x,
            y: viewport.height - size - margin,
        },
    }
}
