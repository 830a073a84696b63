//! Drag/tap state machine for the floating launcher button.
//!
//! The machine is pure: it consumes an enumerated input set
//! {press, move, release} plus the geometry it needs, and returns the visual
//! state to apply and whether the gesture counted as an activation. Applying
//! styles, reading bounding rects, and arming the release guard timer are the
//! caller's job.

use crate::geometry::{clamp_to_viewport, nearest_edge, snap_to_edge, Point, Viewport};

/// Minimum per-axis displacement before a press turns into a drag.
pub const DRAG_THRESHOLD_PX: f64 = 10.0;
/// The launcher button is a fixed 60 logical-px square.
pub const LAUNCHER_SIZE_PX: f64 = 60.0;
/// Clearance kept between the snapped button and its edge.
pub const SNAP_MARGIN_PX: f64 = 20.0;
/// Press-to-release time above which a still gesture no longer counts as a tap.
pub const TAP_MAX_DURATION_MS: f64 = 200.0;
/// How long after release the trailing synthetic click stays suppressed.
pub const RELEASE_GUARD_MS: u32 = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cursor {
    Default,
    Grabbing,
}

/// Target presentation of the button, recomputed on every transition and
/// applied by a single render step. `position` is `None` when the button
/// should stay where it is.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ButtonVisualState {
    pub position: Option<Point>,
    pub transition: bool,
    pub cursor: Cursor,
}

/// One live press. Created on press, mutated on move, consumed on release.
#[derive(Clone, Copy, Debug)]
pub struct DragSession {
    origin: Point,
    element_offset: Point,
    start_ms: f64,
    dragging: bool,
}

impl DragSession {
    fn begin(pointer: Point, button_top_left: Point, now_ms: f64) -> Self {
        Self {
            origin: pointer,
            element_offset: Point {
                x: pointer.x - button_top_left.x,
                y: pointer.y - button_top_left.y,
            },
            start_ms: now_ms,
            dragging: false,
        }
    }

    /// Returns the clamped top-left for the button once the threshold has
    /// been crossed, `None` while the gesture still reads as a tap.
    /// `dragging` is sticky for the session.
    fn track(&mut self, pointer: Point, viewport: Viewport) -> Option<Point> {
        if !self.dragging {
            let dx = (pointer.x - self.origin.x).abs();
            let dy = (pointer.y - self.origin.y).abs();
            if dx > DRAG_THRESHOLD_PX || dy > DRAG_THRESHOLD_PX {
                self.dragging = true;
            }
        }
        if !self.dragging {
            return None;
        }
        let raw = Point {
            x: pointer.x - self.element_offset.x,
            y: pointer.y - self.element_offset.y,
        };
        Some(clamp_to_viewport(raw, viewport, LAUNCHER_SIZE_PX))
    }

    fn is_tap(&self, now_ms: f64) -> bool {
        !self.dragging && (now_ms - self.start_ms) < TAP_MAX_DURATION_MS
    }
}

/// Inputs the launcher controller reacts to.
#[derive(Clone, Copy, Debug)]
pub enum LauncherInput {
    Press {
        pointer: Point,
        button_top_left: Point,
        now_ms: f64,
    },
    Move {
        pointer: Point,
        viewport: Viewport,
    },
    Release {
        button_top_left: Point,
        viewport: Viewport,
        now_ms: f64,
    },
}

/// What the caller has to do after feeding one input.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LauncherEffects {
    pub visual: Option<ButtonVisualState>,
    pub activate: bool,
    /// Arm a [`RELEASE_GUARD_MS`] timer and call
    /// [`LauncherMachine::clear_guard`] when it fires.
    pub start_guard: bool,
}

impl LauncherEffects {
    fn none() -> Self {
        Self {
            visual: None,
            activate: false,
            start_guard: false,
        }
    }
}

/// Owns the single live [`DragSession`]. One machine per attached button;
/// no state outside the instance.
#[derive(Debug, Default)]
pub struct LauncherMachine {
    session: Option<DragSession>,
    guard: bool,
}

impl LauncherMachine {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while the trailing-click guard window is open.
    pub fn guard_active(&self) -> bool {
        self.guard
    }

    /// True once the live session has crossed the drag threshold.
    pub fn is_dragging(&self) -> bool {
        self.session.map(|s| s.dragging).unwrap_or(false)
    }

    pub fn clear_guard(&mut self) {
        self.guard = false;
    }

    pub fn handle(&mut self, input: LauncherInput) -> LauncherEffects {
        match input {
            LauncherInput::Press {
                pointer,
                button_top_left,
                now_ms,
            } => {
                // A new press discards any stale session outright.
                self.session = Some(DragSession::begin(pointer, button_top_left, now_ms));
                LauncherEffects {
                    visual: Some(ButtonVisualState {
                        position: None,
                        transition: false,
                        cursor: Cursor::Grabbing,
                    }),
                    activate: false,
                    start_guard: false,
                }
            }
            LauncherInput::Move { pointer, viewport } => {
                let Some(session) = self.session.as_mut() else {
                    return LauncherEffects::none();
                };
                let Some(position) = session.track(pointer, viewport) else {
                    return LauncherEffects::none();
                };
                LauncherEffects {
                    visual: Some(ButtonVisualState {
                        position: Some(position),
                        transition: false,
                        cursor: Cursor::Grabbing,
                    }),
                    activate: false,
                    start_guard: false,
                }
            }
            LauncherInput::Release {
                button_top_left,
                viewport,
                now_ms,
            } => {
                // Consuming the session here is what makes a second release
                // (without an intervening press) a no-op.
                let Some(session) = self.session.take() else {
                    return LauncherEffects::none();
                };
                let center = Point {
                    x: button_top_left.x + LAUNCHER_SIZE_PX / 2.0,
                    y: button_top_left.y + LAUNCHER_SIZE_PX / 2.0,
                };
                let edge = nearest_edge(center, viewport);
                let snapped = snap_to_edge(
                    button_top_left,
                    edge,
                    viewport,
                    LAUNCHER_SIZE_PX,
                    SNAP_MARGIN_PX,
                );
                let activate = session.is_tap(now_ms) && !self.guard;
                self.guard = true;
                LauncherEffects {
                    visual: Some(ButtonVisualState {
                        position: Some(snapped),
                        transition: true,
                        cursor: Cursor::Default,
                    }),
                    activate,
                    start_guard: true,
                }
            }
        }
    }
}
