pub mod api;
pub mod geometry;
pub mod gesture;

pub use geometry::{clamp_to_viewport, nearest_edge, snap_to_edge, Edge, Point, Viewport};
pub use gesture::{
    ButtonVisualState, Cursor, DragSession, LauncherEffects, LauncherInput, LauncherMachine,
    DRAG_THRESHOLD_PX, LAUNCHER_SIZE_PX, RELEASE_GUARD_MS, SNAP_MARGIN_PX, TAP_MAX_DURATION_MS,
};
