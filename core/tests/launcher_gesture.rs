use bapsimi_core::gesture::{
    Cursor, LauncherInput, LauncherMachine, LAUNCHER_SIZE_PX, SNAP_MARGIN_PX,
};
use bapsimi_core::geometry::{Point, Viewport};

const VIEWPORT: Viewport = Viewport {
    width: 1000.0,
    height: 800.0,
};

fn press(machine: &mut LauncherMachine, pointer: Point, top_left: Point, now_ms: f64) {
    let effects = machine.handle(LauncherInput::Press {
        pointer,
        button_top_left: top_left,
        now_ms,
    });
    let visual = effects.visual.expect("press always renders");
    assert_eq!(visual.position, None);
    assert!(!visual.transition);
    assert_eq!(visual.cursor, Cursor::Grabbing);
}

fn release(
    machine: &mut LauncherMachine,
    top_left: Point,
    now_ms: f64,
) -> bapsimi_core::gesture::LauncherEffects {
    machine.handle(LauncherInput::Release {
        button_top_left: top_left,
        viewport: VIEWPORT,
        now_ms,
    })
}

#[test]
fn quick_still_release_is_a_tap() {
    let mut machine = LauncherMachine::new();
    let top_left = Point::new(900.0, 700.0);
    press(&mut machine, Point::new(930.0, 730.0), top_left, 0.0);
    // 9 px on both axes stays under the threshold.
    machine.handle(LauncherInput::Move {
        pointer: Point::new(939.0, 739.0),
        viewport: VIEWPORT,
    });
    let effects = release(&mut machine, top_left, 150.0);
    assert!(effects.activate);
    assert!(effects.start_guard);
}

#[test]
fn slow_release_is_not_a_tap() {
    let mut machine = LauncherMachine::new();
    let top_left = Point::new(900.0, 700.0);
    press(&mut machine, Point::new(930.0, 730.0), top_left, 0.0);
    let effects = release(&mut machine, top_left, 200.0);
    assert!(!effects.activate);
}

#[test]
fn crossing_threshold_on_one_axis_cancels_activation() {
    let mut machine = LauncherMachine::new();
    let top_left = Point::new(900.0, 700.0);
    press(&mut machine, Point::new(930.0, 730.0), top_left, 0.0);
    let effects = machine.handle(LauncherInput::Move {
        pointer: Point::new(930.0, 741.0),
        viewport: VIEWPORT,
    });
    assert!(machine.is_dragging());
    assert!(effects.visual.is_some());
    // Even an instant release no longer activates.
    let effects = release(&mut machine, top_left, 10.0);
    assert!(!effects.activate);
}

#[test]
fn dragging_is_sticky_within_a_session() {
    let mut machine = LauncherMachine::new();
    let top_left = Point::new(500.0, 400.0);
    press(&mut machine, Point::new(530.0, 430.0), top_left, 0.0);
    machine.handle(LauncherInput::Move {
        pointer: Point::new(560.0, 430.0),
        viewport: VIEWPORT,
    });
    assert!(machine.is_dragging());
    // Returning to the origin does not revert the classification.
    machine.handle(LauncherInput::Move {
        pointer: Point::new(530.0, 430.0),
        viewport: VIEWPORT,
    });
    assert!(machine.is_dragging());
}

#[test]
fn move_positions_follow_pointer_minus_offset() {
    let mut machine = LauncherMachine::new();
    let top_left = Point::new(500.0, 400.0);
    // Pointer grabs the button 30 px in from its corner.
    press(&mut machine, Point::new(530.0, 430.0), top_left, 0.0);
    let effects = machine.handle(LauncherInput::Move {
        pointer: Point::new(630.0, 530.0),
        viewport: VIEWPORT,
    });
    let visual = effects.visual.expect("past threshold");
    assert_eq!(visual.position, Some(Point::new(600.0, 500.0)));
    assert!(!visual.transition);
}

#[test]
fn drag_positions_clamp_to_viewport() {
    let mut machine = LauncherMachine::new();
    let top_left = Point::new(500.0, 400.0);
    press(&mut machine, Point::new(530.0, 430.0), top_left, 0.0);

    let effects = machine.handle(LauncherInput::Move {
        pointer: Point::new(-200.0, -200.0),
        viewport: VIEWPORT,
    });
    assert_eq!(
        effects.visual.unwrap().position,
        Some(Point::new(0.0, 0.0))
    );

    let effects = machine.handle(LauncherInput::Move {
        pointer: Point::new(5000.0, 5000.0),
        viewport: VIEWPORT,
    });
    assert_eq!(
        effects.visual.unwrap().position,
        Some(Point::new(
            VIEWPORT.width - LAUNCHER_SIZE_PX,
            VIEWPORT.height - LAUNCHER_SIZE_PX
        ))
    );
}

#[test]
fn release_snaps_to_nearest_edge() {
    let mut machine = LauncherMachine::new();
    // Center lands at (10, 400): left distance 10 beats right 990 and
    // top/bottom 400, so the button parks at left = 20.
    let top_left = Point::new(-20.0, 370.0);
    press(&mut machine, Point::new(10.0, 400.0), top_left, 0.0);
    let effects = release(&mut machine, top_left, 400.0);
    let visual = effects.visual.expect("release always renders");
    assert_eq!(visual.position, Some(Point::new(SNAP_MARGIN_PX, 370.0)));
    assert!(visual.transition);
    assert_eq!(visual.cursor, Cursor::Default);
}

#[test]
fn edge_ties_resolve_left_right_top_bottom() {
    let mut machine = LauncherMachine::new();
    // Center at (400, 400): equidistant from left, top, and bottom.
    let top_left = Point::new(370.0, 370.0);
    press(&mut machine, Point::new(400.0, 400.0), top_left, 0.0);
    let effects = release(&mut machine, top_left, 400.0);
    assert_eq!(
        effects.visual.unwrap().position,
        Some(Point::new(SNAP_MARGIN_PX, 370.0))
    );
}

#[test]
fn second_release_without_press_is_a_no_op() {
    let mut machine = LauncherMachine::new();
    let top_left = Point::new(370.0, 100.0);
    press(&mut machine, Point::new(400.0, 130.0), top_left, 0.0);
    let first = release(&mut machine, top_left, 50.0);
    assert!(first.visual.is_some());
    let second = release(&mut machine, top_left, 60.0);
    assert_eq!(second.visual, None);
    assert!(!second.activate);
    assert!(!second.start_guard);
}

#[test]
fn guard_suppresses_tap_until_cleared() {
    let mut machine = LauncherMachine::new();
    let top_left = Point::new(900.0, 700.0);

    press(&mut machine, Point::new(930.0, 730.0), top_left, 0.0);
    assert!(release(&mut machine, top_left, 50.0).activate);
    assert!(machine.guard_active());

    // Second tap lands before the guard timer fired: no activation.
    press(&mut machine, Point::new(930.0, 730.0), top_left, 60.0);
    assert!(!release(&mut machine, top_left, 110.0).activate);

    machine.clear_guard();
    press(&mut machine, Point::new(930.0, 730.0), top_left, 300.0);
    assert!(release(&mut machine, top_left, 350.0).activate);
}

#[test]
fn new_press_discards_stale_session() {
    let mut machine = LauncherMachine::new();
    let top_left = Point::new(500.0, 400.0);
    press(&mut machine, Point::new(530.0, 430.0), top_left, 0.0);
    machine.handle(LauncherInput::Move {
        pointer: Point::new(700.0, 430.0),
        viewport: VIEWPORT,
    });
    assert!(machine.is_dragging());

    // The release event was lost; the next press starts clean.
    press(&mut machine, Point::new(100.0, 100.0), Point::new(70.0, 70.0), 1000.0);
    assert!(!machine.is_dragging());
    machine.clear_guard();
    let effects = release(&mut machine, Point::new(70.0, 70.0), 1050.0);
    assert!(effects.activate);
}
