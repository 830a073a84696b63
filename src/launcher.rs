//! DOM side of the draggable launcher button.
//!
//! All gesture decisions live in [`bapsimi_core::gesture::LauncherMachine`];
//! this module feeds it pointer/touch events and applies the visual state it
//! returns. Move and release listeners sit on the window (capture phase,
//! non-passive) so a drag keeps tracking when the pointer leaves the button,
//! and a capture-phase click listener on the button swallows the synthetic
//! click that trails a drag while the release guard is open.

use std::cell::RefCell;
use std::rc::Rc;

use bapsimi_core::gesture::{
    ButtonVisualState, Cursor, LauncherEffects, LauncherInput, LauncherMachine, RELEASE_GUARD_MS,
};
use bapsimi_core::geometry::Point;
use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use gloo::timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlElement, MouseEvent, TouchEvent};

use crate::dom;

pub(crate) struct LauncherController {
    _listeners: Vec<EventListener>,
    _shared: Rc<Shared>,
}

struct Shared {
    button: HtmlElement,
    machine: RefCell<LauncherMachine>,
    guard_timer: RefCell<Option<Timeout>>,
    on_activate: Box<dyn Fn()>,
}

/// Wires the controller to `#<button_id>`. Missing element means no
/// controller and no listeners at all.
pub(crate) fn attach_by_id(
    button_id: &str,
    on_activate: impl Fn() + 'static,
) -> Option<LauncherController> {
    let button = dom::html_by_id(button_id)?;
    Some(attach(button, on_activate))
}

pub(crate) fn attach(button: HtmlElement, on_activate: impl Fn() + 'static) -> LauncherController {
    let shared = Rc::new(Shared {
        button: button.clone(),
        machine: RefCell::new(LauncherMachine::new()),
        guard_timer: RefCell::new(None),
        on_activate: Box::new(on_activate),
    });
    let window = web_sys::window().expect("window available");
    let capture = EventListenerOptions {
        phase: EventListenerPhase::Capture,
        passive: false,
    };

    let mut listeners = Vec::new();

    let press_shared = shared.clone();
    listeners.push(EventListener::new(&button, "mousedown", move |event| {
        if let Some(event) = event.dyn_ref::<MouseEvent>() {
            on_press(&press_shared, mouse_point(event));
        }
    }));

    let touch_press_shared = shared.clone();
    listeners.push(EventListener::new_with_options(
        &button,
        "touchstart",
        capture,
        move |event| {
            if let Some(event) = event.dyn_ref::<TouchEvent>() {
                if let Some(pointer) = first_touch_point(event) {
                    on_press(&touch_press_shared, pointer);
                }
            }
        },
    ));

    let move_shared = shared.clone();
    listeners.push(EventListener::new_with_options(
        &window,
        "mousemove",
        capture,
        move |event| {
            if let Some(event) = event.dyn_ref::<MouseEvent>() {
                on_move(&move_shared, mouse_point(event), event);
            }
        },
    ));

    let touch_move_shared = shared.clone();
    listeners.push(EventListener::new_with_options(
        &window,
        "touchmove",
        capture,
        move |event| {
            if let Some(event) = event.dyn_ref::<TouchEvent>() {
                if let Some(pointer) = first_touch_point(event) {
                    on_move(&touch_move_shared, pointer, event);
                }
            }
        },
    ));

    for release_event in ["mouseup", "touchend", "touchcancel"] {
        let release_shared = shared.clone();
        listeners.push(EventListener::new_with_options(
            &window,
            release_event,
            capture,
            move |_event| {
                on_release(&release_shared);
            },
        ));
    }

    let click_shared = shared.clone();
    listeners.push(EventListener::new_with_options(
        &button,
        "click",
        capture,
        move |event| {
            if click_shared.machine.borrow().guard_active() {
                event.prevent_default();
                event.stop_propagation();
            }
        },
    ));

    LauncherController {
        _listeners: listeners,
        _shared: shared,
    }
}

fn mouse_point(event: &MouseEvent) -> Point {
    Point::new(event.client_x() as f64, event.client_y() as f64)
}

fn first_touch_point(event: &TouchEvent) -> Option<Point> {
    let touch = event.touches().item(0)?;
    Some(Point::new(touch.client_x() as f64, touch.client_y() as f64))
}

fn button_top_left(button: &HtmlElement) -> Point {
    let rect = button.get_bounding_client_rect();
    Point::new(rect.left(), rect.top())
}

fn on_press(shared: &Rc<Shared>, pointer: Point) {
    let effects = shared.machine.borrow_mut().handle(LauncherInput::Press {
        pointer,
        button_top_left: button_top_left(&shared.button),
        now_ms: dom::now_ms(),
    });
    apply_effects(shared, effects);
}

fn on_move(shared: &Rc<Shared>, pointer: Point, event: &Event) {
    let Some(viewport) = dom::viewport() else {
        return;
    };
    let effects = shared
        .machine
        .borrow_mut()
        .handle(LauncherInput::Move { pointer, viewport });
    // Once the button is moving under the finger, the page must not scroll.
    if effects.visual.is_some() {
        event.prevent_default();
    }
    apply_effects(shared, effects);
}

fn on_release(shared: &Rc<Shared>) {
    let Some(viewport) = dom::viewport() else {
        return;
    };
    let effects = shared.machine.borrow_mut().handle(LauncherInput::Release {
        button_top_left: button_top_left(&shared.button),
        viewport,
        now_ms: dom::now_ms(),
    });
    apply_effects(shared, effects);
}

fn apply_effects(shared: &Rc<Shared>, effects: LauncherEffects) {
    if let Some(visual) = effects.visual {
        render(&shared.button, &visual);
    }
    if effects.start_guard {
        let timer_shared = shared.clone();
        let timer = Timeout::new(RELEASE_GUARD_MS, move || {
            timer_shared.machine.borrow_mut().clear_guard();
            timer_shared.guard_timer.borrow_mut().take();
        });
        // Replacing a live timer cancels it; the newest release wins.
        *shared.guard_timer.borrow_mut() = Some(timer);
    }
    if effects.activate {
        (shared.on_activate)();
    }
}

fn render(button: &HtmlElement, visual: &ButtonVisualState) {
    let style = button.style();
    if let Some(position) = visual.position {
        let _ = style.set_property("position", "fixed");
        let _ = style.set_property("left", &format!("{}px", position.x));
        let _ = style.set_property("top", &format!("{}px", position.y));
        let _ = style.set_property("right", "auto");
        let _ = style.set_property("bottom", "auto");
    }
    if visual.transition {
        let _ = style.set_property("transition", "all 0.3s ease");
    } else {
        let _ = style.set_property("transition", "none");
    }
    match visual.cursor {
        Cursor::Grabbing => {
            let _ = style.set_property("cursor", "grabbing");
        }
        Cursor::Default => {
            let _ = style.remove_property("cursor");
        }
    }
}
