//! Thin lookup and construction helpers over `web_sys`.
//!
//! Every page element this crate touches is server-rendered and may be
//! missing on any given page, so lookups return `Option` and callers no-op
//! when an anchor element is absent.

use bapsimi_core::geometry::Viewport;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, HtmlElement, HtmlInputElement, HtmlTextAreaElement, Window,
};

pub(crate) fn window() -> Option<Window> {
    web_sys::window()
}

pub(crate) fn document() -> Option<Document> {
    web_sys::window()?.document()
}

pub(crate) fn element_by_id(id: &str) -> Option<Element> {
    document()?.get_element_by_id(id)
}

pub(crate) fn html_by_id(id: &str) -> Option<HtmlElement> {
    element_by_id(id)?.dyn_into::<HtmlElement>().ok()
}

pub(crate) fn input_by_id(id: &str) -> Option<HtmlInputElement> {
    element_by_id(id)?.dyn_into::<HtmlInputElement>().ok()
}

pub(crate) fn textarea_by_id(id: &str) -> Option<HtmlTextAreaElement> {
    element_by_id(id)?.dyn_into::<HtmlTextAreaElement>().ok()
}

pub(crate) fn query_all(selector: &str) -> Vec<Element> {
    let Some(document) = document() else {
        return Vec::new();
    };
    let Ok(nodes) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    let mut elements = Vec::with_capacity(nodes.length() as usize);
    for index in 0..nodes.length() {
        if let Some(element) = nodes
            .item(index)
            .and_then(|node| node.dyn_into::<Element>().ok())
        {
            elements.push(element);
        }
    }
    elements
}

pub(crate) fn create(tag: &str, class: &str) -> Option<HtmlElement> {
    let element = document()?.create_element(tag).ok()?;
    if !class.is_empty() {
        element.set_class_name(class);
    }
    element.dyn_into::<HtmlElement>().ok()
}

pub(crate) fn create_text(tag: &str, class: &str, text: &str) -> Option<HtmlElement> {
    let element = create(tag, class)?;
    element.set_text_content(Some(text));
    Some(element)
}

pub(crate) fn clear_children(element: &Element) {
    element.set_text_content(None);
}

pub(crate) fn append(parent: &Element, child: &Element) {
    let _ = parent.append_child(child);
}

/// The element an event fired on, when it is an element at all.
pub(crate) fn event_target(event: &Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

/// Delegation guard: the event target itself carrying `class`.
pub(crate) fn target_with_class(event: &Event, class: &str) -> Option<Element> {
    let element = event_target(event)?;
    if element.class_list().contains(class) {
        Some(element)
    } else {
        None
    }
}

pub(crate) fn viewport() -> Option<Viewport> {
    let window = window()?;
    let width = window.inner_width().ok()?.as_f64()?;
    let height = window.inner_height().ok()?.as_f64()?;
    Some(Viewport::new(width, height))
}

pub(crate) fn now_ms() -> f64 {
    js_sys::Date::now()
}

pub(crate) fn alert(message: &str) {
    if let Some(window) = window() {
        let _ = window.alert_with_message(message);
    }
}

pub(crate) fn confirm(message: &str) -> bool {
    window()
        .and_then(|window| window.confirm_with_message(message).ok())
        .unwrap_or(false)
}

pub(crate) fn navigate(url: &str) {
    let Some(window) = window() else {
        return;
    };
    let _ = window.location().set_href(url);
}
