//! Floating chat widget backed by `/api/chatbot`.
//!
//! The launcher button both toggles the panel (tap) and repositions itself
//! (drag); see [`crate::launcher`]. The panel, message list, input, and
//! typing indicator are server-rendered elements this module takes over.

use std::cell::Cell;
use std::rc::Rc;

use bapsimi_core::api::{ChatRequest, ChatReply, CHAT_MESSAGE_MAX_CHARS};
use gloo::console;
use gloo::events::EventListener;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlButtonElement, HtmlElement, HtmlInputElement, KeyboardEvent};

use crate::dom;
use crate::http;
use crate::launcher::{self, LauncherController};

const APOLOGY_LINE: &str = "Sorry, something went wrong. Please try again in a moment.";
const TOO_LONG_LINE: &str = "That message is too long (500 characters max).";

pub(crate) struct ChatbotWidget {
    _listeners: Vec<EventListener>,
    _launcher: Option<LauncherController>,
    _shared: Rc<Shared>,
}

struct Shared {
    panel: Option<HtmlElement>,
    messages: Option<HtmlElement>,
    input: Option<HtmlInputElement>,
    send_btn: Option<HtmlElement>,
    typing_indicator: Option<HtmlElement>,
    is_open: Cell<bool>,
    is_typing: Cell<bool>,
}

/// Attaches when `#chatbotButton` exists; every other element is optional
/// and individually degraded to a no-op.
pub(crate) fn attach() -> Option<ChatbotWidget> {
    dom::element_by_id("chatbotButton")?;

    let shared = Rc::new(Shared {
        panel: dom::html_by_id("chatbotWindow"),
        messages: dom::html_by_id("chatbotMessages"),
        input: dom::input_by_id("chatbotInput"),
        send_btn: dom::html_by_id("chatbotSend"),
        typing_indicator: dom::html_by_id("typingIndicator"),
        is_open: Cell::new(false),
        is_typing: Cell::new(false),
    });

    let toggle_shared = shared.clone();
    let launcher = launcher::attach_by_id("chatbotButton", move || {
        toggle(&toggle_shared);
    });

    let mut listeners = Vec::new();

    if let Some(close_btn) = dom::html_by_id("chatbotClose") {
        let close_shared = shared.clone();
        listeners.push(EventListener::new(&close_btn, "click", move |_| {
            close(&close_shared);
        }));
    }

    if let Some(send_btn) = shared.send_btn.as_ref() {
        let send_shared = shared.clone();
        listeners.push(EventListener::new(send_btn, "click", move |_| {
            send_message(&send_shared);
        }));
    }

    if let Some(input) = shared.input.as_ref() {
        let key_shared = shared.clone();
        listeners.push(EventListener::new(input, "keydown", move |event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            if event.key() == "Enter" && !event.shift_key() {
                event.prevent_default();
                send_message(&key_shared);
            }
        }));
    }

    Some(ChatbotWidget {
        _listeners: listeners,
        _launcher: launcher,
        _shared: shared,
    })
}

fn toggle(shared: &Rc<Shared>) {
    if shared.is_open.get() {
        close(shared);
    } else {
        open(shared);
    }
}

fn open(shared: &Rc<Shared>) {
    let Some(panel) = shared.panel.as_ref() else {
        return;
    };
    let _ = panel.class_list().add_1("open");
    shared.is_open.set(true);
    if let Some(input) = shared.input.as_ref() {
        let _ = input.focus();
    }
}

fn close(shared: &Rc<Shared>) {
    let Some(panel) = shared.panel.as_ref() else {
        return;
    };
    let _ = panel.class_list().remove_1("open");
    shared.is_open.set(false);
}

fn send_message(shared: &Rc<Shared>) {
    let Some(input) = shared.input.as_ref() else {
        return;
    };
    let message = input.value().trim().to_string();
    if message.is_empty() || shared.is_typing.get() {
        return;
    }

    append_message(shared, &message, "user");
    input.set_value("");

    if message.chars().count() > CHAT_MESSAGE_MAX_CHARS {
        append_message(shared, TOO_LONG_LINE, "bot");
        return;
    }

    set_typing(shared, true);
    let request_shared = shared.clone();
    spawn_local(async move {
        let reply = http::post_json::<ChatRequest, ChatReply>(
            "/api/chatbot",
            &ChatRequest { message },
        )
        .await;
        set_typing(&request_shared, false);
        match reply {
            Ok(reply) => match (reply.response, reply.error) {
                (Some(response), None) => append_message(&request_shared, &response, "bot"),
                (_, error) => {
                    console::error!("chatbot reply error", error.unwrap_or_default());
                    append_message(&request_shared, APOLOGY_LINE, "bot");
                }
            },
            Err(error) => {
                console::error!("chatbot request failed", error.message());
                append_message(&request_shared, APOLOGY_LINE, "bot");
            }
        }
    });
}

fn append_message(shared: &Rc<Shared>, text: &str, kind: &str) {
    let Some(messages) = shared.messages.as_ref() else {
        return;
    };
    if let Some(line) = dom::create_text("div", &format!("message {kind}"), text) {
        dom::append(messages, &line);
    }
    scroll_to_latest(messages);
}

fn set_typing(shared: &Rc<Shared>, typing: bool) {
    shared.is_typing.set(typing);
    if let Some(send_btn) = shared.send_btn.as_ref() {
        if let Some(button) = send_btn.dyn_ref::<HtmlButtonElement>() {
            button.set_disabled(typing);
        }
    }
    if let Some(indicator) = shared.typing_indicator.as_ref() {
        let _ = indicator
            .style()
            .set_property("display", if typing { "block" } else { "none" });
    }
    if typing {
        if let Some(messages) = shared.messages.as_ref() {
            scroll_to_latest(messages);
        }
    }
}

fn scroll_to_latest(messages: &HtmlElement) {
    messages.set_scroll_top(messages.scroll_height());
}
