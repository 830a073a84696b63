//! Page wiring. Every page ships the same bundle; which widgets come alive
//! is decided by which anchor elements the server rendered. A widget whose
//! anchor is missing costs one failed lookup and nothing else.

use std::cell::RefCell;

use gloo::console;
use gloo::events::EventListener;

use crate::chatbot::{self, ChatbotWidget};
use crate::dom;
use crate::mypage::{self, MypageWidget};
use crate::post_detail::{self, DetailModal};
use crate::post_form::{self, PostFormWidget};
use crate::review;
use crate::search::{self, SearchWidget};

#[derive(Default)]
struct PageWidgets {
    chatbot: Option<ChatbotWidget>,
    search: Option<SearchWidget>,
    detail: Option<DetailModal>,
    mypage: Option<MypageWidget>,
    post_form: Option<PostFormWidget>,
}

thread_local! {
    static WIDGETS: RefCell<PageWidgets> = RefCell::new(PageWidgets::default());
    static DOM_READY: RefCell<Option<EventListener>> = RefCell::new(None);
}

pub(crate) fn init() {
    let Some(document) = dom::document() else {
        return;
    };
    if document.ready_state() == "loading" {
        let listener = EventListener::once(&document, "DOMContentLoaded", |_| {
            attach_widgets();
        });
        DOM_READY.with(|slot| {
            *slot.borrow_mut() = Some(listener);
        });
    } else {
        attach_widgets();
    }
}

fn attach_widgets() {
    // The review block renders inside the detail modal, so its delegation
    // has to exist before the first modal opens.
    review::init();

    let widgets = PageWidgets {
        chatbot: chatbot::attach(),
        search: search::attach(),
        detail: post_detail::attach(),
        mypage: mypage::attach(),
        post_form: post_form::attach(),
    };

    let attached: Vec<&str> = [
        ("chatbot", widgets.chatbot.is_some()),
        ("search", widgets.search.is_some()),
        ("post-detail", widgets.detail.is_some()),
        ("mypage", widgets.mypage.is_some()),
        ("post-form", widgets.post_form.is_some()),
    ]
    .iter()
    .filter_map(|(name, present)| present.then_some(*name))
    .collect();
    console::log!("bapsimi attached", attached.join(", "));

    WIDGETS.with(|slot| {
        *slot.borrow_mut() = widgets;
    });
}
