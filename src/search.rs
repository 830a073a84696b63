//! Search/results page: query form, sort tabs, result cards, and the TOP-10
//! rail, all over `/api/search` and `/api/top10`.

use std::cell::RefCell;
use std::rc::Rc;

use bapsimi_core::api::{LikeResponse, SearchResponse, Top10Response};
use gloo::console;
use gloo::events::EventListener;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlElement;

use crate::dom;
use crate::http;

pub(crate) const SORT_LIKES: &str = "likes";

pub(crate) struct SearchWidget {
    _listeners: Vec<EventListener>,
    _shared: Rc<Shared>,
}

struct Shared {
    heading: Option<HtmlElement>,
    input: Option<web_sys::HtmlInputElement>,
    result_list: Option<HtmlElement>,
    rank_list: Option<HtmlElement>,
    empty: Option<HtmlElement>,
    current_query: RefCell<String>,
    current_sort: RefCell<String>,
}

pub(crate) fn attach() -> Option<SearchWidget> {
    let form = dom::html_by_id("searchForm")?;

    let shared = Rc::new(Shared {
        heading: dom::html_by_id("queryText"),
        input: dom::input_by_id("q"),
        result_list: dom::html_by_id("resultList"),
        rank_list: dom::html_by_id("rankList"),
        empty: dom::html_by_id("empty"),
        current_query: RefCell::new(String::new()),
        current_sort: RefCell::new(SORT_LIKES.to_string()),
    });

    let mut listeners = Vec::new();

    let submit_shared = shared.clone();
    listeners.push(EventListener::new(&form, "submit", move |event| {
        event.prevent_default();
        let Some(input) = submit_shared.input.as_ref() else {
            return;
        };
        let query = input.value().trim().to_string();
        if query.is_empty() {
            return;
        }
        *submit_shared.current_query.borrow_mut() = query.clone();
        set_heading(&submit_shared, &query);
        push_query_url(&query);
        run_search(&submit_shared);
    }));

    for tab in dom::query_all(".tab") {
        let tab_shared = shared.clone();
        let tab_element = tab.clone();
        listeners.push(EventListener::new(&tab, "click", move |_| {
            for other in dom::query_all(".tab") {
                let _ = other.set_attribute("aria-selected", "false");
            }
            let _ = tab_element.set_attribute("aria-selected", "true");
            let sort = tab_element
                .get_attribute("data-sort")
                .unwrap_or_else(|| SORT_LIKES.to_string());
            *tab_shared.current_sort.borrow_mut() = sort;
            if !tab_shared.current_query.borrow().is_empty() {
                run_search(&tab_shared);
            }
        }));
    }

    if let Some(fab) = dom::html_by_id("fabAdd") {
        listeners.push(EventListener::new(&fab, "click", move |_| {
            dom::navigate("/post");
        }));
    }

    // Like buttons are created per result card; one delegated listener
    // covers every render.
    if let Some(document) = dom::document() {
        listeners.push(EventListener::new(&document, "click", move |event| {
            let Some(button) = dom::target_with_class(event, "like-btn") else {
                return;
            };
            let Some(post_id) = button.get_attribute("data-post-id") else {
                return;
            };
            spawn_like(post_id);
        }));
    }

    // A shared link can land here with the query already in the URL.
    if let Some(initial) = initial_query() {
        *shared.current_query.borrow_mut() = initial.clone();
        if let Some(input) = shared.input.as_ref() {
            input.set_value(&initial);
        }
        set_heading(&shared, &initial);
        run_search(&shared);
    }

    load_top10(&shared);

    Some(SearchWidget {
        _listeners: listeners,
        _shared: shared,
    })
}

fn initial_query() -> Option<String> {
    let window = dom::window()?;
    let search = window.location().search().ok()?;
    let params = web_sys::UrlSearchParams::new_with_str(&search).ok()?;
    let query = params.get("q")?;
    let query = query.trim().to_string();
    if query.is_empty() {
        None
    } else {
        Some(query)
    }
}

fn set_heading(shared: &Rc<Shared>, query: &str) {
    if let Some(heading) = shared.heading.as_ref() {
        heading.set_text_content(Some(&format!("Results for \"{query}\"")));
    }
}

fn push_query_url(query: &str) {
    let Some(window) = dom::window() else {
        return;
    };
    let path = window.location().pathname().unwrap_or_default();
    let encoded = String::from(js_sys::encode_uri_component(query));
    let next = format!("{path}?q={encoded}");
    if let Ok(history) = window.history() {
        let _ = history.push_state_with_url(&JsValue::NULL, "", Some(&next));
    }
}

pub(crate) fn search_path(query: &str, sort: &str) -> String {
    let encoded = String::from(js_sys::encode_uri_component(query));
    format!("/api/search?q={encoded}&sort={sort}")
}

fn run_search(shared: &Rc<Shared>) {
    let query = shared.current_query.borrow().clone();
    let sort = shared.current_sort.borrow().clone();
    show_loading(shared);
    let task_shared = shared.clone();
    spawn_local(async move {
        match http::get_json::<SearchResponse>(&search_path(&query, &sort)).await {
            Ok(response) if response.success => {
                display_results(&task_shared, &response);
            }
            Ok(response) => {
                let message = response
                    .error
                    .unwrap_or_else(|| "Something went wrong while searching.".to_string());
                show_error(&task_shared, &message);
            }
            Err(error) => {
                console::error!("search failed", error.message());
                show_error(&task_shared, &error.message());
            }
        }
    });
}

fn load_top10(shared: &Rc<Shared>) {
    if shared.rank_list.is_none() {
        return;
    }
    let task_shared = shared.clone();
    spawn_local(async move {
        match http::get_json::<Top10Response>("/api/top10").await {
            Ok(response) if response.success => display_top10(&task_shared, &response),
            Ok(_) => {}
            Err(error) => {
                console::error!("top10 load failed", error.message());
            }
        }
    });
}

fn show_loading(shared: &Rc<Shared>) {
    let Some(list) = shared.result_list.as_ref() else {
        return;
    };
    dom::clear_children(list);
    if let Some(row) = dom::create_text("div", "loading", "Searching…") {
        dom::append(list, &row);
    }
    hide_empty(shared, true);
}

fn show_error(shared: &Rc<Shared>, message: &str) {
    let Some(list) = shared.result_list.as_ref() else {
        return;
    };
    dom::clear_children(list);
    if let Some(row) = dom::create_text("div", "error", message) {
        dom::append(list, &row);
    }
    hide_empty(shared, true);
}

fn hide_empty(shared: &Rc<Shared>, hidden: bool) {
    if let Some(empty) = shared.empty.as_ref() {
        empty.set_hidden(hidden);
    }
}

fn display_results(shared: &Rc<Shared>, response: &SearchResponse) {
    let Some(list) = shared.result_list.as_ref() else {
        return;
    };
    dom::clear_children(list);
    if response.results.is_empty() {
        hide_empty(shared, false);
        return;
    }
    hide_empty(shared, true);
    for post in &response.results {
        if let Some(card) = build_card(post) {
            dom::append(list, &card);
        }
    }
}

fn build_card(post: &bapsimi_core::api::PostSummary) -> Option<HtmlElement> {
    let card = dom::create("div", "card")?;

    let content = dom::create("div", "card-content")?;
    if let Some(title) = dom::create_text("div", "title", &post.title) {
        dom::append(&content, &title);
    }

    let meta = dom::create("div", "meta")?;
    let date = post
        .created_at
        .as_ref()
        .map(|at| at.display_date().to_string())
        .unwrap_or_default();
    for (class, value) in [
        ("author", post.author_name.clone()),
        ("date", date),
        ("time", format!("{} min", post.time_minutes)),
        ("level", post.level.clone()),
    ] {
        if let Some(span) = dom::create_text("span", class, &value) {
            dom::append(&meta, &span);
        }
    }
    dom::append(&content, &meta);

    let tags = dom::create("div", "tags")?;
    if let Some(tag) = dom::create_text("span", "tag", &post.category) {
        dom::append(&tags, &tag);
    }
    for value in &post.tags {
        if let Some(tag) = dom::create_text("span", "tag", value) {
            dom::append(&tags, &tag);
        }
    }
    dom::append(&content, &tags);
    dom::append(&card, &content);

    let actions = dom::create("div", "actions")?;
    if let Some(detail) = dom::create_text("button", "detail-btn", "Details") {
        let _ = detail.set_attribute("data-post-id", &post.id);
        dom::append(&actions, &detail);
    }
    if let Some(like) = dom::create_text("button", "like-btn", &like_label(post.likes)) {
        let _ = like.set_attribute("data-post-id", &post.id);
        dom::append(&actions, &like);
    }
    dom::append(&card, &actions);

    Some(card)
}

fn display_top10(shared: &Rc<Shared>, response: &Top10Response) {
    let Some(rank_list) = shared.rank_list.as_ref() else {
        return;
    };
    dom::clear_children(rank_list);
    for (index, entry) in response.results.iter().enumerate() {
        let Some(item) = dom::create("li", "") else {
            continue;
        };
        if let Some(left) = dom::create("div", "r-left") {
            if let Some(badge) = dom::create_text("div", "badge", &(index + 1).to_string()) {
                dom::append(&left, &badge);
            }
            if let Some(name) = dom::create_text("div", "r-name", &entry.title) {
                dom::append(&left, &name);
            }
            dom::append(&item, &left);
        }
        if let Some(likes) = dom::create_text("div", "r-like", &like_label(entry.likes)) {
            dom::append(&item, &likes);
        }
        dom::append(rank_list, &item);
    }
}

pub(crate) fn like_label(likes: u32) -> String {
    format!("❤️ {likes}")
}

/// Fires the like toggle and refreshes every button showing this post.
/// Shared by the result cards and the detail modal.
pub(crate) fn spawn_like(post_id: String) {
    spawn_local(async move {
        match http::post_empty::<LikeResponse>(&format!("/api/post/{post_id}/like")).await {
            Ok(response) if response.success => {
                sync_like_buttons(&post_id, response.likes);
            }
            Ok(response) => {
                dom::alert(
                    &response
                        .error
                        .unwrap_or_else(|| "Could not update the like.".to_string()),
                );
            }
            Err(error) if error.status() == Some(401) => {
                dom::alert("Please log in first.");
                dom::navigate("/login");
            }
            Err(error) => {
                console::error!("like failed", error.message());
                dom::alert(&error.message());
            }
        }
    });
}

/// Rewrites the count on every like button bound to `post_id`, wherever the
/// card lives (results list, rank rail, detail modal).
pub(crate) fn sync_like_buttons(post_id: &str, likes: u32) {
    let selector = format!(".like-btn[data-post-id=\"{post_id}\"]");
    for button in dom::query_all(&selector) {
        button.set_text_content(Some(&like_label(likes)));
    }
}
