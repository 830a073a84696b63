//! Recipe-detail modal, fed by `/api/post/:id`.
//!
//! Detail buttons are created long after attach (search renders them per
//! query), so opening runs off a document-level delegated click. The review
//! section renders into the modal once the detail itself is up.

use std::cell::RefCell;
use std::rc::Rc;

use bapsimi_core::api::{LikeResponse, PostDetail};
use gloo::console;
use gloo::events::EventListener;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlElement, KeyboardEvent};

use crate::dom;
use crate::http;
use crate::review;
use crate::search;

pub(crate) struct DetailModal {
    _listeners: Vec<EventListener>,
    _shared: Rc<Shared>,
}

struct Shared {
    modal: HtmlElement,
    title: Option<HtmlElement>,
    body: Option<HtmlElement>,
    current: RefCell<Option<PostDetail>>,
    like_listener: RefCell<Option<EventListener>>,
}

pub(crate) fn attach() -> Option<DetailModal> {
    let modal = dom::html_by_id("detailModal")?;

    let shared = Rc::new(Shared {
        modal,
        title: dom::html_by_id("modalTitle"),
        body: dom::html_by_id("modalBody"),
        current: RefCell::new(None),
        like_listener: RefCell::new(None),
    });

    let mut listeners = Vec::new();
    let document = dom::document()?;

    let open_shared = shared.clone();
    listeners.push(EventListener::new(&document, "click", move |event| {
        let Some(button) = dom::target_with_class(event, "detail-btn") else {
            return;
        };
        let Some(post_id) = button.get_attribute("data-post-id") else {
            console::error!("detail button without a post id");
            return;
        };
        show(&open_shared, post_id);
    }));

    if let Some(close_btn) = dom::html_by_id("closeModal") {
        let close_shared = shared.clone();
        listeners.push(EventListener::new(&close_btn, "click", move |_| {
            close(&close_shared);
        }));
    }

    if let Ok(Some(backdrop)) = shared.modal.query_selector(".modal-backdrop") {
        let backdrop_shared = shared.clone();
        listeners.push(EventListener::new(&backdrop, "click", move |_| {
            close(&backdrop_shared);
        }));
    }

    let escape_shared = shared.clone();
    listeners.push(EventListener::new(&document, "keydown", move |event| {
        let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        if event.key() == "Escape" && escape_shared.modal.class_list().contains("show") {
            close(&escape_shared);
        }
    }));

    Some(DetailModal {
        _listeners: listeners,
        _shared: shared,
    })
}

fn show(shared: &Rc<Shared>, post_id: String) {
    open(shared);
    show_loading(shared);
    let task_shared = shared.clone();
    spawn_local(async move {
        match http::get_json::<PostDetail>(&format!("/api/post/{post_id}")).await {
            Ok(post) => {
                render(&task_shared, &post);
                *task_shared.current.borrow_mut() = Some(post);
            }
            Err(error) if error.status() == Some(401) => {
                show_error(&task_shared, "Please log in to view this recipe.");
            }
            Err(error) => {
                console::error!("post detail load failed", error.message());
                show_error(&task_shared, &error.message());
            }
        }
    });
}

fn open(shared: &Rc<Shared>) {
    let _ = shared.modal.style().set_property("display", "flex");
    let _ = shared.modal.class_list().add_1("show");
    set_body_scroll_locked(true);
}

fn close(shared: &Rc<Shared>) {
    let _ = shared.modal.style().set_property("display", "none");
    let _ = shared.modal.class_list().remove_1("show");
    set_body_scroll_locked(false);
    *shared.current.borrow_mut() = None;
    shared.like_listener.borrow_mut().take();
}

fn set_body_scroll_locked(locked: bool) {
    let Some(body) = dom::document().and_then(|document| document.body()) else {
        return;
    };
    let _ = body
        .style()
        .set_property("overflow", if locked { "hidden" } else { "auto" });
}

fn show_loading(shared: &Rc<Shared>) {
    if let Some(title) = shared.title.as_ref() {
        title.set_text_content(Some("Recipe detail"));
    }
    let Some(body) = shared.body.as_ref() else {
        return;
    };
    dom::clear_children(body);
    if let Some(row) = dom::create_text("div", "loading", "Fetching the recipe…") {
        dom::append(body, &row);
    }
}

fn show_error(shared: &Rc<Shared>, message: &str) {
    let Some(body) = shared.body.as_ref() else {
        return;
    };
    dom::clear_children(body);
    if let Some(row) = dom::create_text("div", "error", message) {
        dom::append(body, &row);
    }
}

fn render(shared: &Rc<Shared>, post: &PostDetail) {
    if let Some(title) = shared.title.as_ref() {
        title.set_text_content(Some(&post.title));
    }
    let Some(body) = shared.body.as_ref() else {
        return;
    };
    dom::clear_children(body);

    if let Some(image) = build_image(post) {
        dom::append(body, &image);
    }
    if let Some(meta) = build_meta(post) {
        dom::append(body, &meta);
    }
    if !post.desc.is_empty() {
        if let Some(section) = build_section("Description") {
            if let Some(text) = dom::create_text("div", "detail-description", &post.desc) {
                dom::append(&section, &text);
            }
            dom::append(body, &section);
        }
    }
    if !post.tags.is_empty() {
        if let Some(section) = build_section("Tags") {
            if let Some(tags) = dom::create("div", "tags") {
                for value in &post.tags {
                    if let Some(tag) = dom::create_text("span", "tag", &format!("#{value}")) {
                        dom::append(&tags, &tag);
                    }
                }
                dom::append(&section, &tags);
            }
            dom::append(body, &section);
        }
    }
    if let Some(section) = build_section(&format!("Ingredients ({})", post.ingredients.len())) {
        if let Some(list) = build_ingredients(post) {
            dom::append(&section, &list);
        }
        dom::append(body, &section);
    }
    if let Some(section) = build_section(&format!("Steps ({})", post.steps.len())) {
        if let Some(list) = build_steps(post) {
            dom::append(&section, &list);
        }
        dom::append(body, &section);
    }
    if let Some(footer) = build_footer(shared, post) {
        dom::append(body, &footer);
    }

    // The review block loads its own data; it lives at the bottom of the
    // modal and refreshes itself on submit/delete.
    if let Some(container) = dom::create("div", "review-container") {
        dom::append(body, &container);
        review::render_section(&post.id, &container);
    }
}

fn build_image(post: &PostDetail) -> Option<HtmlElement> {
    match post.image_url.as_deref() {
        Some(url) if !url.is_empty() => {
            let image = dom::create("img", "detail-image-auto")?;
            let _ = image.set_attribute("src", url);
            let _ = image.set_attribute("alt", &post.title);
            Some(image)
        }
        _ => dom::create_text("div", "detail-image-auto detail-image-placeholder", "🍽️"),
    }
}

fn build_meta(post: &PostDetail) -> Option<HtmlElement> {
    let meta = dom::create("div", "detail-meta")?;
    let servings = post
        .servings
        .map(|count| format!("{count} servings"))
        .unwrap_or_else(|| "-".to_string());
    let time = post
        .time_minutes
        .map(|minutes| format!("{minutes} min"))
        .unwrap_or_else(|| "-".to_string());
    let rows = [
        ("Servings", servings),
        ("Time", time),
        ("Level", post.level.clone().unwrap_or_else(|| "-".to_string())),
        (
            "Category",
            post.category.clone().unwrap_or_else(|| "-".to_string()),
        ),
    ];
    for (label, value) in rows {
        let Some(item) = dom::create("div", "detail-meta-item") else {
            continue;
        };
        if let Some(label) = dom::create_text("div", "detail-meta-label", label) {
            dom::append(&item, &label);
        }
        if let Some(value) = dom::create_text("div", "detail-meta-value", &value) {
            dom::append(&item, &value);
        }
        dom::append(&meta, &item);
    }
    Some(meta)
}

fn build_section(heading: &str) -> Option<HtmlElement> {
    let section = dom::create("div", "detail-section")?;
    if let Some(title) = dom::create_text("h3", "", heading) {
        dom::append(&section, &title);
    }
    Some(section)
}

fn build_ingredients(post: &PostDetail) -> Option<HtmlElement> {
    if post.ingredients.is_empty() {
        return dom::create_text("p", "detail-empty", "No ingredient information.");
    }
    let list = dom::create("ul", "ingredients-list")?;
    for ingredient in &post.ingredients {
        if let Some(item) = dom::create_text("li", "", ingredient) {
            dom::append(&list, &item);
        }
    }
    Some(list)
}

fn build_steps(post: &PostDetail) -> Option<HtmlElement> {
    if post.steps.is_empty() {
        return dom::create_text("p", "detail-empty", "No step information.");
    }
    let list = dom::create("ol", "steps-list")?;
    for (index, step) in post.steps.iter().enumerate() {
        let Some(item) = dom::create("li", "step-item") else {
            continue;
        };
        if let Some(number) = dom::create_text("div", "step-number", &(index + 1).to_string()) {
            dom::append(&item, &number);
        }
        if let Some(content) = dom::create("div", "step-content") {
            if let Some(text) = dom::create_text("div", "step-text", step.text()) {
                dom::append(&content, &text);
            }
            if let Some(minutes) = step.minutes() {
                if let Some(time) =
                    dom::create_text("div", "step-time", &format!("{minutes} min"))
                {
                    dom::append(&content, &time);
                }
            }
            dom::append(&item, &content);
        }
        dom::append(&list, &item);
    }
    Some(list)
}

fn build_footer(shared: &Rc<Shared>, post: &PostDetail) -> Option<HtmlElement> {
    let footer = dom::create("div", "detail-footer")?;
    let author = if post.author_name.is_empty() {
        "anonymous".to_string()
    } else {
        post.author_name.clone()
    };
    let byline = match post.created_at.as_ref() {
        Some(at) => format!("by {author} • {}", at.display_date()),
        None => format!("by {author}"),
    };
    if let Some(info) = dom::create_text("div", "detail-author-info", &byline) {
        dom::append(&footer, &info);
    }

    let like_class = if post.user_liked {
        "detail-like-btn liked"
    } else {
        "detail-like-btn"
    };
    let like_btn = dom::create_text("button", like_class, &search::like_label(post.likes))?;
    let like_shared = shared.clone();
    let post_id = post.id.clone();
    let listener = EventListener::new(&like_btn, "click", move |_| {
        handle_like(&like_shared, post_id.clone());
    });
    *shared.like_listener.borrow_mut() = Some(listener);
    dom::append(&footer, &like_btn);
    Some(footer)
}

fn handle_like(shared: &Rc<Shared>, post_id: String) {
    let task_shared = shared.clone();
    spawn_local(async move {
        match http::post_empty::<LikeResponse>(&format!("/api/post/{post_id}/like")).await {
            Ok(response) if response.success => {
                update_like_button(&task_shared, &response);
                search::sync_like_buttons(&post_id, response.likes);
                if let Some(current) = task_shared.current.borrow_mut().as_mut() {
                    current.likes = response.likes;
                    current.user_liked = response.user_liked;
                }
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

fn update_like_button(shared: &Rc<Shared>, response: &LikeResponse) {
    let Some(body) = shared.body.as_ref() else {
        return;
    };
    let Ok(Some(button)) = body.query_selector(".detail-like-btn") else {
        return;
    };
    button.set_text_content(Some(&search::like_label(response.likes)));
    if response.user_liked {
        let _ = button.class_list().add_1("liked");
    } else {
        let _ = button.class_list().remove_1("liked");
    }
}
