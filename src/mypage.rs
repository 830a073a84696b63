//! Personal page: the my-recipes / liked-recipes tab pair.
//!
//! Each list loads once, on first display; switching back to an already
//! loaded tab is pure class shuffling. Card action buttons (delete own
//! recipe, unlike a saved one) re-fetch their list after the server
//! confirms.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use bapsimi_core::api::{Ack, RecipeCard, RecipeListResponse};
use gloo::console;
use gloo::events::EventListener;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlElement;

use crate::dom;
use crate::http;

#[derive(Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Mine,
    Liked,
}

impl ListKind {
    fn endpoint(self) -> &'static str {
        match self {
            ListKind::Mine => "/api/my-recipes",
            ListKind::Liked => "/api/liked-recipes",
        }
    }

    fn load_error(self) -> &'static str {
        match self {
            ListKind::Mine => "Could not load your recipes.",
            ListKind::Liked => "Could not load your liked recipes.",
        }
    }
}

pub(crate) struct MypageWidget {
    _listeners: Vec<EventListener>,
    _shared: Rc<Shared>,
}

struct Shared {
    my_list: HtmlElement,
    liked_list: Option<HtmlElement>,
    my_loaded: Cell<bool>,
    liked_loaded: Cell<bool>,
    // Replaced wholesale on each render; dropping the old vec unbinds the
    // previous cards' listeners.
    my_card_listeners: RefCell<Vec<EventListener>>,
    liked_card_listeners: RefCell<Vec<EventListener>>,
}

pub(crate) fn attach() -> Option<MypageWidget> {
    let my_list = dom::html_by_id("myRecipesList")?;

    let shared = Rc::new(Shared {
        my_list,
        liked_list: dom::html_by_id("likedRecipesList"),
        my_loaded: Cell::new(false),
        liked_loaded: Cell::new(false),
        my_card_listeners: RefCell::new(Vec::new()),
        liked_card_listeners: RefCell::new(Vec::new()),
    });

    let mut listeners = Vec::new();
    for tab in dom::query_all(".tab") {
        let tab_shared = shared.clone();
        let tab_element = tab.clone();
        listeners.push(EventListener::new(&tab, "click", move |_| {
            let Some(target) = tab_element.get_attribute("data-tab") else {
                return;
            };
            for other in dom::query_all(".tab") {
                let _ = other.class_list().remove_1("active");
            }
            let _ = tab_element.class_list().add_1("active");
            for panel in dom::query_all(".tab-panel") {
                let _ = panel.class_list().remove_1("active");
            }
            if let Some(panel) = dom::element_by_id(&target) {
                let _ = panel.class_list().add_1("active");
            }
            match target.as_str() {
                "my-recipes" if !tab_shared.my_loaded.get() => {
                    load_list(&tab_shared, ListKind::Mine);
                }
                "liked-recipes" if !tab_shared.liked_loaded.get() => {
                    load_list(&tab_shared, ListKind::Liked);
                }
                _ => {}
            }
        }));
    }

    load_list(&shared, ListKind::Mine);

    Some(MypageWidget {
        _listeners: listeners,
        _shared: shared,
    })
}

fn list_element(shared: &Rc<Shared>, kind: ListKind) -> Option<HtmlElement> {
    match kind {
        ListKind::Mine => Some(shared.my_list.clone()),
        ListKind::Liked => shared.liked_list.clone(),
    }
}

fn load_list(shared: &Rc<Shared>, kind: ListKind) {
    let Some(container) = list_element(shared, kind) else {
        return;
    };
    let task_shared = shared.clone();
    spawn_local(async move {
        match http::get_json::<RecipeListResponse>(kind.endpoint()).await {
            Ok(response) if response.success => {
                match kind {
                    ListKind::Mine => task_shared.my_loaded.set(true),
                    ListKind::Liked => task_shared.liked_loaded.set(true),
                }
                render_list(&task_shared, kind, &container, &response.recipes);
            }
            Ok(response) => {
                let message = response
                    .error
                    .unwrap_or_else(|| kind.load_error().to_string());
                show_error(&container, &message);
            }
            Err(error) => {
                console::error!("recipe list load failed", error.message());
                show_error(&container, "A network error occurred.");
            }
        }
    });
}

fn render_list(
    shared: &Rc<Shared>,
    kind: ListKind,
    container: &HtmlElement,
    recipes: &[RecipeCard],
) {
    dom::clear_children(container);
    let mut card_listeners = Vec::new();

    if recipes.is_empty() {
        show_empty(container, kind);
    } else {
        for recipe in recipes {
            if let Some(card) = build_card(shared, kind, recipe, &mut card_listeners) {
                dom::append(container, &card);
            }
        }
    }

    match kind {
        ListKind::Mine => *shared.my_card_listeners.borrow_mut() = card_listeners,
        ListKind::Liked => *shared.liked_card_listeners.borrow_mut() = card_listeners,
    }
}

fn build_card(
    shared: &Rc<Shared>,
    kind: ListKind,
    recipe: &RecipeCard,
    card_listeners: &mut Vec<EventListener>,
) -> Option<HtmlElement> {
    let card = dom::create("div", "recipe-card")?;

    let image = dom::create("div", "recipe-image")?;
    match recipe.image_url.as_deref() {
        Some(url) if !url.is_empty() => {
            if let Some(img) = dom::create("img", "") {
                let _ = img.set_attribute("src", url);
                let _ = img.set_attribute("alt", &recipe.title);
                let fallback = image.clone();
                card_listeners.push(EventListener::new(&img, "error", move |_| {
                    fallback.set_text_content(Some("🍽️"));
                }));
                dom::append(&image, &img);
            }
        }
        _ => image.set_text_content(Some("🍽️")),
    }
    dom::append(&card, &image);

    let info = dom::create("div", "recipe-info")?;
    if let Some(title) = dom::create_text("div", "recipe-title", &recipe.title) {
        dom::append(&info, &title);
    }
    let meta = dom::create("div", "recipe-meta")?;
    let category = recipe.category.clone().unwrap_or_else(|| "other".to_string());
    if let Some(span) = dom::create_text("span", "recipe-category", &category) {
        dom::append(&meta, &span);
    }
    if let Some(likes) = dom::create_text(
        "div",
        "recipe-likes",
        &crate::search::like_label(recipe.likes),
    ) {
        dom::append(&meta, &likes);
    }
    dom::append(&info, &meta);

    let subline = match kind {
        ListKind::Mine => recipe
            .created_at
            .as_ref()
            .map(|at| at.display_date().to_string()),
        ListKind::Liked => recipe
            .author_name
            .as_ref()
            .map(|author| format!("by {author}")),
    };
    if let Some(subline) = subline {
        if let Some(row) = dom::create_text("div", "recipe-subline", &subline) {
            dom::append(&info, &row);
        }
    }

    let actions = dom::create("div", "recipe-actions")?;
    match kind {
        ListKind::Mine => {
            if let Some(delete) = dom::create_text("button", "recipe-delete-btn", "Delete") {
                let delete_shared = shared.clone();
                let recipe_id = recipe.id.clone();
                card_listeners.push(EventListener::new(&delete, "click", move |event| {
                    event.stop_propagation();
                    delete_recipe(&delete_shared, recipe_id.clone());
                }));
                dom::append(&actions, &delete);
            }
        }
        ListKind::Liked => {
            if let Some(unlike) = dom::create_text("button", "recipe-unlike-btn", "Unlike") {
                let unlike_shared = shared.clone();
                let recipe_id = recipe.id.clone();
                card_listeners.push(EventListener::new(&unlike, "click", move |event| {
                    event.stop_propagation();
                    unlike_recipe(&unlike_shared, recipe_id.clone());
                }));
                dom::append(&actions, &unlike);
            }
        }
    }
    dom::append(&info, &actions);
    dom::append(&card, &info);

    let recipe_id = recipe.id.clone();
    card_listeners.push(EventListener::new(&card, "click", move |_| {
        dom::navigate(&format!("/search_result?q=&recipe_id={recipe_id}"));
    }));

    Some(card)
}

fn delete_recipe(shared: &Rc<Shared>, recipe_id: String) {
    if !dom::confirm("Delete this recipe? This cannot be undone.") {
        return;
    }
    let task_shared = shared.clone();
    spawn_local(async move {
        match http::delete_json::<Ack>(&format!("/api/delete-recipe/{recipe_id}")).await {
            Ok(ack) if ack.success => {
                task_shared.my_loaded.set(false);
                load_list(&task_shared, ListKind::Mine);
            }
            Ok(ack) => {
                dom::alert(
                    &ack.error
                        .unwrap_or_else(|| "Could not delete the recipe.".to_string()),
                );
            }
            Err(error) => {
                console::error!("recipe delete failed", error.message());
                dom::alert(&error.message());
            }
        }
    });
}

fn unlike_recipe(shared: &Rc<Shared>, recipe_id: String) {
    if !dom::confirm("Remove this recipe from your likes?") {
        return;
    }
    let task_shared = shared.clone();
    spawn_local(async move {
        match http::post_empty::<Ack>(&format!("/api/unlike-recipe/{recipe_id}")).await {
            Ok(ack) if ack.success => {
                task_shared.liked_loaded.set(false);
                load_list(&task_shared, ListKind::Liked);
            }
            Ok(ack) => {
                dom::alert(
                    &ack.error
                        .unwrap_or_else(|| "Could not remove the like.".to_string()),
                );
            }
            Err(error) => {
                console::error!("unlike failed", error.message());
                dom::alert(&error.message());
            }
        }
    });
}

fn show_empty(container: &HtmlElement, kind: ListKind) {
    let (icon, text, action, link) = match kind {
        ListKind::Mine => (
            "📝",
            "You have not written any recipes yet.",
            "Write your first recipe",
            "/post",
        ),
        ListKind::Liked => (
            "❤️",
            "You have not liked any recipes yet.",
            "Browse recipes",
            "/search_result?q=",
        ),
    };
    let Some(empty) = dom::create("div", "empty") else {
        return;
    };
    if let Some(row) = dom::create_text("div", "empty-icon", icon) {
        dom::append(&empty, &row);
    }
    if let Some(row) = dom::create_text("div", "empty-text", text) {
        dom::append(&empty, &row);
    }
    if let Some(anchor) = dom::create_text("a", "empty-action", action) {
        let _ = anchor.set_attribute("href", link);
        dom::append(&empty, &anchor);
    }
    dom::clear_children(container);
    dom::append(container, &empty);
}

fn show_error(container: &HtmlElement, message: &str) {
    dom::clear_children(container);
    let Some(empty) = dom::create("div", "empty") else {
        return;
    };
    if let Some(icon) = dom::create_text("div", "empty-icon", "⚠️") {
        dom::append(&empty, &icon);
    }
    if let Some(text) = dom::create_text("div", "empty-text", message) {
        dom::append(&empty, &text);
    }
    dom::append(container, &empty);
}
