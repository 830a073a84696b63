//! Recipe authoring form: token editors for tags/ingredients/steps, a
//! single-image preview, a live preview pane, local drafts, and submission
//! to `/api/post`.
//!
//! List state lives in the widget, not the DOM; every mutation re-renders
//! the affected list and the preview from that state.

use std::cell::RefCell;
use std::rc::Rc;

use bapsimi_core::api::{NewRecipe, NewRecipeResponse, RecipeStep};
use gloo::console;
use gloo::events::EventListener;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{FileReader, HtmlElement, HtmlImageElement, HtmlInputElement, KeyboardEvent};

use crate::dom;
use crate::drafts::{self, DraftBlob};
use crate::http;

pub(crate) struct PostFormWidget {
    _listeners: Vec<EventListener>,
    _shared: Rc<Shared>,
}

thread_local! {
    // The preview renderer runs from input listeners that have no widget
    // handle; it reads the live form state through this slot.
    static FORM_STATE: RefCell<Option<Rc<Shared>>> = RefCell::new(None);
}

struct Shared {
    tags: RefCell<Vec<String>>,
    ingredients: RefCell<Vec<String>>,
    steps: RefCell<Vec<RecipeStep>>,
    tag_listeners: RefCell<Vec<EventListener>>,
    ingredient_listeners: RefCell<Vec<EventListener>>,
    step_listeners: RefCell<Vec<EventListener>>,
    reader_listener: RefCell<Option<EventListener>>,
}

pub(crate) fn attach() -> Option<PostFormWidget> {
    let form = dom::html_by_id("recipeForm")?;

    let shared = Rc::new(Shared {
        tags: RefCell::new(Vec::new()),
        ingredients: RefCell::new(Vec::new()),
        steps: RefCell::new(Vec::new()),
        tag_listeners: RefCell::new(Vec::new()),
        ingredient_listeners: RefCell::new(Vec::new()),
        step_listeners: RefCell::new(Vec::new()),
        reader_listener: RefCell::new(None),
    });
    FORM_STATE.with(|slot| {
        *slot.borrow_mut() = Some(shared.clone());
    });

    let mut listeners = Vec::new();

    if let Some(add_tag) = dom::html_by_id("addTag") {
        let tag_shared = shared.clone();
        listeners.push(EventListener::new(&add_tag, "click", move |_| {
            take_tag_input(&tag_shared);
        }));
    }
    if let Some(tag_input) = dom::input_by_id("tagInput") {
        let tag_shared = shared.clone();
        listeners.push(EventListener::new(&tag_input, "keydown", move |event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            if event.key() == "Enter" || event.key() == "," {
                event.prevent_default();
                take_tag_input(&tag_shared);
            }
        }));
    }

    if let Some(add_ing) = dom::html_by_id("addIng") {
        let ing_shared = shared.clone();
        listeners.push(EventListener::new(&add_ing, "click", move |_| {
            take_ingredient_input(&ing_shared);
        }));
    }
    if let Some(ing_input) = dom::input_by_id("ingInput") {
        let ing_shared = shared.clone();
        listeners.push(EventListener::new(&ing_input, "keydown", move |event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            if event.key() == "Enter" {
                event.prevent_default();
                take_ingredient_input(&ing_shared);
            }
        }));
    }

    if let Some(add_step) = dom::html_by_id("addStep") {
        let step_shared = shared.clone();
        listeners.push(EventListener::new(&add_step, "click", move |_| {
            take_step_input(&step_shared);
        }));
    }
    if let Some(step_input) = dom::input_by_id("stepInput") {
        let step_shared = shared.clone();
        listeners.push(EventListener::new(&step_input, "keydown", move |event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            if event.key() == "Enter" {
                event.prevent_default();
                take_step_input(&step_shared);
            }
        }));
    }

    if let Some(image_input) = dom::input_by_id("image") {
        let image_shared = shared.clone();
        listeners.push(EventListener::new(&image_input, "change", move |event| {
            let Some(input) = dom::event_target(event)
                .and_then(|element| element.dyn_into::<HtmlInputElement>().ok())
            else {
                return;
            };
            handle_image_selection(&image_shared, &input);
        }));
    }

    for field in ["title", "servings", "time", "desc"] {
        if let Some(element) = dom::element_by_id(field) {
            listeners.push(EventListener::new(&element, "input", move |_| {
                render_preview();
            }));
        }
    }
    for field in ["level", "category"] {
        if let Some(element) = dom::element_by_id(field) {
            listeners.push(EventListener::new(&element, "change", move |_| {
                render_preview();
            }));
        }
    }

    if let Some(draft_btn) = dom::html_by_id("draftBtn") {
        let draft_shared = shared.clone();
        listeners.push(EventListener::new(&draft_btn, "click", move |_| {
            drafts::save(&collect_draft(&draft_shared));
            dom::alert("Draft saved.");
        }));
    }

    if let Some(preview_btn) = dom::html_by_id("previewBtn") {
        listeners.push(EventListener::new(&preview_btn, "click", move |_| {
            if let Some(preview) = dom::html_by_id("preview") {
                let _ = preview.style().set_property("display", "block");
            }
            render_preview();
        }));
    }

    if let Some(reset_btn) = dom::html_by_id("resetBtn") {
        let reset_shared = shared.clone();
        listeners.push(EventListener::new(&reset_btn, "click", move |_| {
            if dom::confirm("Clear the whole form?") {
                reset_form(&reset_shared);
            }
        }));
    }

    let submit_shared = shared.clone();
    listeners.push(EventListener::new(&form, "submit", move |event| {
        event.prevent_default();
        submit(&submit_shared);
    }));

    if let Some(draft) = drafts::load() {
        restore_draft(&shared, draft);
    }

    Some(PostFormWidget {
        _listeners: listeners,
        _shared: shared,
    })
}

fn field_value(id: &str) -> String {
    if let Some(input) = dom::input_by_id(id) {
        return input.value().trim().to_string();
    }
    if let Some(textarea) = dom::textarea_by_id(id) {
        return textarea.value().trim().to_string();
    }
    if let Some(select) = dom::element_by_id(id)
        .and_then(|element| element.dyn_into::<web_sys::HtmlSelectElement>().ok())
    {
        return select.value();
    }
    String::new()
}

fn set_field_value(id: &str, value: &str) {
    if let Some(input) = dom::input_by_id(id) {
        input.set_value(value);
        return;
    }
    if let Some(textarea) = dom::textarea_by_id(id) {
        textarea.set_value(value);
        return;
    }
    if let Some(select) = dom::element_by_id(id)
        .and_then(|element| element.dyn_into::<web_sys::HtmlSelectElement>().ok())
    {
        select.set_value(value);
    }
}

// ---------- tags ----------

fn take_tag_input(shared: &Rc<Shared>) {
    let Some(input) = dom::input_by_id("tagInput") else {
        return;
    };
    add_tags_from_text(shared, &input.value());
    input.set_value("");
    let _ = input.focus();
}

/// Splits on commas and newlines, trims, and drops duplicates.
fn add_tags_from_text(shared: &Rc<Shared>, text: &str) {
    let mut tags = shared.tags.borrow_mut();
    for raw in text.replace("\r\n", "\n").split([',', '\n']) {
        let value = raw.trim();
        if value.is_empty() || tags.iter().any(|existing| existing == value) {
            continue;
        }
        tags.push(value.to_string());
    }
    drop(tags);
    render_tags(shared);
    render_preview();
}

fn render_tags(shared: &Rc<Shared>) {
    let Some(list) = dom::html_by_id("tagList") else {
        return;
    };
    dom::clear_children(&list);
    let mut token_listeners = Vec::new();
    for (index, value) in shared.tags.borrow().iter().enumerate() {
        let Some(token) = dom::create("div", "token") else {
            continue;
        };
        if let Some(label) = dom::create_text("span", "", &format!("# {value}")) {
            dom::append(&token, &label);
        }
        if let Some(remove) = dom::create_text("button", "", "×") {
            let _ = remove.set_attribute("type", "button");
            let _ = remove.set_attribute("aria-label", "remove tag");
            let remove_shared = shared.clone();
            token_listeners.push(EventListener::new(&remove, "click", move |_| {
                let mut tags = remove_shared.tags.borrow_mut();
                if index < tags.len() {
                    tags.remove(index);
                }
                drop(tags);
                render_tags(&remove_shared);
                render_preview();
            }));
            dom::append(&token, &remove);
        }
        dom::append(&list, &token);
    }
    *shared.tag_listeners.borrow_mut() = token_listeners;
}

// ---------- ingredients ----------

fn take_ingredient_input(shared: &Rc<Shared>) {
    let Some(input) = dom::input_by_id("ingInput") else {
        return;
    };
    let value = input.value().trim().to_string();
    if !value.is_empty() {
        shared.ingredients.borrow_mut().push(value);
        render_ingredients(shared);
        render_preview();
    }
    input.set_value("");
    let _ = input.focus();
}

fn render_ingredients(shared: &Rc<Shared>) {
    let Some(list) = dom::html_by_id("ingList") else {
        return;
    };
    dom::clear_children(&list);
    let mut item_listeners = Vec::new();
    for (index, value) in shared.ingredients.borrow().iter().enumerate() {
        let Some(item) = build_list_item(value, None, shared, index, ListTarget::Ingredients, &mut item_listeners)
        else {
            continue;
        };
        dom::append(&list, &item);
    }
    *shared.ingredient_listeners.borrow_mut() = item_listeners;
}

// ---------- steps ----------

fn take_step_input(shared: &Rc<Shared>) {
    let Some(input) = dom::input_by_id("stepInput") else {
        return;
    };
    let text = input.value().trim().to_string();
    if !text.is_empty() {
        let minutes = dom::input_by_id("stepMin")
            .map(|field| field.value())
            .and_then(|value| value.trim().parse::<u32>().ok())
            .filter(|minutes| *minutes > 0);
        shared
            .steps
            .borrow_mut()
            .push(RecipeStep::Timed { text, min: minutes });
        render_steps(shared);
        render_preview();
    }
    input.set_value("");
    if let Some(minutes_field) = dom::input_by_id("stepMin") {
        minutes_field.set_value("");
    }
    let _ = input.focus();
}

fn render_steps(shared: &Rc<Shared>) {
    let Some(list) = dom::html_by_id("stepList") else {
        return;
    };
    dom::clear_children(&list);
    let mut item_listeners = Vec::new();
    for (index, step) in shared.steps.borrow().iter().enumerate() {
        let Some(item) = build_list_item(
            step.text(),
            step.minutes(),
            shared,
            index,
            ListTarget::Steps,
            &mut item_listeners,
        ) else {
            continue;
        };
        dom::append(&list, &item);
    }
    *shared.step_listeners.borrow_mut() = item_listeners;
}

#[derive(Clone, Copy)]
enum ListTarget {
    Ingredients,
    Steps,
}

fn build_list_item(
    text: &str,
    minutes: Option<u32>,
    shared: &Rc<Shared>,
    index: usize,
    target: ListTarget,
    item_listeners: &mut Vec<EventListener>,
) -> Option<HtmlElement> {
    let item = dom::create("div", "item")?;
    let label = match minutes {
        Some(minutes) => format!("{text} ({minutes} min)"),
        None => text.to_string(),
    };
    if let Some(body) = dom::create_text("div", "", &label) {
        dom::append(&item, &body);
    }
    let controls = dom::create("div", "controls")?;
    if let Some(remove) = dom::create_text("button", "btn small", "Remove") {
        let _ = remove.set_attribute("type", "button");
        let remove_shared = shared.clone();
        item_listeners.push(EventListener::new(&remove, "click", move |_| {
            match target {
                ListTarget::Ingredients => {
                    let mut ingredients = remove_shared.ingredients.borrow_mut();
                    if index < ingredients.len() {
                        ingredients.remove(index);
                    }
                    drop(ingredients);
                    render_ingredients(&remove_shared);
                }
                ListTarget::Steps => {
                    let mut steps = remove_shared.steps.borrow_mut();
                    if index < steps.len() {
                        steps.remove(index);
                    }
                    drop(steps);
                    render_steps(&remove_shared);
                }
            }
            render_preview();
        }));
        dom::append(&controls, &remove);
    }
    dom::append(&item, &controls);
    Some(item)
}

// ---------- image ----------

fn handle_image_selection(shared: &Rc<Shared>, input: &HtmlInputElement) {
    let file = input.files().and_then(|files| files.item(0));
    let Some(file) = file else {
        hide_image_preview();
        return;
    };
    if !file.type_().starts_with("image/") {
        dom::alert("Only image files can be uploaded.");
        input.set_value("");
        hide_image_preview();
        return;
    }
    let Ok(reader) = FileReader::new() else {
        return;
    };
    let listener = EventListener::new(&reader, "load", move |event| {
        let Some(reader) = event
            .target()
            .and_then(|target| target.dyn_into::<FileReader>().ok())
        else {
            return;
        };
        let Ok(result) = reader.result() else {
            return;
        };
        let Some(data_url) = result.as_string() else {
            return;
        };
        show_image_preview(&data_url);
    });
    if reader.read_as_data_url(&file).is_ok() {
        *shared.reader_listener.borrow_mut() = Some(listener);
    }
}

fn show_image_preview(data_url: &str) {
    if let Some(image) = dom::element_by_id("imagePreview")
        .and_then(|element| element.dyn_into::<HtmlImageElement>().ok())
    {
        image.set_src(data_url);
    }
    if let Some(section) = dom::html_by_id("imagePreviewSection") {
        let _ = section.style().set_property("display", "block");
    }
}

fn hide_image_preview() {
    if let Some(section) = dom::html_by_id("imagePreviewSection") {
        let _ = section.style().set_property("display", "none");
    }
    if let Some(image) = dom::element_by_id("imagePreview")
        .and_then(|element| element.dyn_into::<HtmlImageElement>().ok())
    {
        image.set_src("");
    }
}

// ---------- preview ----------

fn render_preview() {
    if let Some(title) = dom::html_by_id("pvTitle") {
        let value = field_value("title");
        title.set_text_content(Some(if value.is_empty() {
            "(untitled)"
        } else {
            &value
        }));
    }
    if let Some(meta) = dom::html_by_id("pvMeta") {
        let servings = field_value("servings");
        let time = field_value("time");
        let level = field_value("level");
        let category = field_value("category");
        meta.set_text_content(Some(&format!(
            "{} servings · {} min · {} · {}",
            or_dash(&servings),
            or_dash(&time),
            or_dash(&level),
            or_dash(&category),
        )));
    }

    let shared = FORM_STATE.with(|slot| slot.borrow().clone());
    let Some(shared) = shared else {
        return;
    };
    if let Some(tags) = dom::html_by_id("pvTags") {
        dom::clear_children(&tags);
        for value in shared.tags.borrow().iter() {
            if let Some(tag) = dom::create_text("span", "tag", &format!("#{value}")) {
                dom::append(&tags, &tag);
            }
        }
    }
    if let Some(ings) = dom::html_by_id("pvIngs") {
        dom::clear_children(&ings);
        for value in shared.ingredients.borrow().iter() {
            if let Some(item) = dom::create_text("li", "", value) {
                dom::append(&ings, &item);
            }
        }
    }
    if let Some(steps) = dom::html_by_id("pvSteps") {
        dom::clear_children(&steps);
        for step in shared.steps.borrow().iter() {
            let label = match step.minutes() {
                Some(minutes) => format!("{} ({minutes} min)", step.text()),
                None => step.text().to_string(),
            };
            if let Some(item) = dom::create_text("li", "", &label) {
                dom::append(&steps, &item);
            }
        }
    }
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

// ---------- drafts ----------

fn collect_draft(shared: &Rc<Shared>) -> DraftBlob {
    DraftBlob {
        title: field_value("title"),
        servings: field_value("servings"),
        time_minutes: field_value("time"),
        level: field_value("level"),
        category: field_value("category"),
        desc: field_value("desc"),
        tags: shared.tags.borrow().clone(),
        ingredients: shared.ingredients.borrow().clone(),
        steps: shared.steps.borrow().clone(),
        ..DraftBlob::new()
    }
}

fn restore_draft(shared: &Rc<Shared>, draft: DraftBlob) {
    set_field_value("title", &draft.title);
    set_field_value("servings", &draft.servings);
    set_field_value("time", &draft.time_minutes);
    set_field_value("level", &draft.level);
    set_field_value("category", &draft.category);
    set_field_value("desc", &draft.desc);
    *shared.tags.borrow_mut() = draft.tags;
    *shared.ingredients.borrow_mut() = draft.ingredients;
    *shared.steps.borrow_mut() = draft.steps;
    render_tags(shared);
    render_ingredients(shared);
    render_steps(shared);
    render_preview();
}

// ---------- reset & submit ----------

fn reset_form(shared: &Rc<Shared>) {
    for field in ["title", "servings", "time", "desc", "tagInput", "ingInput", "stepInput", "stepMin"] {
        set_field_value(field, "");
    }
    shared.tags.borrow_mut().clear();
    shared.ingredients.borrow_mut().clear();
    shared.steps.borrow_mut().clear();
    if let Some(input) = dom::input_by_id("image") {
        input.set_value("");
    }
    hide_image_preview();
    render_tags(shared);
    render_ingredients(shared);
    render_steps(shared);
    render_preview();
}

fn submit(shared: &Rc<Shared>) {
    let title = field_value("title");
    if title.is_empty() {
        dom::alert("Please enter a title.");
        return;
    }
    if shared.ingredients.borrow().is_empty() {
        dom::alert("Please add at least one ingredient.");
        return;
    }
    if shared.steps.borrow().is_empty() {
        dom::alert("Please add at least one step.");
        return;
    }

    let recipe = NewRecipe {
        title,
        servings: field_value("servings").parse().unwrap_or(1),
        time_minutes: field_value("time").parse().unwrap_or(0),
        level: field_value("level"),
        category: field_value("category"),
        desc: field_value("desc"),
        tags: shared.tags.borrow().clone(),
        ingredients: shared.ingredients.borrow().clone(),
        steps: shared.steps.borrow().clone(),
    };

    spawn_local(async move {
        match http::post_json::<NewRecipe, NewRecipeResponse>("/api/post", &recipe).await {
            Ok(response) if response.success => {
                drafts::clear();
                match response.id {
                    Some(id) => dom::navigate(&format!("/search_result?q=&recipe_id={id}")),
                    None => dom::navigate("/mypage"),
                }
            }
            Ok(response) => {
                dom::alert(
                    &response
                        .error
                        .unwrap_or_else(|| "Could not publish the recipe.".to_string()),
                );
            }
            Err(error) if error.status() == Some(401) => {
                dom::alert("Please log in first.");
                dom::navigate("/login");
            }
            Err(error) => {
                console::error!("recipe submit failed", error.message());
                dom::alert(&error.message());
            }
        }
    });
}
