//! Star-rating review block inside the detail modal.
//!
//! The whole section is thrown away and rebuilt from the server after every
//! successful submit or delete, so the list, the stats header, and the form
//! can never drift apart. Clicks are delegated at the document level because
//! of that rebuild cycle.

use std::cell::RefCell;
use std::rc::Rc;

use bapsimi_core::api::{
    Ack, MyReview, MyReviewResponse, ReviewListResponse, ReviewSubmit, REVIEW_COMMENT_MAX_CHARS,
    REVIEW_MAX_STARS,
};
use gloo::console;
use gloo::events::EventListener;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, HtmlElement, HtmlTextAreaElement};

use crate::dom;
use crate::http;

thread_local! {
    static REVIEW: RefCell<Option<ReviewSystem>> = RefCell::new(None);
}

struct ReviewSystem {
    _listeners: Vec<EventListener>,
    shared: Rc<Shared>,
}

#[derive(Default)]
struct Shared {
    post_id: RefCell<Option<String>>,
    container: RefCell<Option<HtmlElement>>,
}

/// Installs the document-level delegation once per page.
pub(crate) fn init() {
    let Some(document) = dom::document() else {
        return;
    };
    let shared = Rc::new(Shared::default());

    let click_shared = shared.clone();
    let listener = EventListener::new(&document, "click", move |event| {
        if let Some(star) = dom::target_with_class(event, "star") {
            handle_star_click(&star);
            return;
        }
        if dom::target_with_class(event, "submit-review-btn").is_some() {
            submit(&click_shared);
            return;
        }
        if let Some(button) = dom::target_with_class(event, "delete-review-btn") {
            if let Some(review_id) = button.get_attribute("data-review-id") {
                delete(&click_shared, review_id);
            }
        }
    });

    REVIEW.with(|slot| {
        *slot.borrow_mut() = Some(ReviewSystem {
            _listeners: vec![listener],
            shared,
        });
    });
}

/// Loads both review feeds for `post_id` and rebuilds the section inside
/// `container`. Safe to call again for refresh; the latest call wins.
pub(crate) fn render_section(post_id: &str, container: &HtmlElement) {
    let shared = REVIEW.with(|slot| {
        slot.borrow()
            .as_ref()
            .map(|system| system.shared.clone())
    });
    let Some(shared) = shared else {
        return;
    };
    *shared.post_id.borrow_mut() = Some(post_id.to_string());
    *shared.container.borrow_mut() = Some(container.clone());

    let post_id = post_id.to_string();
    let container = container.clone();
    spawn_local(async move {
        let reviews = http::get_json::<ReviewListResponse>(&format!("/api/review/{post_id}")).await;
        let mine = http::get_json::<MyReviewResponse>(&format!("/api/my-review/{post_id}")).await;
        match (reviews, mine) {
            (Ok(reviews), Ok(mine)) => {
                render(&container, &reviews, mine.my_review.as_ref());
            }
            (reviews, mine) => {
                if let Err(error) = reviews {
                    console::error!("review list load failed", error.message());
                }
                if let Err(error) = mine {
                    console::error!("my review load failed", error.message());
                }
                dom::clear_children(&container);
                if let Some(row) = dom::create_text("div", "error", "Could not load reviews.") {
                    dom::append(&container, &row);
                }
            }
        }
    });
}

fn refresh(shared: &Rc<Shared>) {
    let post_id = shared.post_id.borrow().clone();
    let container = shared.container.borrow().clone();
    if let (Some(post_id), Some(container)) = (post_id, container) {
        render_section(&post_id, &container);
    }
}

fn render(container: &HtmlElement, reviews: &ReviewListResponse, mine: Option<&MyReview>) {
    dom::clear_children(container);
    let Some(section) = dom::create("div", "review-section") else {
        return;
    };

    if let Some(header) = build_header(reviews) {
        dom::append(&section, &header);
    }
    if let Some(form) = build_form(mine) {
        dom::append(&section, &form);
    }
    if let Some(list) = build_list(reviews) {
        dom::append(&section, &list);
    }
    dom::append(container, &section);
}

fn build_header(reviews: &ReviewListResponse) -> Option<HtmlElement> {
    let header = dom::create("div", "review-header")?;
    if let Some(title) = dom::create_text(
        "h3",
        "",
        &format!("Reviews ({})", reviews.stats.total_reviews),
    ) {
        dom::append(&header, &title);
    }
    if reviews.stats.avg_rating > 0.0 {
        if let Some(summary) = dom::create("div", "rating-summary") {
            if let Some(number) = dom::create_text(
                "span",
                "rating-number",
                &format!("{:.1}", reviews.stats.avg_rating),
            ) {
                dom::append(&summary, &number);
            }
            if let Some(stars) = build_stars_display(reviews.stats.avg_rating) {
                dom::append(&summary, &stars);
            }
            dom::append(&header, &summary);
        }
    }
    Some(header)
}

/// Five read-only stars: full up to the floor, a half star when the
/// fraction reaches .5, empty for the rest.
fn build_stars_display(rating: f64) -> Option<HtmlElement> {
    let display = dom::create("div", "stars-display")?;
    let full = rating.floor() as u32;
    let has_half = rating - rating.floor() >= 0.5;
    for position in 1..=REVIEW_MAX_STARS {
        let (class, glyph) = if position <= full {
            ("star filled", "★")
        } else if position == full + 1 && has_half {
            ("star half", "★")
        } else {
            ("star empty", "☆")
        };
        if let Some(star) = dom::create_text("span", class, glyph) {
            dom::append(&display, &star);
        }
    }
    Some(display)
}

fn build_form(mine: Option<&MyReview>) -> Option<HtmlElement> {
    let form = dom::create("div", "review-form")?;
    let heading = if mine.is_some() {
        "Edit my review"
    } else {
        "Write a review"
    };
    if let Some(title) = dom::create_text("h4", "", heading) {
        dom::append(&form, &title);
    }

    let rating_row = dom::create("div", "star-rating")?;
    let selected = mine.map(|review| review.rating).unwrap_or(0);
    for position in 1..=REVIEW_MAX_STARS {
        let (class, glyph) = if position <= selected {
            ("star selected", "★")
        } else {
            ("star", "☆")
        };
        if let Some(star) = dom::create_text("span", class, glyph) {
            let _ = star.set_attribute("data-rating", &position.to_string());
            dom::append(&rating_row, &star);
        }
    }
    dom::append(&form, &rating_row);

    if let Some(comment) = dom::create("textarea", "") {
        let _ = comment.set_attribute("id", "reviewComment");
        let _ = comment.set_attribute(
            "placeholder",
            "How was this recipe? (optional, 500 characters max)",
        );
        let _ = comment.set_attribute("maxlength", &REVIEW_COMMENT_MAX_CHARS.to_string());
        let _ = comment.set_attribute("rows", "3");
        if let Some(mine) = mine {
            comment.set_text_content(Some(&mine.comment));
        }
        dom::append(&form, &comment);
    }

    let actions = dom::create("div", "form-actions")?;
    let submit_label = if mine.is_some() { "Update" } else { "Submit" };
    if let Some(submit) = dom::create_text("button", "submit-review-btn", submit_label) {
        dom::append(&actions, &submit);
    }
    if let Some(mine) = mine {
        if let Some(delete) = dom::create_text("button", "delete-review-btn", "Delete") {
            let _ = delete.set_attribute("data-review-id", &mine.id);
            dom::append(&actions, &delete);
        }
    }
    dom::append(&form, &actions);
    Some(form)
}

fn build_list(reviews: &ReviewListResponse) -> Option<HtmlElement> {
    let list = dom::create("div", "reviews-list")?;
    if reviews.reviews.is_empty() {
        if let Some(empty) = dom::create_text(
            "div",
            "no-reviews",
            "No reviews yet. Be the first to write one!",
        ) {
            dom::append(&list, &empty);
        }
        return Some(list);
    }
    for review in &reviews.reviews {
        let Some(item) = dom::create("div", "review-item") else {
            continue;
        };
        if let Some(head) = dom::create("div", "review-header-item") {
            if let Some(info) = dom::create("div", "reviewer-info") {
                if let Some(name) = dom::create_text("span", "reviewer-name", &review.user_name) {
                    dom::append(&info, &name);
                }
                if let Some(stars) = build_stars_display(review.rating) {
                    stars.set_class_name("review-rating");
                    dom::append(&info, &stars);
                }
                dom::append(&head, &info);
            }
            if let Some(at) = review.created_at.as_ref() {
                if let Some(date) = dom::create_text("span", "review-date", at.display_date()) {
                    dom::append(&head, &date);
                }
            }
            dom::append(&item, &head);
        }
        if !review.comment.is_empty() {
            if let Some(comment) = dom::create_text("div", "review-comment", &review.comment) {
                dom::append(&item, &comment);
            }
        }
        if review.is_updated {
            if let Some(flag) = dom::create_text("div", "review-updated", "edited") {
                dom::append(&item, &flag);
            }
        }
        dom::append(&list, &item);
    }
    Some(list)
}

fn handle_star_click(star: &Element) {
    let Some(parent) = star.parent_element() else {
        return;
    };
    if !parent.class_list().contains("star-rating") {
        return;
    }
    let Some(rating) = star
        .get_attribute("data-rating")
        .and_then(|value| value.parse::<u32>().ok())
    else {
        return;
    };
    set_star_rating(rating);
}

fn set_star_rating(rating: u32) {
    for (index, star) in dom::query_all(".star-rating .star").iter().enumerate() {
        if (index as u32) < rating {
            let _ = star.class_list().add_1("selected");
            star.set_text_content(Some("★"));
        } else {
            let _ = star.class_list().remove_1("selected");
            star.set_text_content(Some("☆"));
        }
    }
}

fn selected_rating() -> u32 {
    dom::query_all(".star-rating .star.selected").len() as u32
}

fn comment_text() -> String {
    dom::element_by_id("reviewComment")
        .and_then(|element| element.dyn_into::<HtmlTextAreaElement>().ok())
        .map(|textarea| textarea.value().trim().to_string())
        .unwrap_or_default()
}

fn submit(shared: &Rc<Shared>) {
    let Some(post_id) = shared.post_id.borrow().clone() else {
        return;
    };
    let rating = selected_rating();
    if rating == 0 {
        dom::alert("Please pick a star rating.");
        return;
    }
    let submission = ReviewSubmit {
        post_id,
        rating,
        comment: comment_text(),
    };
    let task_shared = shared.clone();
    spawn_local(async move {
        match http::post_json::<ReviewSubmit, Ack>("/api/review", &submission).await {
            Ok(ack) if ack.success => {
                if let Some(message) = ack.message {
                    dom::alert(&message);
                }
                refresh(&task_shared);
            }
            Ok(ack) => {
                dom::alert(
                    &ack.error
                        .unwrap_or_else(|| "Could not save the review.".to_string()),
                );
            }
            Err(error) => {
                console::error!("review submit failed", error.message());
                dom::alert(&error.message());
            }
        }
    });
}

fn delete(shared: &Rc<Shared>, review_id: String) {
    if !dom::confirm("Delete this review?") {
        return;
    }
    let task_shared = shared.clone();
    spawn_local(async move {
        match http::delete_json::<Ack>(&format!("/api/review/{review_id}")).await {
            Ok(ack) if ack.success => {
                if let Some(message) = ack.message {
                    dom::alert(&message);
                }
                refresh(&task_shared);
            }
            Ok(ack) => {
                dom::alert(
                    &ack.error
                        .unwrap_or_else(|| "Could not delete the review.".to_string()),
                );
            }
            Err(error) => {
                console::error!("review delete failed", error.message());
                dom::alert(&error.message());
            }
        }
    });
}
