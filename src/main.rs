mod boot;
mod chatbot;
mod dom;
mod drafts;
mod http;
mod launcher;
mod mypage;
mod post_detail;
mod post_form;
mod review;
mod search;

fn main() {
    console_error_panic_hook::set_once();
    boot::init();
}

#[cfg(test)]
mod tests {
    use wasm_bindgen_test::*;

    use crate::dom;
    use crate::drafts::{self, DraftBlob};
    use crate::search;
    use bapsimi_core::api::RecipeStep;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn search_path_encodes_the_query() {
        assert_eq!(
            search::search_path("kimchi stew", "likes"),
            "/api/search?q=kimchi%20stew&sort=likes"
        );
        assert_eq!(
            search::search_path("찌개", "recent"),
            "/api/search?q=%EC%B0%8C%EA%B0%9C&sort=recent"
        );
    }

    #[wasm_bindgen_test]
    fn like_label_formats_count() {
        assert_eq!(search::like_label(0), "❤️ 0");
        assert_eq!(search::like_label(42), "❤️ 42");
    }

    #[wasm_bindgen_test]
    fn drafts_round_trip_through_local_storage() {
        drafts::clear();
        assert!(drafts::load().is_none());

        let mut draft = DraftBlob::new();
        draft.title = "Cold noodles".to_string();
        draft.tags = vec!["summer".to_string()];
        draft.steps = vec![RecipeStep::Timed {
            text: "Chill the broth".to_string(),
            min: Some(30),
        }];
        drafts::save(&draft);
        assert_eq!(drafts::load(), Some(draft));

        drafts::clear();
        assert!(drafts::load().is_none());
    }

    #[wasm_bindgen_test]
    fn missing_elements_read_as_none() {
        assert!(dom::element_by_id("definitely-not-on-this-page").is_none());
        assert!(dom::html_by_id("also-missing").is_none());
    }

    #[wasm_bindgen_test]
    fn created_elements_carry_class_and_text() {
        let element = dom::create_text("div", "message bot", "hello").unwrap();
        assert_eq!(element.class_name(), "message bot");
        assert_eq!(element.text_content().unwrap(), "hello");
    }
}
