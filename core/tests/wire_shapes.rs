use bapsimi_core::api::{
    Ack, ChatReply, LikeResponse, MyReviewResponse, PostDetail, RecipeListResponse, RecipeStep,
    ReviewListResponse, SearchResponse, Top10Response,
};

#[test]
fn chat_reply_carries_either_response_or_error() {
    let ok: ChatReply =
        serde_json::from_str(r#"{"success": true, "response": "Try a kimchi stew."}"#).unwrap();
    assert!(ok.success);
    assert_eq!(ok.response.as_deref(), Some("Try a kimchi stew."));
    assert!(ok.error.is_none());

    let err: ChatReply = serde_json::from_str(r#"{"error": "message too long"}"#).unwrap();
    assert!(!err.success);
    assert_eq!(err.error.as_deref(), Some("message too long"));
}

#[test]
fn search_results_parse_with_server_defaults() {
    let body = r#"{
        "success": true,
        "query": "stew",
        "count": 1,
        "results": [{
            "id": "64ff0a",
            "title": "Beef stew",
            "author_name": "mina",
            "created_at": "2025-11-02",
            "likes": 7,
            "time_minutes": 40,
            "level": "easy",
            "category": "main",
            "tags": ["beef", "winter"],
            "desc": "",
            "servings": 2
        }]
    }"#;
    let parsed: SearchResponse = serde_json::from_str(body).unwrap();
    assert!(parsed.success);
    assert_eq!(parsed.count, 1);
    let post = &parsed.results[0];
    assert_eq!(post.id, "64ff0a");
    assert_eq!(post.tags, vec!["beef", "winter"]);
    assert_eq!(
        post.created_at.as_ref().unwrap().display_date(),
        "2025-11-02"
    );
}

#[test]
fn top10_entries_are_minimal() {
    let body = r#"{"success": true, "results": [{"id": "a1", "title": "Bibimbap", "likes": 42}]}"#;
    let parsed: Top10Response = serde_json::from_str(body).unwrap();
    assert_eq!(parsed.results[0].likes, 42);
}

#[test]
fn recipe_cards_accept_mongo_underscore_ids() {
    let body = r#"{
        "success": true,
        "recipes": [
            {"_id": "650001", "title": "Kimbap", "likes": 3, "category": "snack",
             "image_url": null, "created_at": "2025-10-30"},
            {"_id": "650002", "title": "Ramyeon", "author_name": "joon"}
        ]
    }"#;
    let parsed: RecipeListResponse = serde_json::from_str(body).unwrap();
    assert_eq!(parsed.recipes[0].id, "650001");
    assert_eq!(parsed.recipes[1].likes, 0);
    assert_eq!(parsed.recipes[1].author_name.as_deref(), Some("joon"));
}

#[test]
fn post_detail_tolerates_both_step_shapes_and_date_wrappers() {
    let body = r#"{
        "_id": "650abc",
        "title": "Doenjang jjigae",
        "desc": "Weeknight staple",
        "author_name": "mina",
        "servings": 2,
        "time_minutes": 25,
        "level": "easy",
        "category": "soup",
        "tags": ["soup"],
        "ingredients": ["doenjang", "tofu"],
        "steps": ["Boil water", {"text": "Simmer", "min": 10}],
        "likes": 12,
        "created_at": {"$date": "2025-09-14T08:30:00Z"},
        "user_liked": true
    }"#;
    let post: PostDetail = serde_json::from_str(body).unwrap();
    assert_eq!(post.id, "650abc");
    assert_eq!(post.steps[0].text(), "Boil water");
    assert_eq!(post.steps[0].minutes(), None);
    assert_eq!(post.steps[1].text(), "Simmer");
    assert_eq!(post.steps[1].minutes(), Some(10));
    assert_eq!(
        post.created_at.as_ref().unwrap().display_date(),
        "2025-09-14"
    );
    assert!(post.user_liked);
}

#[test]
fn timed_steps_serialize_without_empty_minutes() {
    let step = RecipeStep::Timed {
        text: "Rest the dough".to_string(),
        min: None,
    };
    assert_eq!(
        serde_json::to_string(&step).unwrap(),
        r#"{"text":"Rest the dough"}"#
    );
}

#[test]
fn like_and_ack_payloads_parse() {
    let like: LikeResponse =
        serde_json::from_str(r#"{"success": true, "likes": 8, "user_liked": true}"#).unwrap();
    assert!(like.user_liked);
    assert_eq!(like.likes, 8);

    let ack: Ack = serde_json::from_str(r#"{"success": true, "message": "saved"}"#).unwrap();
    assert!(ack.success);
    let failure: Ack = serde_json::from_str(r#"{"error": "login required"}"#).unwrap();
    assert!(!failure.success);
}

#[test]
fn review_section_payloads_parse() {
    let body = r#"{
        "reviews": [{
            "id": "r1", "user_name": "joon", "rating": 4,
            "comment": "Great", "created_at": "2025-11-01", "is_updated": true
        }],
        "stats": {"avg_rating": 4.5, "total_reviews": 2}
    }"#;
    let parsed: ReviewListResponse = serde_json::from_str(body).unwrap();
    assert_eq!(parsed.reviews[0].rating, 4.0);
    assert!(parsed.reviews[0].is_updated);
    assert!((parsed.stats.avg_rating - 4.5).abs() < f64::EPSILON);

    let none: MyReviewResponse = serde_json::from_str(r#"{"my_review": null}"#).unwrap();
    assert!(none.my_review.is_none());
    let some: MyReviewResponse =
        serde_json::from_str(r#"{"my_review": {"id": "r1", "rating": 5, "comment": ""}}"#)
            .unwrap();
    assert_eq!(some.my_review.unwrap().rating, 5);
}
