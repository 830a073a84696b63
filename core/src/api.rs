//! Wire types for the recipe backend's JSON endpoints.
//!
//! Field names and defaults follow what the server actually emits; documents
//! created at different times disagree on a few shapes (`id` vs `_id`, steps
//! as plain strings vs `{text, min}` objects, `created_at` as a string vs a
//! Mongo `{$date}` wrapper), so those spots tolerate both.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Longest message the chat endpoint accepts; mirrored client-side so the
/// request is rejected before it leaves the page.
pub const CHAT_MESSAGE_MAX_CHARS: usize = 500;

#[derive(Clone, Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub results: Vec<PostSummary>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct PostSummary {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub author_name: String,
    #[serde(default)]
    pub created_at: Option<CreatedAt>,
    #[serde(default)]
    pub likes: u32,
    #[serde(default)]
    pub time_minutes: u32,
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub servings: u32,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Top10Response {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub results: Vec<TopEntry>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct TopEntry {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub likes: u32,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RecipeListResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub recipes: Vec<RecipeCard>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Compact card used by the my-page lists; only the projected fields exist.
#[derive(Clone, Debug, Deserialize)]
pub struct RecipeCard {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub likes: u32,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<CreatedAt>,
    #[serde(default)]
    pub author_name: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct PostDetail {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub author_name: String,
    #[serde(default)]
    pub servings: Option<u32>,
    #[serde(default)]
    pub time_minutes: Option<u32>,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub steps: Vec<RecipeStep>,
    #[serde(default)]
    pub likes: u32,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<CreatedAt>,
    #[serde(default)]
    pub user_liked: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecipeStep {
    Timed {
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<u32>,
    },
    Plain(String),
}

impl RecipeStep {
    pub fn text(&self) -> &str {
        match self {
            RecipeStep::Timed { text, .. } => text,
            RecipeStep::Plain(text) => text,
        }
    }

    pub fn minutes(&self) -> Option<u32> {
        match self {
            RecipeStep::Timed { min, .. } => *min,
            RecipeStep::Plain(_) => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CreatedAt {
    Wrapped {
        #[serde(rename = "$date")]
        date: String,
    },
    Plain(String),
}

impl CreatedAt {
    /// The first ten characters are the `YYYY-MM-DD` prefix in every shape
    /// the backend produces.
    pub fn display_date(&self) -> &str {
        let raw = match self {
            CreatedAt::Wrapped { date } => date,
            CreatedAt::Plain(date) => date,
        };
        if raw.len() > 10 && raw.is_char_boundary(10) {
            &raw[..10]
        } else {
            raw
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct LikeResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub likes: u32,
    #[serde(default)]
    pub user_liked: bool,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ReviewListResponse {
    #[serde(default)]
    pub reviews: Vec<Review>,
    pub stats: ReviewStats,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Review {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub user_name: String,
    pub rating: f64,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub created_at: Option<CreatedAt>,
    #[serde(default)]
    pub is_updated: bool,
}

#[derive(Clone, Copy, Debug, Default, Deserialize)]
pub struct ReviewStats {
    #[serde(default)]
    pub avg_rating: f64,
    #[serde(default)]
    pub total_reviews: u32,
}

#[derive(Clone, Debug, Deserialize)]
pub struct MyReviewResponse {
    #[serde(default)]
    pub my_review: Option<MyReview>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct MyReview {
    #[serde(alias = "_id")]
    pub id: String,
    pub rating: u32,
    #[serde(default)]
    pub comment: String,
}

pub const REVIEW_COMMENT_MAX_CHARS: usize = 500;
pub const REVIEW_MAX_STARS: u32 = 5;

#[derive(Clone, Debug, Serialize)]
pub struct ReviewSubmit {
    pub post_id: String,
    pub rating: u32,
    pub comment: String,
}

/// Generic `{success, message?|error?}` acknowledgement used by the review,
/// delete-recipe, and unlike-recipe endpoints.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NewRecipe {
    pub title: String,
    pub servings: u32,
    pub time_minutes: u32,
    pub level: String,
    pub category: String,
    pub desc: String,
    pub tags: Vec<String>,
    pub ingredients: Vec<String>,
    pub steps: Vec<RecipeStep>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewRecipeResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}
