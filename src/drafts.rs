//! Local draft persistence for the authoring form.
//!
//! Drafts live in `localStorage` under a versioned key; a version mismatch
//! reads as no draft rather than a migration.

use bapsimi_core::api::RecipeStep;
use serde::{Deserialize, Serialize};

use crate::dom;

const DRAFT_KEY: &str = "bapsimi.draft.v1";
const DRAFT_VERSION: u32 = 1;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct DraftBlob {
    pub(crate) version: u32,
    pub(crate) title: String,
    pub(crate) servings: String,
    pub(crate) time_minutes: String,
    pub(crate) level: String,
    pub(crate) category: String,
    pub(crate) desc: String,
    pub(crate) tags: Vec<String>,
    pub(crate) ingredients: Vec<String>,
    pub(crate) steps: Vec<RecipeStep>,
}

impl DraftBlob {
    pub(crate) fn new() -> Self {
        Self {
            version: DRAFT_VERSION,
            ..Self::default()
        }
    }
}

pub(crate) fn save(draft: &DraftBlob) {
    let Some(window) = dom::window() else {
        return;
    };
    let Ok(Some(storage)) = window.local_storage() else {
        return;
    };
    let Ok(encoded) = serde_json::to_string(draft) else {
        return;
    };
    let _ = storage.set_item(DRAFT_KEY, &encoded);
}

pub(crate) fn load() -> Option<DraftBlob> {
    let window = dom::window()?;
    let storage = window.local_storage().ok()??;
    let raw = storage.get_item(DRAFT_KEY).ok()??;
    let draft: DraftBlob = serde_json::from_str(&raw).ok()?;
    if draft.version != DRAFT_VERSION {
        return None;
    }
    Some(draft)
}

pub(crate) fn clear() {
    let Some(window) = dom::window() else {
        return;
    };
    let Ok(Some(storage)) = window.local_storage() else {
        return;
    };
    let _ = storage.remove_item(DRAFT_KEY);
}
