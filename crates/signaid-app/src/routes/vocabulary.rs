use axum::Json;
use axum::extract::{Path, Query, State};
use serde::{Deserialize, Serialize, Serializer};
use signaid_core::vocabulary::Vocabulary;
use signaid_types::{Category, VocabularyEntry};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct VocabularyQuery {
    #[serde(default)]
    pub category: Option<String>,
}

/// Entries serialized as a `word -> entry` object in declaration order
#[derive(Debug)]
pub struct EntryMap(Vec<VocabularyEntry>);

impl Serialize for EntryMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|entry| (&entry.word, entry)))
    }
}

#[derive(Debug, Serialize)]
pub struct VocabularyResponse {
    pub vocabulary: EntryMap,
    /// Every category in the table, regardless of the filter
    pub categories: Vec<Category>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct WordResponse {
    pub word: String,
    pub data: VocabularyEntry,
}

pub async fn list_vocabulary(
    State(state): State<AppState>,
    Query(query): Query<VocabularyQuery>,
) -> Json<VocabularyResponse> {
    let vocabulary = state.vocabulary();
    let category = query.category.filter(|c| !c.is_empty());

    let entries: Vec<VocabularyEntry> = vocabulary
        .entries()
        .iter()
        .filter(|entry| {
            category
                .as_deref()
                .is_none_or(|c| entry.category.as_str() == c)
        })
        .cloned()
        .collect();

    Json(VocabularyResponse {
        count: entries.len(),
        categories: vocabulary.categories(),
        vocabulary: EntryMap(entries),
    })
}

pub async fn get_word(
    State(state): State<AppState>,
    Path(word): Path<String>,
) -> Result<Json<WordResponse>, ApiError> {
    let key = word.to_lowercase();
    let entry = state
        .vocabulary()
        .lookup(&key)
        .cloned()
        .ok_or(ApiError::NotFound)?;

    Ok(Json(WordResponse {
        word: key,
        data: entry,
    }))
}
