//! Common types used throughout the trivia API
//!
//! Domain records (questions and categories) and the request shapes that
//! create them.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// Type Aliases
// ============================================================================

/// Store-assigned question identifier
pub type QuestionId = i64;

/// Category identifier
pub type CategoryId = i64;

/// Category id to display name, ordered by id
pub type CategoryMap = BTreeMap<CategoryId, String>;

/// Lowest accepted difficulty
pub const MIN_DIFFICULTY: i32 = 1;

/// Highest accepted difficulty
pub const MAX_DIFFICULTY: i32 = 5;

// ============================================================================
// Records
// ============================================================================

/// A trivia question as stored and as served
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub question: String,
    pub answer: String,
    pub difficulty: i32,
    pub category: CategoryId,
}

/// A question category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    #[serde(rename = "type")]
    pub name: String,
}

/// Build the `{id: type}` map served alongside question listings
pub fn category_map(categories: &[Category]) -> CategoryMap {
    categories
        .iter()
        .map(|c| (c.id, c.name.clone()))
        .collect()
}

/// A validated question ready for insertion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewQuestion {
    pub question: String,
    pub answer: String,
    pub difficulty: i32,
    pub category: CategoryId,
}

// ============================================================================
// Request Bodies
// ============================================================================

/// Integer that may arrive as a JSON number or a numeric string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LooseInt {
    Int(i64),
    Text(String),
}

impl LooseInt {
    /// Parse into an integer, naming `field` on failure
    pub fn parse(&self, field: &str) -> Result<i64> {
        match self {
            LooseInt::Int(n) => Ok(*n),
            LooseInt::Text(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|_| Error::invalid_field(field, format!("'{s}' is not an integer"))),
        }
    }
}

/// Body of `POST /questions`
///
/// The same route serves two operations: a body carrying `searchTerm` is a
/// search, anything else is a create. Every field is optional here so that
/// missing fields become a validation failure instead of a parse failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuestionsPostBody {
    #[serde(rename = "searchTerm", default)]
    pub search_term: Option<String>,
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub difficulty: Option<LooseInt>,
    #[serde(default)]
    pub category: Option<LooseInt>,
}

impl QuestionsPostBody {
    /// Non-empty search term, if this body is a search
    pub fn search_term(&self) -> Option<&str> {
        self.search_term
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Validate the create fields into a [`NewQuestion`]
    pub fn into_new_question(self) -> Result<NewQuestion> {
        let question = required_text(self.question, "question")?;
        let answer = required_text(self.answer, "answer")?;

        let difficulty = self
            .difficulty
            .ok_or_else(|| Error::missing_field("difficulty"))?
            .parse("difficulty")?;
        let difficulty = i32::try_from(difficulty)
            .ok()
            .filter(|d| (MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(d))
            .ok_or_else(|| {
                Error::invalid_field(
                    "difficulty",
                    format!("must be between {MIN_DIFFICULTY} and {MAX_DIFFICULTY}"),
                )
            })?;

        let category = self
            .category
            .ok_or_else(|| Error::missing_field("category"))?
            .parse("category")?;
        if category <= 0 {
            return Err(Error::invalid_field("category", "must be a positive id"));
        }

        Ok(NewQuestion {
            question,
            answer,
            difficulty,
            category,
        })
    }
}

fn required_text(value: Option<String>, field: &str) -> Result<String> {
    let value = value.ok_or_else(|| Error::missing_field(field))?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::invalid_field(field, "must not be empty"));
    }
    Ok(trimmed.to_string())
}
