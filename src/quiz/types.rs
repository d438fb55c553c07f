//! Quiz request and step types

use crate::error::{Error, Result};
use crate::types::{CategoryId, LooseInt, Question, QuestionId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Category id meaning "every category"
pub const ALL_CATEGORIES: CategoryId = 0;

/// Category filter applied to a quiz round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryFilter {
    /// No filtering
    All,
    /// Only questions in this category
    Only(CategoryId),
}

impl CategoryFilter {
    /// Build from a category id, mapping the sentinel to [`CategoryFilter::All`]
    pub fn from_id(id: CategoryId) -> Self {
        if id == ALL_CATEGORIES {
            Self::All
        } else {
            Self::Only(id)
        }
    }

    /// Check if a question passes the filter
    pub fn matches(&self, question: &Question) -> bool {
        match self {
            Self::All => true,
            Self::Only(id) => question.category == *id,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Only(id) => write!(f, "{id}"),
        }
    }
}

/// Category as the quiz client sends it
///
/// The client keys categories by object key, so `id` may be a numeric string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizCategory {
    pub id: Option<LooseInt>,
    #[serde(rename = "type", default)]
    pub name: Option<String>,
}

/// Body of `POST /quizzes`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuizRequest {
    #[serde(default)]
    pub previous_questions: Option<Vec<QuestionId>>,
    #[serde(default)]
    pub quiz_category: Option<QuizCategory>,
}

impl QuizRequest {
    /// Validate into a [`QuizRound`]
    ///
    /// Both fields are required; an empty `previous_questions` list is fine.
    pub fn validate(self) -> Result<QuizRound> {
        let excluded = self
            .previous_questions
            .ok_or_else(|| Error::missing_field("previous_questions"))?;
        let category = self
            .quiz_category
            .ok_or_else(|| Error::missing_field("quiz_category"))?;
        let id = category
            .id
            .ok_or_else(|| Error::missing_field("quiz_category.id"))?
            .parse("quiz_category.id")?;
        if id < ALL_CATEGORIES {
            return Err(Error::invalid_field(
                "quiz_category.id",
                "must not be negative",
            ));
        }

        Ok(QuizRound {
            category: CategoryFilter::from_id(id),
            excluded: excluded.into_iter().collect(),
        })
    }
}

/// One validated quiz step input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizRound {
    /// Active category filter
    pub category: CategoryFilter,
    /// Questions already asked this session
    pub excluded: HashSet<QuestionId>,
}

impl QuizRound {
    /// Round over every category with nothing excluded
    pub fn new(category: CategoryFilter) -> Self {
        Self {
            category,
            excluded: HashSet::new(),
        }
    }

    /// Exclude the given ids
    #[must_use]
    pub fn excluding(mut self, ids: impl IntoIterator<Item = QuestionId>) -> Self {
        self.excluded.extend(ids);
        self
    }

    /// Check if a question may still be asked this round
    pub fn is_candidate(&self, question: &Question) -> bool {
        !self.excluded.contains(&question.id) && self.category.matches(question)
    }
}

/// Outcome of one quiz step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizStep {
    /// Next question to ask
    Question(Question),
    /// No candidates remain; the session is over
    Exhausted,
}

impl QuizStep {
    /// Check if the session is over
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted)
    }

    /// The chosen question, `None` once exhausted
    pub fn into_question(self) -> Option<Question> {
        match self {
            Self::Question(q) => Some(q),
            Self::Exhausted => None,
        }
    }
}
