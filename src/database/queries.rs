//! SQL statements against the trivia schema
//!
//! Every function takes a plain connection so it can run inside a session
//! transaction (a `Transaction` derefs to `Connection`).

use crate::error::{Error, Result};
use crate::types::{Category, CategoryId, NewQuestion, Question, QuestionId};
use duckdb::{params, Connection, Row};

/// Schema for the two trivia tables
pub(crate) const SCHEMA: &str = "
CREATE SEQUENCE IF NOT EXISTS question_id_seq START 1;

CREATE TABLE IF NOT EXISTS categories (
    id BIGINT PRIMARY KEY,
    name VARCHAR NOT NULL
);

CREATE TABLE IF NOT EXISTS questions (
    id BIGINT PRIMARY KEY DEFAULT nextval('question_id_seq'),
    question VARCHAR NOT NULL,
    answer VARCHAR NOT NULL,
    difficulty INTEGER NOT NULL,
    category BIGINT NOT NULL REFERENCES categories (id)
);
";

const SELECT_QUESTIONS: &str =
    "SELECT id, question, answer, difficulty, category FROM questions";

/// Predicate filter for question listings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionFilter {
    /// Only questions in this category
    pub category: Option<CategoryId>,
    /// Case-insensitive substring of the question text
    pub search: Option<String>,
}

impl QuestionFilter {
    /// Match every question
    pub fn all() -> Self {
        Self::default()
    }

    /// Match one category
    pub fn category(id: CategoryId) -> Self {
        Self {
            category: Some(id),
            search: None,
        }
    }

    /// Match question text containing `term`
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            category: None,
            search: Some(term.into()),
        }
    }
}

fn map_question(row: &Row<'_>) -> duckdb::Result<Question> {
    Ok(Question {
        id: row.get(0)?,
        question: row.get(1)?,
        answer: row.get(2)?,
        difficulty: row.get(3)?,
        category: row.get(4)?,
    })
}

fn map_category(row: &Row<'_>) -> duckdb::Result<Category> {
    Ok(Category {
        id: row.get(0)?,
        name: row.get(1)?,
    })
}

/// Questions matching `filter`, ascending by id
pub fn list_questions(conn: &Connection, filter: &QuestionFilter) -> Result<Vec<Question>> {
    let mut clauses = Vec::new();
    if filter.category.is_some() {
        clauses.push("category = ?");
    }
    if filter.search.is_some() {
        clauses.push("contains(lower(question), lower(?))");
    }

    let mut sql = SELECT_QUESTIONS.to_string();
    if !clauses.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
    }
    sql.push_str(" ORDER BY id ASC");

    tracing::debug!("Executing query: {}", sql);

    let mut stmt = conn.prepare(&sql)?;
    let rows = match (filter.category, filter.search.as_deref()) {
        (None, None) => stmt.query_map([], map_question)?,
        (Some(category), None) => stmt.query_map(params![category], map_question)?,
        (None, Some(term)) => stmt.query_map(params![term], map_question)?,
        (Some(category), Some(term)) => stmt.query_map(params![category, term], map_question)?,
    };

    let questions = rows.collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(questions)
}

/// Number of stored questions
pub fn count_questions(conn: &Connection) -> Result<usize> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM questions", [], |row| row.get(0))?;
    usize::try_from(count).map_err(|_| Error::store(format!("invalid question count {count}")))
}

/// Look up one question
pub fn get_question(conn: &Connection, id: QuestionId) -> Result<Option<Question>> {
    let sql = format!("{SELECT_QUESTIONS} WHERE id = ?");
    match conn.query_row(&sql, params![id], map_question) {
        Ok(question) => Ok(Some(question)),
        Err(duckdb::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Insert a question, returning its new id
pub fn insert_question(conn: &Connection, new: &NewQuestion) -> Result<QuestionId> {
    if get_category(conn, new.category)?.is_none() {
        return Err(Error::unprocessable(format!(
            "category {} does not exist",
            new.category
        )));
    }

    let id = conn.query_row(
        "INSERT INTO questions (question, answer, difficulty, category)
         VALUES (?, ?, ?, ?) RETURNING id",
        params![new.question, new.answer, new.difficulty, new.category],
        |row| row.get(0),
    )?;
    Ok(id)
}

/// Delete a question; `false` when no row had that id
pub fn delete_question(conn: &Connection, id: QuestionId) -> Result<bool> {
    let affected = conn.execute("DELETE FROM questions WHERE id = ?", params![id])?;
    Ok(affected > 0)
}

/// All categories, ascending by id
pub fn list_categories(conn: &Connection) -> Result<Vec<Category>> {
    let mut stmt = conn.prepare("SELECT id, name FROM categories ORDER BY id ASC")?;
    let categories = stmt
        .query_map([], map_category)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(categories)
}

/// Look up one category
pub fn get_category(conn: &Connection, id: CategoryId) -> Result<Option<Category>> {
    match conn.query_row(
        "SELECT id, name FROM categories WHERE id = ?",
        params![id],
        map_category,
    ) {
        Ok(category) => Ok(Some(category)),
        Err(duckdb::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Insert a category unless its id is taken; `true` when inserted
pub fn insert_category(conn: &Connection, category: &Category) -> Result<bool> {
    let affected = conn.execute(
        "INSERT INTO categories (id, name) VALUES (?, ?) ON CONFLICT (id) DO NOTHING",
        params![category.id, category.name],
    )?;
    Ok(affected > 0)
}
