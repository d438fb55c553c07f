//! DuckDB-backed question store
//!
//! The engine owns a single DuckDB connection behind a mutex. Each operation
//! runs as a session: lock the handle, open a transaction, run, then commit on
//! success or roll back on failure. The lock is released when the session
//! returns, on every path.

use super::queries::{self, QuestionFilter, SCHEMA};
use crate::config::SeedData;
use crate::error::{Error, Result, ResultExt};
use crate::types::{Category, CategoryId, NewQuestion, Question, QuestionId};
use duckdb::{Connection, Transaction};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// In-memory database location
pub const IN_MEMORY: &str = ":memory:";

/// Database query engine using DuckDB
pub struct DatabaseEngine {
    /// DuckDB connection
    conn: Mutex<Connection>,
    /// Where the database lives (for logging)
    location: String,
}

/// Counts from loading a seed file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    /// Categories inserted (existing ids are skipped)
    pub categories: usize,
    /// Questions inserted
    pub questions: usize,
}

impl DatabaseEngine {
    /// Open the database at `location` (a file path or `:memory:`) and migrate it
    pub fn open(location: &str) -> Result<Self> {
        let conn = if location == IN_MEMORY {
            Connection::open_in_memory()
        } else {
            Connection::open(Path::new(location))
        }
        .with_context(|| format!("Failed to open database '{location}'"))?;

        let engine = Self {
            conn: Mutex::new(conn),
            location: location.to_string(),
        };
        engine.migrate()?;

        tracing::debug!("Opened database at {}", engine.location);
        Ok(engine)
    }

    /// Open a fresh in-memory database
    pub fn open_in_memory() -> Result<Self> {
        Self::open(IN_MEMORY)
    }

    /// Create tables and sequences if missing
    fn migrate(&self) -> Result<()> {
        let conn = self.lock()?;
        conn.execute_batch(SCHEMA)
            .context("Failed to migrate schema")?;
        Ok(())
    }

    /// Lock the connection
    ///
    /// A session that panicked has already rolled back its transaction, so a
    /// poisoned lock still guards a consistent connection.
    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        Ok(self.conn.lock().unwrap_or_else(|poisoned| {
            tracing::warn!("Recovering database handle after a panicked session");
            poisoned.into_inner()
        }))
    }

    /// Run `f` inside a transaction; commit if it succeeds, roll back if not
    pub fn with_session<T>(&self, f: impl FnOnce(&Transaction<'_>) -> Result<T>) -> Result<T> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        match f(&tx) {
            Ok(value) => {
                tx.commit()?;
                Ok(value)
            }
            Err(e) => {
                if let Err(rollback) = tx.rollback() {
                    tracing::warn!("Rollback failed after '{}': {}", e, rollback);
                }
                Err(e)
            }
        }
    }

    /// Test the database connection
    pub fn check_connection(&self) -> Result<()> {
        let conn = self.lock()?;
        conn.execute("SELECT 1", [])
            .map_err(|e| Error::store(format!("Connection check failed: {e}")))?;
        Ok(())
    }

    /// Questions matching `filter`, ascending by id
    pub fn list_questions(&self, filter: &QuestionFilter) -> Result<Vec<Question>> {
        self.with_session(|tx| queries::list_questions(tx, filter))
    }

    /// Number of stored questions
    pub fn count_questions(&self) -> Result<usize> {
        self.with_session(|tx| queries::count_questions(tx))
    }

    /// Look up one question
    pub fn get_question(&self, id: QuestionId) -> Result<Option<Question>> {
        self.with_session(|tx| queries::get_question(tx, id))
    }

    /// Insert a question, returning its id
    pub fn insert_question(&self, new: &NewQuestion) -> Result<QuestionId> {
        let id = self.with_session(|tx| queries::insert_question(tx, new))?;
        tracing::info!(id, category = new.category, "Created question");
        Ok(id)
    }

    /// Delete a question; `false` when it did not exist
    pub fn delete_question(&self, id: QuestionId) -> Result<bool> {
        let deleted = self.with_session(|tx| queries::delete_question(tx, id))?;
        if deleted {
            tracing::info!(id, "Deleted question");
        }
        Ok(deleted)
    }

    /// All categories, ascending by id
    pub fn list_categories(&self) -> Result<Vec<Category>> {
        self.with_session(|tx| queries::list_categories(tx))
    }

    /// Look up one category
    pub fn get_category(&self, id: CategoryId) -> Result<Option<Category>> {
        self.with_session(|tx| queries::get_category(tx, id))
    }

    /// Load a seed file's categories and questions in one transaction
    pub fn load_seed(&self, seed: &SeedData) -> Result<SeedSummary> {
        let summary = self.with_session(|tx| {
            let mut summary = SeedSummary::default();
            for category in &seed.categories {
                if queries::insert_category(tx, category)? {
                    summary.categories += 1;
                }
            }
            for question in &seed.questions {
                queries::insert_question(tx, question)?;
                summary.questions += 1;
            }
            Ok(summary)
        })?;

        tracing::info!(
            categories = summary.categories,
            questions = summary.questions,
            "Loaded seed data into {}",
            self.location
        );
        Ok(summary)
    }

    /// Where the database lives
    pub fn location(&self) -> &str {
        &self.location
    }
}
