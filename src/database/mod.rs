//! Question store via DuckDB
//!
//! This module owns the schema, the scoped sessions every operation runs in,
//! and the handful of predicate queries the API needs.

mod engine;
mod queries;

pub use engine::{DatabaseEngine, SeedSummary, IN_MEMORY};
pub use queries::QuestionFilter;
