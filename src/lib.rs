// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Trivia API
//!
//! A JSON API for a trivia game: browse questions ten at a time, add and
//! delete questions, search them, and play quiz rounds that serve one random
//! unseen question per step.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use trivia_api::{api, database::DatabaseEngine, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let db = DatabaseEngine::open("trivia.duckdb")?;
//!     let app = api::router(Arc::new(db));
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:5000").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                 HTTP API (axum handlers)                 │
//! │  typed request bodies → validation → typed responses     │
//! └──────────────────────────────────────────────────────────┘
//!               │                              │
//!     ┌─────────┴─────────┐          ┌─────────┴─────────┐
//!     │     Paginator     │          │   Quiz Selector   │
//!     │  10 per page,     │          │  category filter, │
//!     │  1-indexed        │          │  exclusions,      │
//!     │                   │          │  uniform draw     │
//!     └─────────┬─────────┘          └─────────┬─────────┘
//!               └──────────────┬───────────────┘
//!                   ┌──────────┴──────────┐
//!                   │  DuckDB store       │
//!                   │  (scoped sessions)  │
//!                   └─────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Questions, categories and request bodies
pub mod types;

/// Fixed-size page slicing
pub mod pagination;

/// Random quiz question selection
pub mod quiz;

/// Question store via DuckDB
pub mod database;

/// HTTP routes and handlers
pub mod api;

/// Server settings and seed files
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, ErrorKind, Result};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
