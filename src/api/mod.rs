//! HTTP API
//!
//! # Routes
//!
//! - `GET /categories` - every category as `{id: type}`
//! - `GET /questions?page=N` - paginated questions plus categories
//! - `POST /questions` - create a question, or search with `searchTerm`
//! - `DELETE /questions/:id` - delete a question
//! - `GET /categories/:id/questions` - paginated questions in one category
//! - `POST /quizzes` - next random quiz question
//! - `GET /health` - store connectivity
//!
//! Errors share one envelope: `{"success": false, "error": 404, "message":
//! "resource not found"}`.

mod handlers;
mod response;

pub use response::{
    ApiError, ApiResult, CategoriesResponse, CategoryQuestionsResponse, CreatedResponse,
    DeletedResponse, ErrorResponse, QuestionListResponse, QuizResponse, SearchResponse,
};

use crate::database::DatabaseEngine;
use axum::{
    http::{header, Method},
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// State shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Store handle injected into every handler
    pub db: Arc<DatabaseEngine>,
}

impl AppState {
    /// Wrap a store handle
    pub fn new(db: Arc<DatabaseEngine>) -> Self {
        Self { db }
    }
}

/// Build the application router over `db`
pub fn router(db: Arc<DatabaseEngine>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::PUT,
            Method::PATCH,
            Method::POST,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/categories", get(handlers::list_categories))
        .route(
            "/categories/:id/questions",
            get(handlers::category_questions),
        )
        .route(
            "/questions",
            get(handlers::list_questions).post(handlers::post_questions),
        )
        .route("/questions/:id", delete(handlers::delete_question))
        .route("/quizzes", post(handlers::next_quiz_question))
        .fallback(handlers::not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(AppState::new(db))
}
