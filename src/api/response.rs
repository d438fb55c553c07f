//! Typed response bodies and the JSON error envelope

use crate::error::{Error, ErrorKind};
use crate::types::{CategoryMap, Question, QuestionId};
use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

// ============================================================================
// Success Bodies
// ============================================================================

/// `GET /categories`
#[derive(Debug, Serialize, Deserialize)]
pub struct CategoriesResponse {
    pub success: bool,
    pub categories: CategoryMap,
}

/// `GET /questions`
#[derive(Debug, Serialize, Deserialize)]
pub struct QuestionListResponse {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub categories: CategoryMap,
}

/// `GET /categories/:id/questions`
#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryQuestionsResponse {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub current_category: String,
}

/// `POST /questions` with a search term
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: usize,
}

/// `POST /questions` creating a question
#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub success: bool,
    pub created: QuestionId,
    pub questions: Vec<Question>,
    pub total_questions: usize,
}

/// `DELETE /questions/:id`
#[derive(Debug, Serialize, Deserialize)]
pub struct DeletedResponse {
    pub success: bool,
    pub deleted: QuestionId,
    pub questions: Vec<Question>,
    pub total_questions: usize,
}

/// `POST /quizzes`; `question` is null once the session is exhausted
#[derive(Debug, Serialize, Deserialize)]
pub struct QuizResponse {
    pub success: bool,
    pub question: Option<Question>,
}

// ============================================================================
// Error Envelope
// ============================================================================

/// `{"success": false, "error": <code>, "message": <string>}`
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: u16,
    pub message: String,
}

impl ErrorResponse {
    fn for_kind(kind: ErrorKind) -> Self {
        Self {
            success: false,
            error: kind.status_code(),
            message: kind.message().to_string(),
        }
    }
}

/// Handler error, rendered as the JSON error envelope
#[derive(Debug)]
pub struct ApiError(pub Error);

/// Result type for handlers
pub type ApiResult<T> = std::result::Result<T, ApiError>;

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self(Error::bad_request(rejection.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self(Error::not_found(format!("path ({})", rejection.body_text())))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(e) => Self(Error::unprocessable(e.body_text())),
            other => Self(Error::bad_request(other.body_text())),
        }
    }
}

impl ApiError {
    /// Client-facing kind
    pub fn kind(&self) -> ErrorKind {
        self.0.kind()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let kind = self.kind();
        if kind == ErrorKind::InternalFailure {
            tracing::error!("Request failed: {}", self.0);
        } else {
            tracing::debug!("Request rejected ({}): {}", kind.status_code(), self.0);
        }

        let status =
            StatusCode::from_u16(kind.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(ErrorResponse::for_kind(kind))).into_response()
    }
}

/// Convert a store failure on a mutating endpoint into `Unprocessable`
///
/// Validation and lookup failures keep their own kind.
pub(crate) fn mutation_failure(err: Error) -> Error {
    if err.kind() == ErrorKind::InternalFailure {
        tracing::error!("Mutation rolled back: {}", err);
        Error::unprocessable(err.to_string())
    } else {
        err
    }
}
