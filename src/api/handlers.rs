//! Route handlers
//!
//! Each handler validates its typed input, runs one or two store operations
//! and hands the records to the paginator or the quiz selector.

use super::response::{
    mutation_failure, ApiError, ApiResult, CategoriesResponse, CategoryQuestionsResponse,
    CreatedResponse, DeletedResponse, QuestionListResponse, QuizResponse, SearchResponse,
};
use super::AppState;
use crate::database::QuestionFilter;
use crate::error::Error;
use crate::pagination::{page_of, PageRequest, FIRST_PAGE};
use crate::quiz::{select_next, CategoryFilter, QuizRequest};
use crate::types::{category_map, QuestionId, QuestionsPostBody};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use serde_json::{json, Value};

fn page_request(query: Result<Query<PageRequest>, QueryRejection>) -> ApiResult<PageRequest> {
    let Query(request) = query?;
    Ok(request.validate()?)
}

/// Health check endpoint
pub async fn health(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    state.db.check_connection()?;
    Ok(Json(json!({ "status": "ok" })))
}

/// `GET /categories`
pub async fn list_categories(State(state): State<AppState>) -> ApiResult<Json<CategoriesResponse>> {
    let categories = state.db.list_categories()?;
    if categories.is_empty() {
        return Err(Error::not_found("categories").into());
    }

    Ok(Json(CategoriesResponse {
        success: true,
        categories: category_map(&categories),
    }))
}

/// `GET /questions?page=N`
pub async fn list_questions(
    State(state): State<AppState>,
    query: Result<Query<PageRequest>, QueryRejection>,
) -> ApiResult<Json<QuestionListResponse>> {
    let request = page_request(query)?;

    let questions = state.db.list_questions(&QuestionFilter::all())?;
    let page = page_of(&questions, request);
    if page.is_empty() {
        return Err(Error::not_found(format!("questions page {}", request.page)).into());
    }

    let categories = state.db.list_categories()?;

    Ok(Json(QuestionListResponse {
        success: true,
        questions: page.items,
        total_questions: page.total,
        categories: category_map(&categories),
    }))
}

/// `DELETE /questions/:id?page=N`
///
/// Answers with the refreshed page, which may legitimately be empty.
pub async fn delete_question(
    State(state): State<AppState>,
    id: Result<Path<QuestionId>, PathRejection>,
    query: Result<Query<PageRequest>, QueryRejection>,
) -> ApiResult<Json<DeletedResponse>> {
    let Path(id) = id?;
    let request = page_request(query)?;

    let deleted = state.db.delete_question(id).map_err(mutation_failure)?;
    if !deleted {
        return Err(Error::unprocessable(format!("question {id} does not exist")).into());
    }

    let questions = state
        .db
        .list_questions(&QuestionFilter::all())
        .map_err(mutation_failure)?;
    let page = page_of(&questions, request);

    Ok(Json(DeletedResponse {
        success: true,
        deleted: id,
        questions: page.items,
        total_questions: page.total,
    }))
}

/// `POST /questions`: search when the body has `searchTerm`, create otherwise
pub async fn post_questions(
    State(state): State<AppState>,
    query: Result<Query<PageRequest>, QueryRejection>,
    body: Result<Json<QuestionsPostBody>, JsonRejection>,
) -> ApiResult<axum::response::Response> {
    use axum::response::IntoResponse;

    let request = page_request(query)?;
    let Json(body) = body?;

    if let Some(term) = body.search_term() {
        let term = term.to_string();
        return Ok(search_questions(&state, &term, request)?.into_response());
    }
    Ok(create_question(&state, body, request)?.into_response())
}

fn search_questions(
    state: &AppState,
    term: &str,
    request: PageRequest,
) -> ApiResult<Json<SearchResponse>> {
    let matches = state.db.list_questions(&QuestionFilter::search(term))?;
    let page = page_of(&matches, request);
    if page.is_empty() {
        return Err(Error::not_found(format!("questions matching '{term}'")).into());
    }

    tracing::debug!(term, matches = page.total, "Searched questions");

    Ok(Json(SearchResponse {
        success: true,
        questions: page.items,
        total_questions: state.db.count_questions()?,
    }))
}

fn create_question(
    state: &AppState,
    body: QuestionsPostBody,
    request: PageRequest,
) -> ApiResult<Json<CreatedResponse>> {
    let new = body.into_new_question()?;
    let id = state.db.insert_question(&new).map_err(mutation_failure)?;

    let questions = state
        .db
        .list_questions(&QuestionFilter::all())
        .map_err(mutation_failure)?;
    let page = page_of(&questions, request);

    Ok(Json(CreatedResponse {
        success: true,
        created: id,
        questions: page.items,
        total_questions: page.total,
    }))
}

/// `GET /categories/:id/questions?page=N`
pub async fn category_questions(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    query: Result<Query<PageRequest>, QueryRejection>,
) -> ApiResult<Json<CategoryQuestionsResponse>> {
    let Path(id) = id?;
    let request = page_request(query)?;

    let category = state
        .db
        .get_category(id)?
        .ok_or_else(|| Error::not_found(format!("category {id}")))?;

    let questions = state.db.list_questions(&QuestionFilter::category(id))?;
    let page = page_of(&questions, request);
    if page.is_empty() && request.page > FIRST_PAGE {
        return Err(Error::not_found(format!(
            "category {id} questions page {}",
            request.page
        ))
        .into());
    }

    Ok(Json(CategoryQuestionsResponse {
        success: true,
        questions: page.items,
        total_questions: state.db.count_questions()?,
        current_category: category.name,
    }))
}

/// `POST /quizzes`: one step of a quiz session
pub async fn next_quiz_question(
    State(state): State<AppState>,
    body: Result<Json<QuizRequest>, JsonRejection>,
) -> ApiResult<Json<QuizResponse>> {
    let Json(body) = body?;
    let round = body.validate()?;

    let filter = match round.category {
        CategoryFilter::All => QuestionFilter::all(),
        CategoryFilter::Only(id) => {
            if state.db.get_category(id)?.is_none() {
                return Err(Error::not_found(format!("category {id}")).into());
            }
            QuestionFilter::category(id)
        }
    };

    let questions = state.db.list_questions(&filter)?;
    let question = select_next(&questions, &round, &mut rand::thread_rng()).into_question();

    tracing::debug!(
        category = %round.category,
        asked = round.excluded.len(),
        exhausted = question.is_none(),
        "Quiz step"
    );

    Ok(Json(QuizResponse {
        success: true,
        question,
    }))
}

/// Fallback for unknown routes
pub async fn not_found() -> ApiError {
    Error::not_found("route").into()
}
