//! Integration tests for the HTTP API
//!
//! Drives the full router (extractors → handlers → DuckDB store) in memory.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::collections::HashSet;
use std::sync::Arc;
use tower::ServiceExt;
use trivia_api::api;
use trivia_api::config::SeedData;
use trivia_api::database::DatabaseEngine;
use trivia_api::types::{Category, NewQuestion};

// ============================================================================
// Fixtures
// ============================================================================

const GEOGRAPHY: i64 = 3;

fn category(id: i64, name: &str) -> Category {
    Category {
        id,
        name: name.to_string(),
    }
}

fn question(text: String, category: i64) -> NewQuestion {
    NewQuestion {
        question: text,
        answer: "answer".to_string(),
        difficulty: 2,
        category,
    }
}

/// Six categories; `geography` questions in category 3 (ids 1..=geography),
/// then two Science and one Art question.
fn seeded_db(geography: usize) -> Arc<DatabaseEngine> {
    let mut questions: Vec<NewQuestion> = (1..=geography)
        .map(|n| question(format!("Geography question {n}?"), GEOGRAPHY))
        .collect();
    questions.push(question("What is the heaviest organ?".to_string(), 1));
    questions.push(question("What movie earned Tom Hanks his third title?".to_string(), 1));
    questions.push(question("Which Dutch painter cut off his ear?".to_string(), 2));

    let seed = SeedData {
        categories: vec![
            category(1, "Science"),
            category(2, "Art"),
            category(3, "Geography"),
            category(4, "History"),
            category(5, "Entertainment"),
            category(6, "Sports"),
        ],
        questions,
    };

    let db = DatabaseEngine::open_in_memory().unwrap();
    db.load_seed(&seed).unwrap();
    Arc::new(db)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

fn ids(value: &Value) -> Vec<i64> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|q| q["id"].as_i64().unwrap())
        .collect()
}

fn assert_error(status: StatusCode, body: &Value, code: u16, message: &str) {
    assert_eq!(status.as_u16(), code);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], code);
    assert_eq!(body["message"], message);
}

// ============================================================================
// Categories
// ============================================================================

#[tokio::test]
async fn test_get_categories() {
    let app = api::router(seeded_db(3));
    let (status, body) = send(&app, Method::GET, "/categories", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["categories"].as_object().unwrap().len(), 6);
    assert_eq!(body["categories"]["3"], "Geography");
}

#[tokio::test]
async fn test_404_get_categories_empty_store() {
    let app = api::router(Arc::new(DatabaseEngine::open_in_memory().unwrap()));
    let (status, body) = send(&app, Method::GET, "/categories", None).await;
    assert_error(status, &body, 404, "resource not found");
}

#[tokio::test]
async fn test_404_unknown_route() {
    let app = api::router(seeded_db(3));
    let (status, body) = send(&app, Method::GET, "/categories/1000", None).await;
    assert_error(status, &body, 404, "resource not found");
}

// ============================================================================
// Question Listing
// ============================================================================

#[tokio::test]
async fn test_get_paginated_questions() {
    let app = api::router(seeded_db(12));
    let (status, body) = send(&app, Method::GET, "/questions", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(ids(&body["questions"]), (1..=10).collect::<Vec<i64>>());
    assert_eq!(body["total_questions"], 15);
    assert_eq!(body["categories"]["1"], "Science");
}

#[tokio::test]
async fn test_get_last_partial_page() {
    let app = api::router(seeded_db(12));
    let (status, body) = send(&app, Method::GET, "/questions?page=2", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body["questions"]), vec![11, 12, 13, 14, 15]);
}

#[tokio::test]
async fn test_404_get_questions_beyond_valid_page() {
    let app = api::router(seeded_db(3));
    let (status, body) = send(&app, Method::GET, "/questions?page=500", None).await;
    assert_error(status, &body, 404, "resource not found");
}

#[tokio::test]
async fn test_400_invalid_page_numbers() {
    let app = api::router(seeded_db(3));
    for uri in ["/questions?page=0", "/questions?page=-1", "/questions?page=two"] {
        let (status, body) = send(&app, Method::GET, uri, None).await;
        assert_error(status, &body, 400, "bad request");
    }
}

#[tokio::test]
async fn test_get_questions_by_category_second_page() {
    let app = api::router(seeded_db(12));
    let (status, body) = send(&app, Method::GET, "/categories/3/questions?page=2", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(ids(&body["questions"]), vec![11, 12]);
    assert_eq!(body["total_questions"], 15);
    assert_eq!(body["current_category"], "Geography");
}

#[tokio::test]
async fn test_get_questions_by_empty_category() {
    let app = api::router(seeded_db(3));
    let (status, body) = send(&app, Method::GET, "/categories/6/questions", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["questions"].as_array().unwrap().is_empty());
    assert_eq!(body["current_category"], "Sports");

    let (status, body) = send(&app, Method::GET, "/categories/6/questions?page=2", None).await;
    assert_error(status, &body, 404, "resource not found");
}

#[tokio::test]
async fn test_404_get_questions_by_unknown_category() {
    let app = api::router(seeded_db(3));
    let (status, body) = send(&app, Method::GET, "/categories/3500/questions", None).await;
    assert_error(status, &body, 404, "resource not found");
}

// ============================================================================
// Delete
// ============================================================================

#[tokio::test]
async fn test_delete_question() {
    let db = seeded_db(3);
    let app = api::router(db.clone());
    let (status, body) = send(&app, Method::DELETE, "/questions/2", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["deleted"], 2);
    assert_eq!(body["total_questions"], 5);
    assert!(!ids(&body["questions"]).contains(&2));
    assert!(db.get_question(2).unwrap().is_none());
}

#[tokio::test]
async fn test_delete_refresh_page_may_be_empty() {
    let app = api::router(seeded_db(8));
    // 11 questions: page 2 holds only id 11
    let (status, body) = send(&app, Method::DELETE, "/questions/11?page=2", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deleted"], 11);
    assert!(body["questions"].as_array().unwrap().is_empty());
    assert_eq!(body["total_questions"], 10);
}

#[tokio::test]
async fn test_422_delete_non_existent_question() {
    let app = api::router(seeded_db(3));
    let (status, body) = send(&app, Method::DELETE, "/questions/1599", None).await;
    assert_error(status, &body, 422, "unprocessable");
}

#[tokio::test]
async fn test_404_delete_non_numeric_id() {
    let app = api::router(seeded_db(3));
    let (status, body) = send(&app, Method::DELETE, "/questions/abc", None).await;
    assert_error(status, &body, 404, "resource not found");
}

// ============================================================================
// Create
// ============================================================================

#[tokio::test]
async fn test_create_new_question() {
    let db = seeded_db(3);
    let app = api::router(db.clone());
    let before = db.count_questions().unwrap();

    let new_question = json!({
        "question": "Name the largest ocean in the world?",
        "answer": "Pacific",
        "difficulty": 2,
        "category": "3"
    });
    let (status, body) = send(&app, Method::POST, "/questions", Some(new_question)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["created"], 7);
    assert_eq!(body["total_questions"], 7);
    assert_eq!(db.count_questions().unwrap(), before + 1);

    let stored = db.get_question(7).unwrap().unwrap();
    assert_eq!(stored.answer, "Pacific");
    assert_eq!(stored.category, GEOGRAPHY);
}

#[tokio::test]
async fn test_create_total_counts_whole_sequence() {
    let app = api::router(seeded_db(12));
    let new_question = json!({
        "question": "Which river flows through Cairo?",
        "answer": "The Nile",
        "difficulty": 1,
        "category": GEOGRAPHY
    });
    let (status, body) = send(&app, Method::POST, "/questions", Some(new_question)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["created"], 16);
    assert_eq!(body["questions"].as_array().unwrap().len(), 10);
    assert_eq!(body["total_questions"], 16);
}

#[tokio::test]
async fn test_422_create_new_question_failure() {
    let db = seeded_db(3);
    let app = api::router(db.clone());
    let before = db.count_questions().unwrap();

    let (status, body) = send(&app, Method::POST, "/questions", Some(json!({}))).await;
    assert_error(status, &body, 422, "unprocessable");
    assert_eq!(db.count_questions().unwrap(), before);
}

#[tokio::test]
async fn test_422_create_missing_answer() {
    let app = api::router(seeded_db(3));
    let body = json!({"question": "Who?", "difficulty": 1, "category": 1});
    let (status, body) = send(&app, Method::POST, "/questions", Some(body)).await;
    assert_error(status, &body, 422, "unprocessable");
}

#[tokio::test]
async fn test_422_create_unknown_category() {
    let db = seeded_db(3);
    let app = api::router(db.clone());
    let body = json!({"question": "Who?", "answer": "Me", "difficulty": 1, "category": 99});
    let (status, body) = send(&app, Method::POST, "/questions", Some(body)).await;

    assert_error(status, &body, 422, "unprocessable");
    assert_eq!(db.count_questions().unwrap(), 6);
}

#[tokio::test]
async fn test_422_create_wrong_field_type() {
    let app = api::router(seeded_db(3));
    let body = json!({"question": ["not", "text"], "answer": "A", "difficulty": 1, "category": 1});
    let (status, body) = send(&app, Method::POST, "/questions", Some(body)).await;
    assert_error(status, &body, 422, "unprocessable");
}

#[tokio::test]
async fn test_400_malformed_json() {
    let app = api::router(seeded_db(3));
    let request = Request::builder()
        .method(Method::POST)
        .uri("/questions")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"question\": "))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ============================================================================
// Search
// ============================================================================

#[tokio::test]
async fn test_search_question() {
    let app = api::router(seeded_db(3));
    let (status, body) = send(
        &app,
        Method::POST,
        "/questions",
        Some(json!({"searchTerm": "TITLE"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(ids(&body["questions"]), vec![5]);
    assert_eq!(body["total_questions"], 6);
}

#[tokio::test]
async fn test_404_search_question_failure() {
    let app = api::router(seeded_db(3));
    let (status, body) = send(
        &app,
        Method::POST,
        "/questions",
        Some(json!({"searchTerm": "invalidsearchterm"})),
    )
    .await;
    assert_error(status, &body, 404, "resource not found");
}

// ============================================================================
// Quizzes
// ============================================================================

#[tokio::test]
async fn test_random_question_selection_quiz() {
    let app = api::router(seeded_db(3));
    let round = json!({
        "previous_questions": [],
        "quiz_category": {"id": 3, "type": "Geography"}
    });
    let (status, body) = send(&app, Method::POST, "/quizzes", Some(round)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["question"]["category"], GEOGRAPHY);
}

#[tokio::test]
async fn test_quiz_category_id_as_string() {
    let app = api::router(seeded_db(3));
    let round = json!({
        "previous_questions": [1, 2],
        "quiz_category": {"id": "3", "type": "Geography"}
    });
    let (status, body) = send(&app, Method::POST, "/quizzes", Some(round)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["question"]["id"], 3);
    assert_eq!(body["question"]["category"], GEOGRAPHY);
}

#[tokio::test]
async fn test_quiz_category_exhausted() {
    let app = api::router(seeded_db(3));
    let round = json!({
        "previous_questions": [1, 2, 3],
        "quiz_category": {"id": 3, "type": "Geography"}
    });
    let (status, body) = send(&app, Method::POST, "/quizzes", Some(round)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["question"], Value::Null);
}

#[tokio::test]
async fn test_quiz_all_categories_session() {
    let app = api::router(seeded_db(3));
    let mut previous: Vec<i64> = Vec::new();

    loop {
        let round = json!({
            "previous_questions": previous,
            "quiz_category": {"id": 0, "type": "click"}
        });
        let (status, body) = send(&app, Method::POST, "/quizzes", Some(round)).await;
        assert_eq!(status, StatusCode::OK);

        let Some(id) = body["question"]["id"].as_i64() else {
            break;
        };
        assert!(!previous.contains(&id));
        previous.push(id);
    }

    let asked: HashSet<i64> = previous.into_iter().collect();
    assert_eq!(asked, (1..=6).collect::<HashSet<i64>>());
}

#[tokio::test]
async fn test_422_random_question_selection_quiz_failure() {
    let app = api::router(seeded_db(3));
    let (status, body) = send(&app, Method::POST, "/quizzes", Some(json!({}))).await;
    assert_error(status, &body, 422, "unprocessable");

    let round = json!({"previous_questions": [], "quiz_category": {"type": "Art"}});
    let (status, body) = send(&app, Method::POST, "/quizzes", Some(round)).await;
    assert_error(status, &body, 422, "unprocessable");
}

#[tokio::test]
async fn test_404_quiz_unknown_category() {
    let app = api::router(seeded_db(3));
    let round = json!({"previous_questions": [], "quiz_category": {"id": 77}});
    let (status, body) = send(&app, Method::POST, "/quizzes", Some(round)).await;
    assert_error(status, &body, 404, "resource not found");
}

// ============================================================================
// Misc
// ============================================================================

#[tokio::test]
async fn test_health() {
    let app = api::router(seeded_db(0));
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_cors_headers() {
    let app = api::router(seeded_db(3));
    let request = Request::builder()
        .method(Method::GET)
        .uri("/categories")
        .header(header::ORIGIN, "http://localhost:3000")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "*"
    );
}
