#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::SqlitePool;
use tower::ServiceExt;
use trivia_api::config::Settings;
use trivia_api::db::queries::categories::create_category;
use trivia_api::db::queries::questions::create_question;
use trivia_api::db::{establish_in_memory, run_migrations, NewQuestion};
use trivia_api::server::{build_router, AppState};

pub async fn empty_pool() -> SqlitePool {
    let pool = establish_in_memory().await.unwrap();
    run_migrations(&pool).await.unwrap();
    pool
}

/// Categories 1 "Science" and 2 "Art"; questions 1 and 2 in category 1,
/// question 3 in category 2.
pub async fn seeded_pool() -> SqlitePool {
    let pool = empty_pool().await;
    create_category(&pool, 1, "Science").await.unwrap();
    create_category(&pool, 2, "Art").await.unwrap();
    add_question(&pool, "What is the heaviest organ in the human body?", "The Liver", 1).await;
    add_question(&pool, "Who discovered penicillin?", "Alexander Fleming", 1).await;
    add_question(&pool, "Which Dutch graphic artist was a creator of optical illusions?", "Escher", 2).await;
    pool
}

pub async fn add_question(pool: &SqlitePool, question: &str, answer: &str, category: i64) -> i64 {
    create_question(
        pool,
        &NewQuestion {
            question: question.to_owned(),
            answer: answer.to_owned(),
            difficulty: 2,
            category,
        },
    )
    .await
    .unwrap()
}

pub fn app(pool: SqlitePool) -> Router {
    build_router(AppState::new(pool, Settings::default()))
}

pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            request = request.header("content-type", "application/json");
            Body::from(serde_json::to_string(&json).unwrap())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(request.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, "GET", uri, None).await
}

pub async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, "POST", uri, Some(body)).await
}

pub async fn delete(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, "DELETE", uri, None).await
}

pub fn ids(questions: &Value) -> Vec<i64> {
    questions
        .as_array()
        .unwrap()
        .iter()
        .map(|q| q["id"].as_i64().unwrap())
        .collect()
}
