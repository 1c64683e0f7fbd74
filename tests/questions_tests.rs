mod common;

use axum::http::StatusCode;
use serde_json::json;
use trivia_api::db::queries::questions::count_questions;

#[tokio::test]
async fn test_get_paginated_questions() {
    let app = common::app(common::seeded_pool().await);
    let (status, data) = common::get(&app, "/questions").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(data["success"], true);
    assert_eq!(common::ids(&data["questions"]), vec![1, 2, 3]);
    assert_eq!(data["total_questions"], 3);
    assert_eq!(data["categories"], json!({"1": "Science", "2": "Art"}));
    assert_eq!(data["current_category"], json!(null));
}

#[tokio::test]
async fn test_pages_hold_ten_questions() {
    let pool = common::empty_pool().await;
    for n in 1..=25 {
        common::add_question(&pool, &format!("Question {n}?"), "Answer", 1).await;
    }
    let app = common::app(pool);

    let (_, first) = common::get(&app, "/questions?page=1").await;
    assert_eq!(common::ids(&first["questions"]), (1..=10).collect::<Vec<i64>>());
    assert_eq!(first["total_questions"], 25);

    let (status, last) = common::get(&app, "/questions?page=3").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(common::ids(&last["questions"]), (21..=25).collect::<Vec<i64>>());
}

#[tokio::test]
async fn test_not_found_questions() {
    let app = common::app(common::seeded_pool().await);
    let (status, data) = common::get(&app, "/questions?page=5000").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(data["success"], false);
    assert_eq!(data["message"], "Page Not Found");
}

#[tokio::test]
async fn test_invalid_page_is_bad_request() {
    let app = common::app(common::seeded_pool().await);

    for uri in ["/questions?page=0", "/questions?page=-2", "/questions?page=two"] {
        let (status, data) = common::get(&app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(data["error"], 400);
        assert_eq!(data["message"], "Bad Request");
    }
}

#[tokio::test]
async fn test_add_new_question() {
    let pool = common::seeded_pool().await;
    let app = common::app(pool.clone());
    let (status, data) = common::post(
        &app,
        "/questions",
        json!({
            "question": "How Are You ?",
            "answer": "Fine, Thank You!",
            "difficulty": 1,
            "category": "1"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(data["success"], true);
    assert_eq!(data["created"], 4);
    assert_eq!(count_questions(&pool).await.unwrap(), 4);
}

#[tokio::test]
async fn test_unprocessable_add_new_question() {
    let pool = common::seeded_pool().await;
    let app = common::app(pool.clone());

    // missing category and difficulty
    let (status, data) = common::post(
        &app,
        "/questions",
        json!({"question": "How Are You ?", "answer": "Fine, Thank You!"}),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(data["success"], false);
    assert_eq!(data["message"], "Unprocessable Entity");

    assert_eq!(count_questions(&pool).await.unwrap(), 3);
}

#[tokio::test]
async fn test_empty_text_is_not_stored() {
    let pool = common::seeded_pool().await;
    let app = common::app(pool.clone());

    for body in [
        json!({"question": "", "answer": "Fine", "difficulty": 1, "category": 1}),
        json!({"question": "How Are You ?", "answer": "", "difficulty": 1, "category": 1}),
    ] {
        let (status, data) = common::post(&app, "/questions", body).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(data["error"], 422);
    }
    assert_eq!(count_questions(&pool).await.unwrap(), 3);
}

#[tokio::test]
async fn test_delete_question() {
    let pool = common::seeded_pool().await;
    let id = common::add_question(&pool, "How Are You ?", "Fine, Thank You!", 1).await;
    let app = common::app(pool.clone());

    let (status, data) = common::delete(&app, &format!("/questions/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(data["success"], true);
    assert_eq!(data["deleted"], id);
    assert_eq!(count_questions(&pool).await.unwrap(), 3);
}

#[tokio::test]
async fn test_unprocessable_delete_question() {
    let pool = common::seeded_pool().await;
    let app = common::app(pool.clone());

    let (status, data) = common::delete(&app, "/questions/5000").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(data["success"], false);
    assert_eq!(data["message"], "Unprocessable Entity");

    let (status, _) = common::delete(&app, "/questions/abc").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    assert_eq!(count_questions(&pool).await.unwrap(), 3);
}

#[tokio::test]
async fn test_search_questions() {
    let app = common::app(common::seeded_pool().await);
    let (status, data) =
        common::post(&app, "/questions/search", json!({"searchTerm": "PENICILLIN"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(data["success"], true);
    assert_eq!(common::ids(&data["questions"]), vec![2]);
    assert_eq!(data["total_questions"], 1);
    assert_eq!(data["current_category"], json!(null));
}

#[tokio::test]
async fn test_search_without_hits_is_empty() {
    let app = common::app(common::seeded_pool().await);
    let (status, data) =
        common::post(&app, "/questions/search", json!({"searchTerm": "xylophone"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(data["success"], true);
    assert_eq!(data["questions"], json!([]));
    assert_eq!(data["total_questions"], 0);
}

#[tokio::test]
async fn test_not_found_search_question() {
    let app = common::app(common::seeded_pool().await);

    for body in [json!({"searchTerm": ""}), json!({})] {
        let (status, data) = common::post(&app, "/questions/search", body).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(data["success"], false);
        assert_eq!(data["message"], "Page Not Found");
    }
}

#[tokio::test]
async fn test_unknown_route_and_method() {
    let app = common::app(common::seeded_pool().await);

    let (status, data) = common::get(&app, "/nothing/here").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(data["success"], false);

    let (status, _) = common::send(&app, "PUT", "/categories", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}
