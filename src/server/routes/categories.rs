use std::collections::BTreeMap;

use axum::{
    extract::{rejection::PathRejection, Path, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{
            categories::{categories_by_id, get_all_categories, get_category},
            questions::get_all_questions,
        },
        Category, Question,
    },
    error::TriviaError,
    server::{
        app::AppState,
        error::{rejected, ApiError, ApiResponse},
    },
    trivia::filter_by_category,
};

#[derive(Serialize)]
struct CategoriesList {
    success: bool,
    categories: BTreeMap<i64, String>,
}

#[derive(Serialize)]
struct CategoryDetail {
    success: bool,
    category: Category,
}

#[derive(Serialize)]
struct CategoryQuestions {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    current_category: i64,
}

async fn list_categories(State(pool): State<SqlitePool>) -> ApiResponse<Json<CategoriesList>> {
    let categories = get_all_categories(&pool).await?;
    if categories.is_empty() {
        return Err(ApiError::not_found(TriviaError::NotFound(
            "no categories".to_owned(),
        )));
    }
    Ok(Json(CategoriesList {
        success: true,
        categories: categories_by_id(categories),
    }))
}

async fn category(
    State(pool): State<SqlitePool>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResponse<Json<CategoryDetail>> {
    let Path(id) = id.map_err(|rej| ApiError::not_found(rejected(rej)))?;
    let category = get_category(&pool, id).await.map_err(ApiError::not_found)?;
    Ok(Json(CategoryDetail {
        success: true,
        category,
    }))
}

async fn questions_for_category(
    State(pool): State<SqlitePool>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResponse<Json<CategoryQuestions>> {
    let Path(id) = id.map_err(|rej| ApiError::not_found(rejected(rej)))?;
    let questions = get_all_questions(&pool).await.map_err(ApiError::not_found)?;
    let matches = filter_by_category(&questions, id);
    tracing::debug!(category = id, total = matches.total, "Filtered questions");

    Ok(Json(CategoryQuestions {
        success: true,
        questions: matches.to_owned_questions(),
        total_questions: matches.total,
        current_category: id,
    }))
}

pub fn categories_router() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list_categories))
        .route("/categories/{id}", get(category))
        .route("/categories/{id}/questions", get(questions_for_category))
}
