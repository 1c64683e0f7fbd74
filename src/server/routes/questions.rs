use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_number_from_string;
use sqlx::SqlitePool;

use crate::{
    config::Settings,
    db::{
        queries::{
            categories::{categories_by_id, get_all_categories},
            questions::{self, get_all_questions},
        },
        NewQuestion, Question,
    },
    error::TriviaError,
    server::{
        app::AppState,
        error::{rejected, ApiError, ApiResponse},
    },
    trivia::{page_count, paginate, search_by_substring},
};

#[derive(Deserialize)]
struct PageQuery {
    page: Option<i64>,
}

#[derive(Deserialize)]
struct CreateQuestion {
    question: String,
    answer: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    difficulty: i64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    category: i64,
}

#[derive(Deserialize)]
struct SearchBody {
    #[serde(rename = "searchTerm", default)]
    search_term: Option<String>,
}

#[derive(Serialize)]
struct QuestionsPage {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    categories: BTreeMap<i64, String>,
    current_category: Option<i64>,
}

#[derive(Serialize)]
struct SearchResults {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    current_category: Option<i64>,
}

#[derive(Serialize)]
struct Created {
    success: bool,
    created: i64,
}

#[derive(Serialize)]
struct Deleted {
    success: bool,
    deleted: i64,
}

async fn questions_page(
    State(pool): State<SqlitePool>,
    State(settings): State<Arc<Settings>>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResponse<Json<QuestionsPage>> {
    let Query(PageQuery { page }) = query.map_err(|rej| ApiError::bad_request(rejected(rej)))?;
    let page = page.unwrap_or(1);

    let all = get_all_questions(&pool).await?;
    let page_size = settings.pagination.page_size;
    let target = paginate(&all, page, page_size)?;
    if target.is_empty() {
        return Err(ApiError::not_found(TriviaError::NotFound(format!(
            "page {page} is past the last page ({})",
            page_count(all.len(), page_size)
        ))));
    }
    let categories = get_all_categories(&pool).await?;

    Ok(Json(QuestionsPage {
        success: true,
        questions: target.to_vec(),
        total_questions: all.len(),
        categories: categories_by_id(categories),
        current_category: None,
    }))
}

async fn create_question(
    State(pool): State<SqlitePool>,
    body: Result<Json<CreateQuestion>, JsonRejection>,
) -> ApiResponse<Json<Created>> {
    let Json(body) = body.map_err(|rej| ApiError::unprocessable(rejected(rej)))?;
    let new = NewQuestion {
        question: body.question,
        answer: body.answer,
        difficulty: body.difficulty,
        category: body.category,
    };
    let id = questions::create_question(&pool, &new)
        .await
        .map_err(ApiError::unprocessable)?;
    tracing::info!(id, category = new.category, "Question created");

    Ok(Json(Created {
        success: true,
        created: id,
    }))
}

async fn delete_question(
    State(pool): State<SqlitePool>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResponse<Json<Deleted>> {
    let Path(id) = id.map_err(|rej| ApiError::unprocessable(rejected(rej)))?;
    questions::delete_question(&pool, id)
        .await
        .map_err(ApiError::unprocessable)?;
    tracing::info!(id, "Question deleted");

    Ok(Json(Deleted {
        success: true,
        deleted: id,
    }))
}

async fn search_questions(
    State(pool): State<SqlitePool>,
    body: Result<Json<SearchBody>, JsonRejection>,
) -> ApiResponse<Json<SearchResults>> {
    let Json(body) = body.map_err(|rej| ApiError::not_found(rejected(rej)))?;
    let all = get_all_questions(&pool).await.map_err(ApiError::not_found)?;
    let matches =
        search_by_substring(&all, body.search_term.as_deref()).map_err(ApiError::not_found)?;

    Ok(Json(SearchResults {
        success: true,
        questions: matches.to_owned_questions(),
        total_questions: matches.total,
        current_category: None,
    }))
}

pub fn questions_router() -> Router<AppState> {
    Router::new()
        .route("/questions", get(questions_page).post(create_question))
        .route("/questions/search", post(search_questions))
        .route("/questions/{id}", delete(delete_question))
}
