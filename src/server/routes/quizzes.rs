use std::collections::HashSet;

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_option_number_from_string;
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{
            categories::get_category,
            questions::{get_all_questions, get_questions_for_category},
        },
        Question,
    },
    server::{
        app::AppState,
        error::{rejected, ApiError, ApiResponse},
    },
    telemetry::QUIZ_CNTR,
    trivia::{next_question, CategorySelector},
};

/// Metric label for category ids with no row in the store.
const UNKNOWN_CATEGORY_LABEL: &str = "unknown";

#[derive(Deserialize)]
struct QuizCategory {
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    id: Option<i64>,
    #[serde(rename = "type", default)]
    kind: Option<String>,
}

#[derive(Deserialize)]
struct QuizRequest {
    // absent on the first round
    #[serde(default)]
    previous_questions: Vec<i64>,
    quiz_category: QuizCategory,
}

#[derive(Serialize)]
struct QuizRound {
    success: bool,
    question: Option<Question>,
}

async fn play_quiz(
    State(pool): State<SqlitePool>,
    body: Result<Json<QuizRequest>, JsonRejection>,
) -> ApiResponse<Json<QuizRound>> {
    let Json(body) = body.map_err(|rej| ApiError::unprocessable(rejected(rej)))?;
    let selector = CategorySelector::from_wire(
        body.quiz_category.id,
        body.quiz_category.kind.as_deref(),
    )
    .map_err(ApiError::unprocessable)?;

    let questions = match selector {
        CategorySelector::All => get_all_questions(&pool).await,
        CategorySelector::Category(id) => get_questions_for_category(&pool, id).await,
    }
    .map_err(ApiError::unprocessable)?;
    let label = metric_label(&pool, selector, &questions).await;

    let seen: HashSet<i64> = body.previous_questions.into_iter().collect();
    let question = next_question(&questions, selector, &seen, &mut rand::rng()).cloned();

    let outcome = if question.is_some() { "served" } else { "exhausted" };
    QUIZ_CNTR.with_label_values(&[label.as_str(), outcome]).inc();
    tracing::debug!(category = %selector, seen = seen.len(), outcome, "Quiz round");

    Ok(Json(QuizRound {
        success: true,
        question,
    }))
}

/// Keeps the label set bounded by the categories actually stored, whatever
/// ids clients send.
async fn metric_label(
    pool: &SqlitePool,
    selector: CategorySelector,
    questions: &[Question],
) -> String {
    match selector {
        CategorySelector::All => selector.to_string(),
        CategorySelector::Category(_) if !questions.is_empty() => selector.to_string(),
        CategorySelector::Category(id) => match get_category(pool, id).await {
            Ok(_) => selector.to_string(),
            Err(_) => UNKNOWN_CATEGORY_LABEL.to_owned(),
        },
    }
}

pub fn quizzes_router() -> Router<AppState> {
    Router::new().route("/quizzes", post(play_quiz))
}
