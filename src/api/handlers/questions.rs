/*
 * Responsibility
 * - GET /questions
 * - join 結果を group ごとにまとめて返す
 */
use axum::{Json, extract::State};

use crate::{
    api::dto::questions::QuestionsResponse, error::AppError, services::survey, state::AppState,
};

pub async fn list_questions(
    State(state): State<AppState>,
) -> Result<Json<QuestionsResponse>, AppError> {
    let groups = survey::list_groups(state.store.as_ref()).await?;

    Ok(Json(QuestionsResponse { groups }))
}
