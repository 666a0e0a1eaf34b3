/*
 * Responsibility
 * - POST /save-answers
 * - body の形式チェック → 重複メールチェック → 一括 INSERT (all-or-nothing)
 */
use axum::{Json, extract::State};

use crate::{
    api::{
        dto::answers::{SaveAnswersRequest, SaveAnswersResponse},
        extractors::ApiJson,
    },
    error::AppError,
    services::survey,
    state::AppState,
};

pub async fn save_answers(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<SaveAnswersRequest>,
) -> Result<Json<SaveAnswersResponse>, AppError> {
    req.validate().map_err(AppError::bad_request)?;

    let rows = req.into_rows();
    survey::submit_answers(state.store.as_ref(), &rows).await?;

    Ok(Json(SaveAnswersResponse::saved()))
}
