/*
 * Responsibility
 * - URL 構造を定義 (/, /questions, /save-answers)
 * - 既存フロントエンドが叩くパスなのでプレフィックスは付けない
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use crate::api::handlers::{answers::save_answers, health::health, questions::list_questions};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(health))
        .route("/questions", get(list_questions))
        .route("/save-answers", post(save_answers))
}
