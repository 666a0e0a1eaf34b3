/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - store: SurveyStore (本番は PgSurveyRepo, テストは in-memory)
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::repos::store::SurveyStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn SurveyStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn SurveyStore>) -> Self {
        Self { store }
    }
}
