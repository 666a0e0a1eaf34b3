/*
 * Responsibility
 * - GET /questions の response DTO
 */
use serde::Serialize;

use crate::services::survey::Group;

#[derive(Debug, Serialize)]
pub struct QuestionsResponse {
    pub groups: Vec<Group>,
}
