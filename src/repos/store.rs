//! Store interface used by the survey service.
use async_trait::async_trait;

use crate::repos::error::RepoResult;

/// One row of the questions ⋈ groups join.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct QuestionGroupRow {
    pub question_id: i32,
    pub group_id: i32,
    pub question: String,
    pub question_en: Option<String>,
    pub group_name: String,
    pub group_name_en: Option<String>,
}

/// One answer row to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAnswerRow {
    pub question_id: i32,
    pub answer_id: i32,
    pub full_name: String,
    pub email: String,
    pub role: String,
    pub what_role: Option<String>,
}

/// Data access for questions and answers.
///
/// Implementations must be safe to share across in-flight requests
/// (the Postgres one wraps a `PgPool`; tests use an in-memory store).
#[async_trait]
pub trait SurveyStore: Send + Sync + 'static {
    // All questions joined to their group, ordered by (group_id, question_id).
    async fn list_question_rows(&self) -> RepoResult<Vec<QuestionGroupRow>>;

    // Whether any answer row already carries this email.
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    // Insert every row or none of them.
    //
    // Returns:
    // - `Ok(())` once all rows are committed
    // - `Err(RepoError::Conflict)` on a unique violation (rolled back)
    // - `Err(RepoError::Db(_))` on any other failure (rolled back)
    async fn insert_answers(&self, rows: &[NewAnswerRow]) -> RepoResult<()>;
}
