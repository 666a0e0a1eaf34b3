//! Shared helpers for the HTTP tests: an in-memory `SurveyStore` and request plumbing.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use serde_json::Value;
use tower::util::ServiceExt;

use survey_api::{
    app::build_router,
    config::Config,
    repos::{
        error::{RepoError, RepoResult},
        store::{NewAnswerRow, QuestionGroupRow, SurveyStore},
    },
    state::AppState,
};

/// Behaves like the Postgres repo: ordered reads, all-or-nothing inserts.
#[derive(Default)]
pub struct InMemoryStore {
    questions: Vec<QuestionGroupRow>,
    answers: Mutex<Vec<NewAnswerRow>>,
    // Zero-based index of the row whose insert fails.
    fail_insert_at: Option<usize>,
    unavailable: bool,
    unique_emails: bool,
    read_delay: Option<Duration>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_question(mut self, id: i32, group_id: i32, group_name: &str) -> Self {
        self.questions.push(QuestionGroupRow {
            question_id: id,
            group_id,
            question: format!("Question {id}"),
            question_en: None,
            group_name: group_name.to_string(),
            group_name_en: None,
        });
        self
    }

    pub fn with_translated_question(
        mut self,
        id: i32,
        group_id: i32,
        group_name: &str,
        group_name_en: &str,
    ) -> Self {
        self.questions.push(QuestionGroupRow {
            question_id: id,
            group_id,
            question: format!("Pregunta {id}"),
            question_en: Some(format!("Question {id}")),
            group_name: group_name.to_string(),
            group_name_en: Some(group_name_en.to_string()),
        });
        self
    }

    pub fn with_answer_from(self, email: &str) -> Self {
        self.answers
            .lock()
            .unwrap()
            .push(answer_row(1, email));
        self
    }

    pub fn failing_insert_at(mut self, index: usize) -> Self {
        self.fail_insert_at = Some(index);
        self
    }

    pub fn unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }

    pub fn with_read_delay(mut self, delay: Duration) -> Self {
        self.read_delay = Some(delay);
        self
    }

    // Mirrors a UNIQUE constraint on answers.email.
    pub fn with_unique_emails(mut self) -> Self {
        self.unique_emails = true;
        self
    }

    pub fn answers(&self) -> Vec<NewAnswerRow> {
        self.answers.lock().unwrap().clone()
    }

    fn check_available(&self) -> RepoResult<()> {
        if self.unavailable {
            return Err(RepoError::Db(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl SurveyStore for InMemoryStore {
    async fn list_question_rows(&self) -> RepoResult<Vec<QuestionGroupRow>> {
        self.check_available()?;
        if let Some(delay) = self.read_delay {
            tokio::time::sleep(delay).await;
        }

        let mut rows = self.questions.clone();
        rows.sort_by_key(|r| (r.group_id, r.question_id));
        Ok(rows)
    }

    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        self.check_available()?;

        Ok(self.answers.lock().unwrap().iter().any(|a| a.email == email))
    }

    async fn insert_answers(&self, rows: &[NewAnswerRow]) -> RepoResult<()> {
        self.check_available()?;

        let mut committed = self.answers.lock().unwrap();
        let mut staged = committed.clone();
        for (i, row) in rows.iter().enumerate() {
            if self.fail_insert_at == Some(i) {
                return Err(RepoError::Db(sqlx::Error::Protocol(format!(
                    "insert {i} failed"
                ))));
            }
            if self.unique_emails && staged.iter().any(|a| a.email == row.email) {
                return Err(RepoError::Conflict);
            }
            staged.push(row.clone());
        }
        *committed = staged;

        Ok(())
    }
}

pub fn answer_row(question_id: i32, email: &str) -> NewAnswerRow {
    NewAnswerRow {
        question_id,
        answer_id: 2,
        full_name: "A B".to_string(),
        email: email.to_string(),
        role: "eng".to_string(),
        what_role: None,
    }
}

pub fn test_config() -> Config {
    config_with(&[])
}

/// Test config with `DATABASE_URL` filled in plus the given overrides.
pub fn config_with(overrides: &[(&str, &str)]) -> Config {
    Config::from_lookup(|key| {
        overrides
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.to_string())
            .or_else(|| (key == "DATABASE_URL").then(|| "postgres://unused/survey".to_string()))
    })
    .unwrap()
}

pub fn router(store: Arc<InMemoryStore>) -> Router {
    build_router(AppState::new(store), &test_config())
}

pub fn router_with(store: Arc<InMemoryStore>, overrides: &[(&str, &str)]) -> Router {
    build_router(AppState::new(store), &config_with(overrides))
}

pub async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let res = app.oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    post_raw(uri, body.to_string())
}

pub fn post_raw(uri: &str, body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap()
}
