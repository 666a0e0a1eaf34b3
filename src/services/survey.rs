//! Survey workflows: shaping the question listing and accepting answer batches.
use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::repos::error::{RepoError, RepoResult};
use crate::repos::store::{NewAnswerRow, QuestionGroupRow, SurveyStore};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    pub id: i32,
    pub group_id: i32,
    pub question: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question_en: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group {
    pub id: i32,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_en: Option<String>,
    pub questions: Vec<Question>,
}

/// Nest joined rows under their group.
///
/// Groups come out in ascending id order. Questions keep the order they arrive in,
/// which is `(group_id, question_id)` for rows produced by [`SurveyStore::list_question_rows`].
pub fn group_questions(rows: Vec<QuestionGroupRow>) -> Vec<Group> {
    let mut groups: BTreeMap<i32, Group> = BTreeMap::new();

    for row in rows {
        let group = groups.entry(row.group_id).or_insert_with(|| Group {
            id: row.group_id,
            name: row.group_name.clone(),
            name_en: row.group_name_en.clone(),
            questions: Vec::new(),
        });

        group.questions.push(Question {
            id: row.question_id,
            group_id: row.group_id,
            question: row.question,
            question_en: row.question_en,
        });
    }

    groups.into_values().collect()
}

pub async fn list_groups(store: &dyn SurveyStore) -> RepoResult<Vec<Group>> {
    let rows = store.list_question_rows().await?;
    tracing::debug!(rows = rows.len(), "loaded question rows");

    Ok(group_questions(rows))
}

/// Emails in first-seen order, each once.
fn distinct_emails(rows: &[NewAnswerRow]) -> Vec<&str> {
    let mut seen = HashSet::new();
    rows.iter()
        .map(|row| row.email.as_str())
        .filter(|email| seen.insert(*email))
        .collect()
}

/// Reject the batch if any respondent already answered, otherwise insert it atomically.
///
/// The existence checks run before the insert transaction opens, so two concurrent
/// batches for the same email can both pass. A unique constraint on `answers.email`
/// turns the loser into `RepoError::Conflict`.
pub async fn submit_answers(store: &dyn SurveyStore, rows: &[NewAnswerRow]) -> RepoResult<()> {
    if rows.is_empty() {
        tracing::debug!("empty answer batch, nothing to save");
        return Ok(());
    }

    let emails = distinct_emails(rows);
    for email in &emails {
        if store.email_exists(email).await? {
            tracing::info!(
                answers = rows.len(),
                "rejected answer batch: respondent already submitted"
            );
            return Err(RepoError::Conflict);
        }
    }

    store.insert_answers(rows).await?;
    tracing::info!(
        answers = rows.len(),
        respondents = emails.len(),
        "answer batch saved"
    );

    Ok(())
}
