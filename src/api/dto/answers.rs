/*
 * Responsibility
 * - POST /save-answers の request/response DTO
 * - validate() で形式チェック (deserialize で拾えないもの)
 */
use serde::{Deserialize, Serialize};

use crate::repos::store::NewAnswerRow;

#[derive(Debug, Deserialize)]
pub struct SaveAnswersRequest {
    pub answers: Vec<AnswerSubmission>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnswerSubmission {
    #[serde(alias = "question_id")]
    pub id_question: i32,
    pub answer: AnswerChoice,
    pub full_name: String,
    pub email: String,
    pub role: String,
    // Only stored when the schema has an `answers.what_role` column.
    #[serde(default)]
    pub what_role: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnswerChoice {
    pub id: i32,
    pub value: String,
}

impl SaveAnswersRequest {
    pub fn validate(&self) -> Result<(), String> {
        for (i, answer) in self.answers.iter().enumerate() {
            if answer.email.trim().is_empty() {
                return Err(format!("answers[{i}].email is required"));
            }
        }

        Ok(())
    }

    pub fn into_rows(self) -> Vec<NewAnswerRow> {
        self.answers
            .into_iter()
            .map(|a| NewAnswerRow {
                question_id: a.id_question,
                answer_id: a.answer.id,
                full_name: a.full_name,
                email: a.email,
                role: a.role,
                what_role: a.what_role,
            })
            .collect()
    }
}

#[derive(Debug, Serialize)]
pub struct SaveAnswersResponse {
    pub status: &'static str,
}

impl SaveAnswersResponse {
    pub fn saved() -> Self {
        Self {
            status: "answers saved",
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn parse(value: serde_json::Value) -> Result<SaveAnswersRequest, serde_json::Error> {
        serde_json::from_value(value)
    }

    #[test]
    fn accepts_both_question_key_spellings() {
        let req = parse(json!({
            "answers": [
                {"id_question": 1, "answer": {"id": 2, "value": "yes"},
                 "full_name": "A B", "email": "a@x.com", "role": "eng"},
                {"question_id": 3, "answer": {"id": 4, "value": "no"},
                 "full_name": "A B", "email": "a@x.com", "role": "eng", "what_role": "qa"}
            ]
        }))
        .unwrap();

        let rows = req.into_rows();
        assert_eq!(rows[0].question_id, 1);
        assert_eq!(rows[0].answer_id, 2);
        assert_eq!(rows[0].what_role, None);
        assert_eq!(rows[1].question_id, 3);
        assert_eq!(rows[1].what_role.as_deref(), Some("qa"));
    }

    #[test]
    fn missing_required_field_fails_to_deserialize() {
        let err = parse(json!({
            "answers": [{"id_question": 1, "answer": {"id": 2, "value": "yes"},
                         "full_name": "A B", "role": "eng"}]
        }));
        assert!(err.is_err());
    }

    #[test]
    fn blank_email_is_rejected() {
        let req = parse(json!({
            "answers": [
                {"id_question": 1, "answer": {"id": 2, "value": "yes"},
                 "full_name": "A B", "email": "a@x.com", "role": "eng"},
                {"id_question": 2, "answer": {"id": 2, "value": "yes"},
                 "full_name": "A B", "email": "  ", "role": "eng"}
            ]
        }))
        .unwrap();

        assert_eq!(req.validate().unwrap_err(), "answers[1].email is required");
    }

    #[test]
    fn empty_batch_is_valid() {
        let req = parse(json!({"answers": []})).unwrap();
        assert!(req.validate().is_ok());
        assert!(req.into_rows().is_empty());
    }
}
