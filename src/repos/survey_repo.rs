/*
 * Responsibility
 * - questions / groups / answers テーブル向け SQLx 操作
 * - SchemaVariant に合わせて列を切り替える (name_en, question_en, what_role)
 * - answers の一括 INSERT は 1 トランザクションで行う
 */
use async_trait::async_trait;
use sqlx::PgPool;

use crate::config::SchemaVariant;
use crate::repos::error::{RepoError, RepoResult};
use crate::repos::store::{NewAnswerRow, QuestionGroupRow, SurveyStore};

const LIST_TRANSLATED_SQL: &str = r#"
    SELECT
        q.id AS question_id,
        q.id_group AS group_id,
        q.question,
        q.question_en,
        g.name AS group_name,
        g.name_en AS group_name_en
    FROM questions q
    JOIN groups g ON q.id_group = g.id
    ORDER BY q.id_group, q.id
"#;

const LIST_BASIC_SQL: &str = r#"
    SELECT
        q.id AS question_id,
        q.id_group AS group_id,
        q.question,
        NULL::text AS question_en,
        g.name AS group_name,
        NULL::text AS group_name_en
    FROM questions q
    JOIN groups g ON q.id_group = g.id
    ORDER BY q.id_group, q.id
"#;

const INSERT_TRANSLATED_SQL: &str = r#"
    INSERT INTO answers (id_question, answer, full_name, email, role, what_role)
    VALUES ($1, $2, $3, $4, $5, $6)
"#;

const INSERT_BASIC_SQL: &str = r#"
    INSERT INTO answers (id_question, answer, full_name, email, role)
    VALUES ($1, $2, $3, $4, $5)
"#;

#[derive(Clone, Debug)]
pub struct PgSurveyRepo {
    pool: PgPool,
    schema: SchemaVariant,
    // Unique constraint whose violation means "this email already answered".
    email_constraint: String,
}

impl PgSurveyRepo {
    pub fn new(pool: PgPool, schema: SchemaVariant, email_constraint: impl Into<String>) -> Self {
        Self {
            pool,
            schema,
            email_constraint: email_constraint.into(),
        }
    }

    fn classify(&self, e: sqlx::Error) -> RepoError {
        RepoError::from_sqlx(e, &self.email_constraint)
    }
}

#[async_trait]
impl SurveyStore for PgSurveyRepo {
    async fn list_question_rows(&self) -> RepoResult<Vec<QuestionGroupRow>> {
        let sql = if self.schema.has_translations() {
            LIST_TRANSLATED_SQL
        } else {
            LIST_BASIC_SQL
        };

        let rows = sqlx::query_as::<_, QuestionGroupRow>(sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM answers WHERE email = $1)
            "#,
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn insert_answers(&self, rows: &[NewAnswerRow]) -> RepoResult<()> {
        let mut tx = self.pool.begin().await?;

        // Returning early drops `tx`, which rolls the whole batch back.
        for row in rows {
            let query = if self.schema.has_translations() {
                sqlx::query(INSERT_TRANSLATED_SQL)
                    .bind(row.question_id)
                    .bind(row.answer_id)
                    .bind(&row.full_name)
                    .bind(&row.email)
                    .bind(&row.role)
                    .bind(row.what_role.as_deref().unwrap_or(""))
            } else {
                sqlx::query(INSERT_BASIC_SQL)
                    .bind(row.question_id)
                    .bind(row.answer_id)
                    .bind(&row.full_name)
                    .bind(&row.email)
                    .bind(&row.role)
            };

            query
                .execute(&mut *tx)
                .await
                .map_err(|e| self.classify(e))?;
        }

        tx.commit().await.map_err(|e| self.classify(e))?;

        Ok(())
    }
}
