/*
 * Responsibility
 * - repo が上位に伝える意味の定義
 */
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("{0}")]
    Db(#[from] sqlx::Error),
    #[error("conflict")]
    Conflict,
}

pub type RepoResult<T> = Result<T, RepoError>;

impl RepoError {
    /// A unique violation (SQLSTATE 23505) on `conflict_constraint` means the respondent
    /// already answered. Any other failure, other unique indexes included, is a store failure.
    pub fn from_sqlx(e: sqlx::Error, conflict_constraint: &str) -> Self {
        if let sqlx::Error::Database(dbe) = &e
            && dbe.code().as_deref() == Some("23505")
            && dbe.constraint() == Some(conflict_constraint)
        {
            return RepoError::Conflict;
        }
        RepoError::Db(e)
    }
}
