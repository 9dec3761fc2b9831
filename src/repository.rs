//! Errors shared by every repository.
//!
//! Repositories report what went wrong in storage terms; services decide which
//! HTTP status that becomes.

use thiserror::Error;

const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";
const CHECK_VIOLATION: &str = "23514";

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("db error")]
    Db(#[source] sqlx::Error),
    #[error("unique constraint violated")]
    Conflict,
    #[error("foreign key constraint violated")]
    ForeignKey,
    #[error("check constraint violated")]
    CheckViolation,
    #[error("expense list query has no owner scope")]
    MissingOwnerScope,
}

pub type RepoResult<T> = Result<T, RepoError>;

impl From<sqlx::Error> for RepoError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(dbe) = &e {
            match dbe.code().as_deref() {
                Some(UNIQUE_VIOLATION) => return RepoError::Conflict,
                Some(FOREIGN_KEY_VIOLATION) => return RepoError::ForeignKey,
                Some(CHECK_VIOLATION) => return RepoError::CheckViolation,
                _ => {}
            }
        }
        RepoError::Db(e)
    }
}
