use async_trait::async_trait;
use sqlx::PgPool;

use crate::repository::RepoResult;

use super::model::{NewUser, User, UserWithPassword};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<UserWithPassword>>;

    /// Inserts a user. A duplicate email is reported as `RepoError::Conflict`.
    async fn create(&self, user: NewUser) -> RepoResult<User>;
}

#[derive(Debug, Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<UserWithPassword>> {
        let user = sqlx::query_as::<_, UserWithPassword>(
            r#"SELECT id, name, email, email_verified_at, password, created_at, updated_at
               FROM users
               WHERE email = $1"#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn create(&self, user: NewUser) -> RepoResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"INSERT INTO users (name, email, password)
               VALUES ($1, $2, $3)
               RETURNING id, name, email, email_verified_at, created_at, updated_at"#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }
}
