use async_trait::async_trait;
use sqlx::PgPool;

use crate::repository::RepoResult;

use super::model::Category;

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn list(&self) -> RepoResult<Vec<Category>>;

    async fn find(&self, id: i64) -> RepoResult<Option<Category>>;

    async fn create(&self, name: &str) -> RepoResult<Category>;

    /// Returns `false` when no row was deleted. A category still referenced by
    /// expenses is reported as `RepoError::ForeignKey`.
    async fn delete(&self, id: i64) -> RepoResult<bool>;
}

#[derive(Debug, Clone)]
pub struct PgCategoryRepository {
    pool: PgPool,
}

impl PgCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn list(&self) -> RepoResult<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, name, created_at, updated_at FROM categories ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    async fn find(&self, id: i64) -> RepoResult<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT id, name, created_at, updated_at FROM categories WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    async fn create(&self, name: &str) -> RepoResult<Category> {
        let category = sqlx::query_as::<_, Category>(
            r#"INSERT INTO categories (name)
               VALUES ($1)
               RETURNING id, name, created_at, updated_at"#,
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(category)
    }

    async fn delete(&self, id: i64) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
