use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::repository::{RepoError, RepoResult};

use super::model::{
    Expense, ExpenseFilter, ExpenseSortField, NewExpense, SortOrder, UpdateExpenseDto,
};

#[async_trait]
pub trait ExpenseRepository: Send + Sync {
    /// Lists expenses matching `filter`. A filter without `user_id` is refused
    /// with `RepoError::MissingOwnerScope`.
    async fn list(&self, filter: &ExpenseFilter) -> RepoResult<Vec<Expense>>;

    async fn find(&self, id: i64) -> RepoResult<Option<Expense>>;

    async fn verify_ownership(&self, id: i64, user_id: i64) -> RepoResult<bool>;

    async fn create(&self, expense: NewExpense) -> RepoResult<Expense>;

    /// Applies the fields present in `changes`. Returns `None` if the row is gone.
    async fn update(&self, id: i64, changes: &UpdateExpenseDto) -> RepoResult<Option<Expense>>;

    async fn delete(&self, id: i64) -> RepoResult<bool>;
}

/// Escapes `%`, `_` and `\` so `term` matches literally inside `ILIKE`.
pub(crate) fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

const SELECT_EXPENSE: &str = r#"SELECT e.id, e.user_id, e.category_id, e.amount, e.description,
       e.expense_date, c.name AS category_name, e.created_at, e.updated_at
FROM expenses e
JOIN categories c ON c.id = e.category_id"#;

#[derive(Debug, Clone)]
pub struct PgExpenseRepository {
    pool: PgPool,
}

impl PgExpenseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ExpenseRepository for PgExpenseRepository {
    async fn list(&self, filter: &ExpenseFilter) -> RepoResult<Vec<Expense>> {
        let user_id = filter.user_id.ok_or(RepoError::MissingOwnerScope)?;

        let mut query: QueryBuilder<Postgres> = QueryBuilder::new(SELECT_EXPENSE);
        query.push(" WHERE e.user_id = ").push_bind(user_id);

        if let Some(category_id) = filter.category_id {
            query.push(" AND e.category_id = ").push_bind(category_id);
        }

        if let Some(search) = &filter.search {
            query
                .push(" AND e.description ILIKE ")
                .push_bind(like_pattern(search));
        }

        let column = match filter.sort_by {
            ExpenseSortField::Date => "e.expense_date",
            ExpenseSortField::Amount => "e.amount",
        };
        let direction = match filter.sort_order {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        };
        query.push(format!(" ORDER BY {column} {direction}, e.id {direction}"));

        let expenses = query
            .build_query_as::<Expense>()
            .fetch_all(&self.pool)
            .await?;

        Ok(expenses)
    }

    async fn find(&self, id: i64) -> RepoResult<Option<Expense>> {
        let expense = sqlx::query_as::<_, Expense>(&format!("{SELECT_EXPENSE} WHERE e.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(expense)
    }

    async fn verify_ownership(&self, id: i64, user_id: i64) -> RepoResult<bool> {
        let owned = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM expenses WHERE id = $1 AND user_id = $2)",
        )
        .bind(id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(owned)
    }

    async fn create(&self, expense: NewExpense) -> RepoResult<Expense> {
        let created = sqlx::query_as::<_, Expense>(
            r#"WITH inserted AS (
                   INSERT INTO expenses (user_id, category_id, amount, description, expense_date)
                   VALUES ($1, $2, $3, $4, $5)
                   RETURNING *
               )
               SELECT e.id, e.user_id, e.category_id, e.amount, e.description,
                      e.expense_date, c.name AS category_name, e.created_at, e.updated_at
               FROM inserted e
               JOIN categories c ON c.id = e.category_id"#,
        )
        .bind(expense.user_id)
        .bind(expense.category_id)
        .bind(expense.amount)
        .bind(&expense.description)
        .bind(expense.expense_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn update(&self, id: i64, changes: &UpdateExpenseDto) -> RepoResult<Option<Expense>> {
        let updated = sqlx::query_as::<_, Expense>(
            r#"WITH updated AS (
                   UPDATE expenses
                   SET category_id = COALESCE($2, category_id),
                       amount = COALESCE($3, amount),
                       description = COALESCE($4, description),
                       expense_date = COALESCE($5, expense_date),
                       updated_at = NOW()
                   WHERE id = $1
                   RETURNING *
               )
               SELECT e.id, e.user_id, e.category_id, e.amount, e.description,
                      e.expense_date, c.name AS category_name, e.created_at, e.updated_at
               FROM updated e
               JOIN categories c ON c.id = e.category_id"#,
        )
        .bind(id)
        .bind(changes.category_id)
        .bind(changes.amount)
        .bind(changes.description.as_deref())
        .bind(changes.expense_date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    async fn delete(&self, id: i64) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM expenses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("lunch"), "%lunch%");
        assert_eq!(like_pattern("50%_off\\"), "%50\\%\\_off\\\\%");
    }
}
