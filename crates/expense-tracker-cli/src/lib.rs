//! # Expense Tracker CLI
//!
//! Administrative helpers used by the `expense-tracker-cli` binary.

use anyhow::{Context, anyhow, bail};
use sqlx::PgPool;
use validator::{Validate, ValidationErrors};

use expense_tracker_core::hash_password;
use expense_tracker_models::{RegisterRequest, User};

/// Creates a user account with the same rules as `POST /api/register`.
pub async fn create_user(
    pool: &PgPool,
    name: &str,
    email: &str,
    password: &str,
) -> anyhow::Result<User> {
    let request = RegisterRequest {
        name: name.trim().to_string(),
        email: email.trim().to_string(),
        password: password.to_string(),
    };

    if let Err(errors) = request.validate() {
        bail!(validation_message(&errors));
    }

    let hashed_password = hash_password(&request.password)
        .map_err(|e| anyhow!("Failed to hash password: {}", e.error))?;

    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (name, email, password)
         VALUES ($1, $2, $3)
         ON CONFLICT (email) DO NOTHING
         RETURNING id, name, email, email_verified_at, created_at, updated_at",
    )
    .bind(&request.name)
    .bind(&request.email)
    .bind(&hashed_password)
    .fetch_optional(pool)
    .await
    .context("Failed to insert user")?;

    user.ok_or_else(|| anyhow!("Email already exists"))
}

/// Field messages joined in field-name order.
fn validation_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));

    fields
        .iter()
        .flat_map(|(_, errs)| errs.iter())
        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .collect::<Vec<_>>()
        .join(", ")
}
