//! Expense domain models and DTOs.
//!
//! [`Expense`] is the row shape read from the database, joined with the
//! category name. [`ExpenseResource`] is what the API returns: the amount as a
//! JSON number and the category nested as `{id, name}`.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

/// Largest value a `NUMERIC(10, 2)` column holds, 99999999.99.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0x540B_E3FF, 2, 0, false, 2);

/// Amounts are stored with two decimals, halves rounded away from zero.
pub fn round_amount(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Expense {
    pub id: i64,
    pub user_id: i64,
    pub category_id: i64,
    pub amount: Decimal,
    pub description: String,
    pub expense_date: NaiveDate,
    pub category_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CategorySummary {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ExpenseResource {
    pub id: i64,
    pub user_id: i64,
    pub category_id: i64,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 42.5)]
    pub amount: Decimal,
    pub description: String,
    pub expense_date: NaiveDate,
    pub category: CategorySummary,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Expense> for ExpenseResource {
    fn from(expense: Expense) -> Self {
        Self {
            id: expense.id,
            user_id: expense.user_id,
            category_id: expense.category_id,
            amount: expense.amount,
            description: expense.description,
            expense_date: expense.expense_date,
            category: CategorySummary {
                id: expense.category_id,
                name: expense.category_name,
            },
            created_at: expense.created_at,
            updated_at: expense.updated_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateExpenseDto {
    #[validate(range(min = 1, message = "Selected category does not exist"))]
    #[schema(example = 1)]
    pub category_id: i64,
    #[validate(custom(function = "validate_amount"))]
    #[schema(value_type = f64, example = 42.5)]
    pub amount: Decimal,
    #[serde(deserialize_with = "trimmed")]
    #[validate(
        custom(function = "validate_description_present"),
        length(max = 255, message = "Description must not exceed 255 characters")
    )]
    #[schema(example = "Lunch with the team")]
    pub description: String,
    #[schema(value_type = String, format = Date, example = "2025-01-31")]
    pub expense_date: NaiveDate,
}

/// Partial update. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateExpenseDto {
    #[validate(range(min = 1, message = "Selected category does not exist"))]
    pub category_id: Option<i64>,
    #[validate(custom(function = "validate_amount"))]
    #[schema(value_type = Option<f64>)]
    pub amount: Option<Decimal>,
    #[serde(default, deserialize_with = "trimmed_opt")]
    #[validate(
        custom(function = "validate_description_present"),
        length(max = 255, message = "Description must not exceed 255 characters")
    )]
    pub description: Option<String>,
    #[schema(value_type = Option<String>, format = Date)]
    pub expense_date: Option<NaiveDate>,
}

impl UpdateExpenseDto {
    pub fn is_empty(&self) -> bool {
        self.category_id.is_none()
            && self.amount.is_none()
            && self.description.is_none()
            && self.expense_date.is_none()
    }
}

fn trimmed<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    String::deserialize(deserializer).map(|s| s.trim().to_string())
}

fn trimmed_opt<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Option::<String>::deserialize(deserializer).map(|s| s.map(|s| s.trim().to_string()))
}

/// Checks the amount as it will be stored, after rounding.
fn validate_amount(amount: &Decimal) -> Result<(), ValidationError> {
    let amount = round_amount(*amount);
    if amount.is_sign_negative() || amount.is_zero() {
        return Err(ValidationError::new("range")
            .with_message("Amount must be greater than zero".into()));
    }
    if amount > MAX_AMOUNT {
        return Err(ValidationError::new("range")
            .with_message("Amount must not exceed 99999999.99".into()));
    }
    Ok(())
}

fn validate_description_present(description: &str) -> Result<(), ValidationError> {
    if description.trim().is_empty() {
        return Err(ValidationError::new("required")
            .with_message("Description is required".into()));
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseSortField {
    #[default]
    Date,
    Amount,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Query string accepted by `GET /api/expenses`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ExpenseFilterParams {
    pub category_id: Option<i64>,
    /// Case-insensitive substring of the description
    pub search: Option<String>,
    pub sort_by: Option<ExpenseSortField>,
    pub sort_order: Option<SortOrder>,
}

/// Repository-level list query.
///
/// `user_id` is optional at the type level so the repository can refuse an
/// unscoped query instead of silently returning every user's expenses.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseFilter {
    pub user_id: Option<i64>,
    pub category_id: Option<i64>,
    pub search: Option<String>,
    pub sort_by: ExpenseSortField,
    pub sort_order: SortOrder,
}

impl ExpenseFilter {
    pub fn for_owner(user_id: i64, params: ExpenseFilterParams) -> Self {
        Self {
            user_id: Some(user_id),
            category_id: params.category_id,
            search: params
                .search
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            sort_by: params.sort_by.unwrap_or_default(),
            sort_order: params.sort_order.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub user_id: i64,
    pub category_id: i64,
    pub amount: Decimal,
    pub description: String,
    pub expense_date: NaiveDate,
}
