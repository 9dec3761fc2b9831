use anyhow::anyhow;
use tracing::{info, instrument};

use expense_tracker_core::AppError;

use crate::repository::RepoError;

use super::model::{
    CreateExpenseDto, Expense, ExpenseFilter, ExpenseFilterParams, NewExpense, UpdateExpenseDto,
    round_amount,
};
use super::repository::ExpenseRepository;

/// Every read and write is scoped to the calling user. An expense owned by
/// someone else is reported exactly like a missing one.
pub struct ExpenseService;

fn expense_not_found() -> AppError {
    AppError::not_found(anyhow!("Expense not found"))
}

fn map_write_error(err: RepoError) -> AppError {
    match err {
        RepoError::ForeignKey => {
            AppError::unprocessable(anyhow!("Selected category does not exist"))
        }
        RepoError::CheckViolation => {
            AppError::unprocessable(anyhow!("Amount must be greater than zero"))
        }
        other => other.into(),
    }
}

impl ExpenseService {
    #[instrument(skip(expenses))]
    pub async fn list(
        expenses: &dyn ExpenseRepository,
        user_id: i64,
        params: ExpenseFilterParams,
    ) -> Result<Vec<Expense>, AppError> {
        let filter = ExpenseFilter::for_owner(user_id, params);
        Ok(expenses.list(&filter).await?)
    }

    #[instrument(skip(expenses))]
    pub async fn get(
        expenses: &dyn ExpenseRepository,
        user_id: i64,
        id: i64,
    ) -> Result<Expense, AppError> {
        if !expenses.verify_ownership(id, user_id).await? {
            return Err(expense_not_found());
        }

        expenses.find(id).await?.ok_or_else(expense_not_found)
    }

    #[instrument(skip(expenses, dto))]
    pub async fn create(
        expenses: &dyn ExpenseRepository,
        user_id: i64,
        dto: CreateExpenseDto,
    ) -> Result<Expense, AppError> {
        let expense = expenses
            .create(NewExpense {
                user_id,
                category_id: dto.category_id,
                amount: round_amount(dto.amount),
                description: dto.description.trim().to_string(),
                expense_date: dto.expense_date,
            })
            .await
            .map_err(map_write_error)?;

        info!(
            target: "expense_activity",
            action = "created",
            user_id,
            expense_id = expense.id,
            amount = %expense.amount,
            "Expense created"
        );

        Ok(expense)
    }

    #[instrument(skip(expenses, dto))]
    pub async fn update(
        expenses: &dyn ExpenseRepository,
        user_id: i64,
        id: i64,
        mut dto: UpdateExpenseDto,
    ) -> Result<Expense, AppError> {
        if dto.is_empty() {
            return Err(AppError::unprocessable(anyhow!("No data provided for update")));
        }

        if !expenses.verify_ownership(id, user_id).await? {
            return Err(expense_not_found());
        }

        let previous = expenses.find(id).await?.ok_or_else(expense_not_found)?;

        dto.amount = dto.amount.map(round_amount);
        dto.description = dto.description.map(|d| d.trim().to_string());

        let expense = expenses
            .update(id, &dto)
            .await
            .map_err(map_write_error)?
            .ok_or_else(expense_not_found)?;

        info!(
            target: "expense_activity",
            action = "updated",
            user_id,
            expense_id = expense.id,
            amount = %expense.amount,
            previous_amount = %previous.amount,
            "Expense updated"
        );

        Ok(expense)
    }

    #[instrument(skip(expenses))]
    pub async fn delete(
        expenses: &dyn ExpenseRepository,
        user_id: i64,
        id: i64,
    ) -> Result<(), AppError> {
        if !expenses.verify_ownership(id, user_id).await? {
            return Err(expense_not_found());
        }

        let previous = expenses.find(id).await?.ok_or_else(expense_not_found)?;

        if !expenses.delete(id).await? {
            return Err(expense_not_found());
        }

        info!(
            target: "expense_activity",
            action = "deleted",
            user_id,
            expense_id = id,
            amount = %previous.amount,
            "Expense deleted"
        );

        Ok(())
    }
}
