use anyhow::anyhow;
use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use tracing::instrument;

use expense_tracker_core::AppError;
use expense_tracker_models::DataResponse;

use super::model::{CreateExpenseDto, ExpenseFilterParams, ExpenseResource, UpdateExpenseDto};
use super::service::ExpenseService;
use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::routing::RouteParams;
use crate::state::AppState;
use crate::validator::ValidatedJson;

fn expense_id(params: &RouteParams) -> Result<i64, AppError> {
    params
        .parse::<i64>("id")
        .ok_or_else(|| AppError::not_found(anyhow!("Expense not found")))
}

/// List the caller's expenses
#[utoipa::path(
    get,
    path = "/api/expenses",
    params(ExpenseFilterParams),
    responses(
        (status = 200, description = "Expenses owned by the caller", body = DataResponse<Vec<ExpenseResource>>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 422, description = "Invalid query parameters", body = ErrorResponse)
    ),
    tag = "Expenses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user, query), fields(user_id = auth_user.id))]
pub async fn list_expenses(
    State(state): State<AppState>,
    auth_user: AuthUser,
    query: Result<Query<ExpenseFilterParams>, QueryRejection>,
) -> Result<Json<DataResponse<Vec<ExpenseResource>>>, AppError> {
    let Query(params) =
        query.map_err(|_| AppError::unprocessable(anyhow!("Invalid query parameters")))?;

    let expenses = ExpenseService::list(state.expenses.as_ref(), auth_user.id, params).await?;
    let data: Vec<ExpenseResource> = expenses.into_iter().map(ExpenseResource::from).collect();

    Ok(Json(DataResponse::new(data)))
}

/// Create an expense
#[utoipa::path(
    post,
    path = "/api/expenses",
    request_body = CreateExpenseDto,
    responses(
        (status = 201, description = "Expense created", body = DataResponse<ExpenseResource>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 422, description = "Missing or invalid fields", body = ErrorResponse)
    ),
    tag = "Expenses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user, dto), fields(user_id = auth_user.id))]
pub async fn create_expense(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateExpenseDto>,
) -> Result<(StatusCode, Json<DataResponse<ExpenseResource>>), AppError> {
    let expense = ExpenseService::create(state.expenses.as_ref(), auth_user.id, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new(ExpenseResource::from(expense))),
    ))
}

/// Get one of the caller's expenses
#[utoipa::path(
    get,
    path = "/api/expenses/{id}",
    params(
        ("id" = i64, Path, description = "Expense ID")
    ),
    responses(
        (status = 200, description = "Expense found", body = DataResponse<ExpenseResource>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Expense not found", body = ErrorResponse)
    ),
    tag = "Expenses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.id))]
pub async fn get_expense(
    State(state): State<AppState>,
    auth_user: AuthUser,
    params: RouteParams,
) -> Result<Json<DataResponse<ExpenseResource>>, AppError> {
    let id = expense_id(&params)?;
    let expense = ExpenseService::get(state.expenses.as_ref(), auth_user.id, id).await?;
    Ok(Json(DataResponse::new(expense.into())))
}

/// Update one of the caller's expenses
#[utoipa::path(
    put,
    path = "/api/expenses/{id}",
    params(
        ("id" = i64, Path, description = "Expense ID")
    ),
    request_body = UpdateExpenseDto,
    responses(
        (status = 200, description = "Expense updated", body = DataResponse<ExpenseResource>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Expense not found", body = ErrorResponse),
        (status = 422, description = "No data provided or invalid fields", body = ErrorResponse)
    ),
    tag = "Expenses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user, dto), fields(user_id = auth_user.id))]
pub async fn update_expense(
    State(state): State<AppState>,
    auth_user: AuthUser,
    params: RouteParams,
    ValidatedJson(dto): ValidatedJson<UpdateExpenseDto>,
) -> Result<Json<DataResponse<ExpenseResource>>, AppError> {
    let id = expense_id(&params)?;
    let expense = ExpenseService::update(state.expenses.as_ref(), auth_user.id, id, dto).await?;
    Ok(Json(DataResponse::new(expense.into())))
}

/// Delete one of the caller's expenses
#[utoipa::path(
    delete,
    path = "/api/expenses/{id}",
    params(
        ("id" = i64, Path, description = "Expense ID")
    ),
    responses(
        (status = 204, description = "Expense deleted"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Expense not found", body = ErrorResponse)
    ),
    tag = "Expenses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.id))]
pub async fn delete_expense(
    State(state): State<AppState>,
    auth_user: AuthUser,
    params: RouteParams,
) -> Result<StatusCode, AppError> {
    let id = expense_id(&params)?;
    ExpenseService::delete(state.expenses.as_ref(), auth_user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
