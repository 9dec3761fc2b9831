use anyhow::anyhow;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::instrument;

use expense_tracker_core::AppError;
use expense_tracker_models::DataResponse;

use super::model::{Category, CreateCategoryDto};
use super::service::CategoryService;
use crate::modules::auth::controller::ErrorResponse;
use crate::routing::RouteParams;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// List all categories
#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "Categories ordered by id", body = DataResponse<Vec<Category>>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "Categories",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<DataResponse<Vec<Category>>>, AppError> {
    let categories = CategoryService::list(state.categories.as_ref()).await?;
    Ok(Json(DataResponse::new(categories)))
}

/// Create a category
#[utoipa::path(
    post,
    path = "/api/categories",
    request_body = CreateCategoryDto,
    responses(
        (status = 201, description = "Category created", body = DataResponse<Category>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 422, description = "Name is required", body = ErrorResponse)
    ),
    tag = "Categories",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn create_category(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateCategoryDto>,
) -> Result<(StatusCode, Json<DataResponse<Category>>), AppError> {
    let category = CategoryService::create(state.categories.as_ref(), dto).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(category))))
}

/// Delete a category
#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    params(
        ("id" = i64, Path, description = "Category ID")
    ),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Category not found", body = ErrorResponse),
        (status = 409, description = "Category is in use by existing expenses", body = ErrorResponse)
    ),
    tag = "Categories",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_category(
    State(state): State<AppState>,
    params: RouteParams,
) -> Result<StatusCode, AppError> {
    let id = params
        .parse::<i64>("id")
        .ok_or_else(|| AppError::not_found(anyhow!("Category not found")))?;

    CategoryService::delete(state.categories.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
