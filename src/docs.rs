use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use expense_tracker_models::{
    AuthResponse, Category, CategorySummary, CreateCategoryDto, CreateExpenseDto,
    ExpenseResource, ExpenseSortField, LoginRequest, MessageResponse, RegisterRequest, SortOrder,
    UpdateExpenseDto, User,
};

use crate::modules::auth::controller::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::router::health_check,
        crate::modules::auth::controller::register,
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::logout,
        crate::modules::categories::controller::list_categories,
        crate::modules::categories::controller::create_category,
        crate::modules::categories::controller::delete_category,
        crate::modules::expenses::controller::list_expenses,
        crate::modules::expenses::controller::create_expense,
        crate::modules::expenses::controller::get_expense,
        crate::modules::expenses::controller::update_expense,
        crate::modules::expenses::controller::delete_expense,
    ),
    components(
        schemas(
            User,
            RegisterRequest,
            LoginRequest,
            AuthResponse,
            MessageResponse,
            ErrorResponse,
            Category,
            CreateCategoryDto,
            CategorySummary,
            ExpenseResource,
            CreateExpenseDto,
            UpdateExpenseDto,
            ExpenseSortField,
            SortOrder,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness probe"),
        (name = "Authentication", description = "Registration, login and logout"),
        (name = "Categories", description = "Expense categories shared by all users"),
        (name = "Expenses", description = "The caller's own expenses")
    ),
    info(
        title = "Expense Tracker API",
        version = "0.1.0",
        description = "Personal expense tracking REST API built with Rust, Axum, and PostgreSQL.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
