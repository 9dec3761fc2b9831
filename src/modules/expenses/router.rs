use axum::http::Method;

use crate::routing::{RouteError, Router};
use crate::state::AppState;

use super::controller::{
    create_expense, delete_expense, get_expense, list_expenses, update_expense,
};

pub fn init_expenses_routes(router: &mut Router<AppState>) -> Result<(), RouteError> {
    router
        .add_route(Method::GET, "/api/expenses", list_expenses)?
        .add_route(Method::POST, "/api/expenses", create_expense)?
        .add_route(Method::GET, "/api/expenses/{id}", get_expense)?
        .add_route(Method::PUT, "/api/expenses/{id}", update_expense)?
        .add_route(Method::DELETE, "/api/expenses/{id}", delete_expense)?;
    Ok(())
}
