use axum::http::Method;

use crate::routing::{RouteError, Router};
use crate::state::AppState;

use super::controller::{create_category, delete_category, list_categories};

pub fn init_categories_routes(router: &mut Router<AppState>) -> Result<(), RouteError> {
    router
        .add_route(Method::GET, "/api/categories", list_categories)?
        .add_route(Method::POST, "/api/categories", create_category)?
        .add_route(Method::DELETE, "/api/categories/{id}", delete_category)?;
    Ok(())
}
