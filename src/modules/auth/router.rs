use axum::http::Method;

use crate::routing::{RouteError, Router};
use crate::state::AppState;

use super::controller::{login, logout, register};

pub fn init_auth_routes(router: &mut Router<AppState>) -> Result<(), RouteError> {
    router
        .add_route(Method::POST, "/api/register", register)?
        .add_route(Method::POST, "/api/login", login)?
        .add_route(Method::POST, "/api/logout", logout)?;
    Ok(())
}
