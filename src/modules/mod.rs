pub mod auth;
pub mod categories;
pub mod expenses;

use crate::routing::{RouteError, Router};
use crate::state::AppState;

/// Registers every API route on `router`, in match order.
pub fn register_routes(router: &mut Router<AppState>) -> Result<(), RouteError> {
    auth::init_auth_routes(router)?;
    categories::init_categories_routes(router)?;
    expenses::init_expenses_routes(router)?;
    Ok(())
}
