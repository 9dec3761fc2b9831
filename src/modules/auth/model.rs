pub use expense_tracker_models::auth::*;
pub use expense_tracker_models::users::{NewUser, User, UserWithPassword};
