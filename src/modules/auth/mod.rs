pub mod controller;
pub mod model;
pub mod repository;
pub mod router;
pub mod service;

pub use repository::{PgUserRepository, UserRepository};
pub use router::init_auth_routes;
