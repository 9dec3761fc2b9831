pub mod controller;
pub mod model;
pub mod repository;
pub mod router;
pub mod service;

pub use repository::{CategoryRepository, PgCategoryRepository};
pub use router::init_categories_routes;
