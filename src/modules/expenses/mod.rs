pub mod controller;
pub mod model;
pub mod repository;
pub mod router;
pub mod service;

pub use repository::{ExpenseRepository, PgExpenseRepository};
pub use router::init_expenses_routes;
