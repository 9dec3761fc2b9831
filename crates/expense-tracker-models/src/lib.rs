//! # Expense Tracker Models
//!
//! Domain models and DTOs for the Expense Tracker API.
//!
//! # Modules
//!
//! - [`auth`]: registration and login payloads
//! - [`categories`]: expense categories
//! - [`expenses`]: expense rows, API resources, filters and write DTOs
//! - [`response`]: the `{ "data": ... }` envelope
//! - [`users`]: user accounts
//!
//! # Example
//!
//! ```ignore
//! use expense_tracker_models::expenses::{Expense, ExpenseResource};
//!
//! let resource = ExpenseResource::from(expense);
//! assert_eq!(resource.category.id, resource.category_id);
//! ```

pub mod auth;
pub mod categories;
pub mod expenses;
pub mod response;
pub mod users;

// Re-export commonly used types at crate root for convenience
pub use auth::{AuthResponse, LoginRequest, MessageResponse, RegisterRequest};
pub use categories::{Category, CreateCategoryDto};
pub use expenses::{
    CategorySummary, CreateExpenseDto, Expense, ExpenseFilter, ExpenseFilterParams,
    ExpenseResource, ExpenseSortField, NewExpense, SortOrder, UpdateExpenseDto,
};
pub use response::DataResponse;
pub use users::{NewUser, User, UserWithPassword};
