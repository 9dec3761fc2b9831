//! # Expense Tracker Core
//!
//! Foundational types shared by every crate in the workspace:
//!
//! - [`errors`]: the application error type and its JSON response rendering
//! - [`password`]: bcrypt password hashing and verification
//!
//! # Example
//!
//! ```ignore
//! use expense_tracker_core::{AppError, hash_password, verify_password};
//!
//! let error = AppError::not_found(anyhow::anyhow!("Expense not found"));
//!
//! let hash = hash_password("password1")?;
//! assert!(verify_password("password1", &hash)?);
//! ```

pub mod errors;
pub mod password;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use password::{hash_password, verify_password};
