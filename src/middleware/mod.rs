//! Request gates and the extractors that read what they attach.
//!
//! # Authentication Flow
//!
//! 1. Client sends `Authorization: Bearer <token>`
//! 2. The route table matches the request and attaches its path parameters
//! 3. [`auth::AuthMiddleware`] validates the token and attaches an [`auth::AuthUser`],
//!    or ends the request with 401
//! 4. The handler reads the identity through the `AuthUser` extractor
//!
//! # Example
//!
//! ```ignore
//! use crate::middleware::auth::AuthUser;
//!
//! async fn list_expenses(auth_user: AuthUser) -> impl IntoResponse {
//!     // auth_user.id is the caller's user id
//! }
//! ```

pub mod auth;
