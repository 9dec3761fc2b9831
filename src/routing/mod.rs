//! Declarative route table.
//!
//! Routes are `(method, pattern, handler)` entries matched first-to-last; the
//! first entry whose method matches and whose pattern matches the path wins.
//! Patterns use `{name}` placeholders, each matching one non-empty path segment.
//!
//! Middleware is attached by path prefix and runs only once a route has
//! matched, after the path parameters are attached to the request.
//!
//! ```ignore
//! let mut router = Router::new(state);
//! router
//!     .add_route(Method::GET, "/api/expenses/{id}", get_expense)?
//!     .add_middleware("/api/expenses", AuthMiddleware::new(jwt_config));
//!
//! let app = axum::Router::new().fallback_service(router.into_service());
//! ```

mod params;
mod pattern;
mod router;

use thiserror::Error;

pub use params::RouteParams;
pub use pattern::PathPattern;
pub use router::{Middleware, Router, RouterService};

#[derive(Debug, Error)]
pub enum RouteError {
    #[error("invalid route pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}
