use axum::http::{HeaderValue, Method, header};
use axum::{Json, Router, middleware, routing::get};
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};

use expense_tracker_config::CorsConfig;

use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::middleware::auth::AuthMiddleware;
use crate::modules::register_routes;
use crate::routing::{self, RouteError};
use crate::state::AppState;

/// Path prefixes that require a bearer token.
pub const PROTECTED_PREFIXES: [&str; 3] = ["/api/logout", "/api/categories", "/api/expenses"];

/// Health check
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service is up")
    ),
    tag = "Health"
)]
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
}

/// Builds the route table for `state`, with the bearer gate on every
/// protected prefix.
pub fn init_route_table(state: AppState) -> Result<routing::Router<AppState>, RouteError> {
    let auth = AuthMiddleware::new(state.jwt_config.clone());

    let mut routes = routing::Router::new(state);
    register_routes(&mut routes)?;
    for prefix in PROTECTED_PREFIXES {
        routes.add_middleware(prefix, auth.clone());
    }

    Ok(routes)
}

pub fn init_router(state: AppState) -> Result<Router, RouteError> {
    let cors = cors_layer(&state.cors_config);
    let routes = init_route_table(state)?;

    Ok(Router::new()
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .route(
            "/api-docs/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        )
        .route("/api/health", get(health_check))
        .fallback_service(routes.into_service())
        .layer(cors)
        .layer(middleware::from_fn(logging_middleware)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::InMemoryStore;
    use expense_tracker_config::JwtConfig;
    use std::sync::Arc;

    fn state() -> AppState {
        Arc::new(InMemoryStore::new()).into_app_state(JwtConfig {
            secret: "router-test-secret".to_string(),
            token_ttl_secs: 3_600,
        })
    }

    #[test]
    fn test_route_table_order() {
        let routes = init_route_table(state()).unwrap();

        let table: Vec<String> = routes
            .routes()
            .map(|(method, pattern)| format!("{} {}", method, pattern))
            .collect();

        assert_eq!(
            table,
            vec![
                "POST /api/register",
                "POST /api/login",
                "POST /api/logout",
                "GET /api/categories",
                "POST /api/categories",
                "DELETE /api/categories/{id}",
                "GET /api/expenses",
                "POST /api/expenses",
                "GET /api/expenses/{id}",
                "PUT /api/expenses/{id}",
                "DELETE /api/expenses/{id}",
            ]
        );
    }

    #[test]
    fn test_openapi_documents_every_route() {
        let doc = ApiDoc::openapi();

        for path in [
            "/api/health",
            "/api/register",
            "/api/login",
            "/api/logout",
            "/api/categories",
            "/api/categories/{id}",
            "/api/expenses",
            "/api/expenses/{id}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }
}
