use anyhow::anyhow;
use axum::{
    extract::{FromRequestParts, Request},
    http::{HeaderMap, header, request::Parts},
    response::{IntoResponse, Response},
};
use tracing::debug;

use expense_tracker_auth::verify_token;
use expense_tracker_config::JwtConfig;
use expense_tracker_core::AppError;

use crate::routing::Middleware;

/// The authenticated caller, attached to the request by [`AuthMiddleware`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: i64,
    pub email: String,
}

/// Bearer-token gate.
///
/// Missing or non-`Bearer ` headers are rejected with `401 Unauthorized`; a
/// token that fails verification is rejected with `401 Invalid token`.
#[derive(Debug, Clone)]
pub struct AuthMiddleware {
    jwt_config: JwtConfig,
}

impl AuthMiddleware {
    pub fn new(jwt_config: JwtConfig) -> Self {
        Self { jwt_config }
    }

    pub fn authenticate(&self, headers: &HeaderMap) -> Result<AuthUser, AppError> {
        let token = headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or_else(|| AppError::unauthorized(anyhow!("Unauthorized")))?;

        let claims = verify_token(token, &self.jwt_config)?;

        // `sub` must be a numeric user id
        let id = claims
            .sub
            .parse::<i64>()
            .map_err(|_| AppError::unauthorized(anyhow!("Invalid token")))?;

        Ok(AuthUser {
            id,
            email: claims.email,
        })
    }
}

impl Middleware for AuthMiddleware {
    fn handle(&self, req: &mut Request) -> Option<Response> {
        match self.authenticate(req.headers()) {
            Ok(user) => {
                req.extensions_mut().insert(user);
                None
            }
            Err(err) => {
                debug!(path = %req.uri().path(), reason = %err.error, "Authentication rejected");
                Some(err.into_response())
            }
        }
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(|| AppError::unauthorized(anyhow!("Unauthorized")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, StatusCode};
    use expense_tracker_auth::{Claims, create_access_token, encode_claims};

    fn config() -> JwtConfig {
        JwtConfig {
            secret: "middleware-test-secret".to_string(),
            token_ttl_secs: 3_600,
        }
    }

    fn headers(authorization: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(authorization).unwrap(),
        );
        headers
    }

    fn rejection(result: Result<AuthUser, AppError>) -> (StatusCode, String) {
        let err = result.unwrap_err();
        (err.status, err.error.to_string())
    }

    #[test]
    fn test_valid_token_yields_user() {
        let middleware = AuthMiddleware::new(config());
        let token = create_access_token(5, "ada@example.com", &config()).unwrap();

        let user = middleware
            .authenticate(&headers(&format!("Bearer {}", token)))
            .unwrap();

        assert_eq!(
            user,
            AuthUser {
                id: 5,
                email: "ada@example.com".to_string()
            }
        );
    }

    #[test]
    fn test_missing_header_is_unauthorized() {
        let middleware = AuthMiddleware::new(config());

        assert_eq!(
            rejection(middleware.authenticate(&HeaderMap::new())),
            (StatusCode::UNAUTHORIZED, "Unauthorized".to_string())
        );
    }

    #[test]
    fn test_non_bearer_scheme_is_unauthorized() {
        let middleware = AuthMiddleware::new(config());
        let token = create_access_token(5, "ada@example.com", &config()).unwrap();

        for value in [format!("Basic {}", token), format!("bearer {}", token), token] {
            assert_eq!(
                rejection(middleware.authenticate(&headers(&value))),
                (StatusCode::UNAUTHORIZED, "Unauthorized".to_string())
            );
        }
    }

    #[test]
    fn test_bad_token_is_invalid() {
        let middleware = AuthMiddleware::new(config());

        assert_eq!(
            rejection(middleware.authenticate(&headers("Bearer not.a.token"))),
            (StatusCode::UNAUTHORIZED, "Invalid token".to_string())
        );
    }

    #[test]
    fn test_non_numeric_subject_is_invalid() {
        let middleware = AuthMiddleware::new(config());
        let mut claims = Claims::new(1, "ada@example.com", 0, 0);
        claims.sub = "not-a-user".to_string();
        claims.iat = chrono::Utc::now().timestamp() as usize;
        claims.exp = claims.iat + 600;
        let token = encode_claims(&claims, &config()).unwrap();

        assert_eq!(
            rejection(middleware.authenticate(&headers(&format!("Bearer {}", token)))),
            (StatusCode::UNAUTHORIZED, "Invalid token".to_string())
        );
    }

    #[tokio::test]
    async fn test_extractor_without_attachment_is_unauthorized() {
        let (mut parts, _) = Request::new(axum::body::Body::empty()).into_parts();

        let err = AuthUser::from_request_parts(&mut parts, &()).await.unwrap_err();

        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    }
}
