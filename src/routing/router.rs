use std::convert::Infallible;
use std::future::Future;
use std::marker::PhantomData;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use anyhow::anyhow;
use axum::{
    extract::Request,
    handler::Handler,
    http::Method,
    response::{IntoResponse, Response},
};
use tower::Service;
use tracing::debug;

use expense_tracker_core::AppError;

use super::RouteError;
use super::pattern::PathPattern;

type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send + 'static>>;

/// A request gate attached to a path prefix.
///
/// Returning `Some(response)` ends the request with that response; the route
/// handler is not called. Returning `None` lets the request continue.
pub trait Middleware: Send + Sync + 'static {
    fn handle(&self, req: &mut Request) -> Option<Response>;
}

impl<F> Middleware for F
where
    F: Fn(&mut Request) -> Option<Response> + Send + Sync + 'static,
{
    fn handle(&self, req: &mut Request) -> Option<Response> {
        self(req)
    }
}

trait ErasedHandler<S>: Send + Sync {
    fn call(&self, req: Request, state: S) -> BoxFuture<Response>;
}

struct HandlerFn<H, T> {
    handler: H,
    _marker: PhantomData<fn() -> T>,
}

impl<H, T, S> ErasedHandler<S> for HandlerFn<H, T>
where
    H: Handler<T, S> + Sync,
    T: 'static,
    S: Clone + Send + Sync + 'static,
{
    fn call(&self, req: Request, state: S) -> BoxFuture<Response> {
        Box::pin(Handler::call(self.handler.clone(), req, state))
    }
}

struct Route<S> {
    method: Method,
    pattern: PathPattern,
    handler: Box<dyn ErasedHandler<S>>,
}

struct MiddlewareEntry {
    prefix: String,
    middleware: Box<dyn Middleware>,
}

pub struct Router<S> {
    state: S,
    routes: Vec<Route<S>>,
    middleware: Vec<MiddlewareEntry>,
}

impl<S> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn new(state: S) -> Self {
        Self {
            state,
            routes: Vec::new(),
            middleware: Vec::new(),
        }
    }

    /// Appends a route. Earlier routes take precedence over later ones.
    pub fn add_route<H, T>(
        &mut self,
        method: Method,
        pattern: &str,
        handler: H,
    ) -> Result<&mut Self, RouteError>
    where
        H: Handler<T, S> + Sync,
        T: 'static,
    {
        let pattern = PathPattern::compile(pattern)?;
        self.routes.push(Route {
            method,
            pattern,
            handler: Box::new(HandlerFn {
                handler,
                _marker: PhantomData,
            }),
        });
        Ok(self)
    }

    /// Runs `middleware` for every matched request whose path starts with `prefix`.
    pub fn add_middleware<M>(&mut self, prefix: &str, middleware: M) -> &mut Self
    where
        M: Middleware,
    {
        self.middleware.push(MiddlewareEntry {
            prefix: prefix.to_string(),
            middleware: Box::new(middleware),
        });
        self
    }

    /// Registered routes as `(method, pattern)`, in match order.
    pub fn routes(&self) -> impl Iterator<Item = (&Method, &str)> {
        self.routes.iter().map(|r| (&r.method, r.pattern.as_str()))
    }

    pub async fn dispatch(&self, mut req: Request) -> Response {
        let path = req.uri().path().to_string();

        let matched = self.routes.iter().find_map(|route| {
            if route.method != *req.method() {
                return None;
            }
            route.pattern.captures(&path).map(|params| (route, params))
        });

        let Some((route, params)) = matched else {
            debug!(method = %req.method(), path = %path, "No route matched");
            return AppError::not_found(anyhow!("Route not found")).into_response();
        };

        req.extensions_mut().insert(params);

        for entry in &self.middleware {
            if !path.starts_with(&entry.prefix) {
                continue;
            }
            if let Some(response) = entry.middleware.handle(&mut req) {
                return response;
            }
        }

        route.handler.call(req, self.state.clone()).await
    }

    pub fn into_service(self) -> RouterService<S> {
        RouterService {
            router: Arc::new(self),
        }
    }
}

/// [`Router`] as a `tower::Service`, mountable with `axum::Router::fallback_service`.
pub struct RouterService<S> {
    router: Arc<Router<S>>,
}

impl<S> Clone for RouterService<S> {
    fn clone(&self) -> Self {
        Self {
            router: Arc::clone(&self.router),
        }
    }
}

impl<S> Service<Request> for RouterService<S>
where
    S: Clone + Send + Sync + 'static,
{
    type Response = Response;
    type Error = Infallible;
    type Future = BoxFuture<Result<Response, Infallible>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request) -> Self::Future {
        let router = Arc::clone(&self.router);
        Box::pin(async move { Ok(router.dispatch(req).await) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::RouteParams;
    use axum::{body::Body, http::StatusCode};
    use http_body_util::BodyExt;
    use std::sync::atomic::{AtomicUsize, Ordering};

    async fn body_string(response: Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn request(method: Method, path: &str) -> Request {
        Request::builder()
            .method(method)
            .uri(path)
            .body(Body::empty())
            .unwrap()
    }

    async fn echo_id(params: RouteParams) -> String {
        format!("id={}", params.get("id").unwrap_or("none"))
    }

    async fn first() -> &'static str {
        "first"
    }

    async fn second() -> &'static str {
        "second"
    }

    #[tokio::test]
    async fn test_params_reach_handler() {
        let mut router = Router::new(());
        router
            .add_route(Method::GET, "/api/expenses/{id}", echo_id)
            .unwrap();

        let response = router.dispatch(request(Method::GET, "/api/expenses/42")).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "id=42");
    }

    #[tokio::test]
    async fn test_first_match_wins() {
        let mut router = Router::new(());
        router
            .add_route(Method::GET, "/items/{id}", first)
            .unwrap()
            .add_route(Method::GET, "/items/special", second)
            .unwrap();

        let response = router.dispatch(request(Method::GET, "/items/special")).await;
        assert_eq!(body_string(response).await, "first");
    }

    #[tokio::test]
    async fn test_method_must_match() {
        let mut router = Router::new(());
        router
            .add_route(Method::GET, "/items", first)
            .unwrap()
            .add_route(Method::POST, "/items", second)
            .unwrap();

        let response = router.dispatch(request(Method::POST, "/items")).await;
        assert_eq!(body_string(response).await, "second");

        let response = router.dispatch(request(Method::DELETE, "/items")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unmatched_path_is_route_not_found() {
        let router = Router::new(());

        let response = router.dispatch(request(Method::GET, "/nowhere")).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_string(response).await,
            r#"{"error":"Route not found"}"#
        );
    }

    #[tokio::test]
    async fn test_middleware_short_circuits() {
        let mut router = Router::new(());
        router
            .add_route(Method::GET, "/private/{id}", echo_id)
            .unwrap()
            .add_route(Method::GET, "/public", first)
            .unwrap()
            .add_middleware("/private", |_req: &mut Request| -> Option<Response> {
                Some(StatusCode::UNAUTHORIZED.into_response())
            });

        let response = router.dispatch(request(Method::GET, "/private/1")).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = router.dispatch(request(Method::GET, "/public")).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_middleware_sees_params_and_runs_in_order() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);

        let mut router = Router::new(());
        router
            .add_route(Method::GET, "/api/expenses/{id}", echo_id)
            .unwrap()
            .add_middleware("/api", move |req: &mut Request| -> Option<Response> {
                let id = req
                    .extensions()
                    .get::<RouteParams>()
                    .and_then(|p| p.get("id").map(str::to_string));
                assert_eq!(id.as_deref(), Some("9"));
                seen.fetch_add(1, Ordering::SeqCst);
                None
            })
            .add_middleware("/api/expenses", |_req: &mut Request| -> Option<Response> {
                Some(StatusCode::FORBIDDEN.into_response())
            });

        let response = router.dispatch(request(Method::GET, "/api/expenses/9")).await;

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_middleware_does_not_run_when_no_route_matches() {
        let mut router = Router::new(());
        router.add_middleware("/api", |_req: &mut Request| -> Option<Response> {
            Some(StatusCode::UNAUTHORIZED.into_response())
        });

        let response = router.dispatch(request(Method::GET, "/api/unknown")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_service_call() {
        let mut router = Router::new(());
        router.add_route(Method::GET, "/ping", first).unwrap();
        let mut service = router.into_service();

        let response = service.call(request(Method::GET, "/ping")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
