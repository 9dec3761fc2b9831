use std::collections::HashMap;
use std::convert::Infallible;
use std::str::FromStr;

use axum::{extract::FromRequestParts, http::request::Parts};

/// Named path parameters captured by the matched route.
///
/// Inserted into the request extensions before any middleware runs. Extracting
/// it in a handler never fails; a request that bypassed the route table simply
/// yields no parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams(HashMap<String, String>);

impl RouteParams {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Parses a parameter, returning `None` if it is absent or malformed.
    pub fn parse<T: FromStr>(&self, name: &str) -> Option<T> {
        self.get(name).and_then(|value| value.parse().ok())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl FromIterator<(String, String)> for RouteParams {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<S> FromRequestParts<S> for RouteParams
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<RouteParams>()
            .cloned()
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let params: RouteParams = [("id".to_string(), "42".to_string())]
            .into_iter()
            .collect();

        assert_eq!(params.parse::<i64>("id"), Some(42));
        assert_eq!(params.parse::<i64>("missing"), None);
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        let params: RouteParams = [("id".to_string(), "abc".to_string())]
            .into_iter()
            .collect();

        assert_eq!(params.parse::<i64>("id"), None);
        assert_eq!(params.get("id"), Some("abc"));
    }
}
