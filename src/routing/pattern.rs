use regex::Regex;

use super::RouteError;
use super::params::RouteParams;

/// A compiled route pattern such as `/api/expenses/{id}`.
///
/// Compiles to an anchored regex where every `{name}` becomes the named group
/// `(?P<name>[^/]+)` and all literal text is escaped.
#[derive(Debug, Clone)]
pub struct PathPattern {
    source: String,
    regex: Regex,
    param_names: Vec<String>,
}

impl PathPattern {
    pub fn compile(pattern: &str) -> Result<Self, RouteError> {
        let invalid = |source| RouteError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        };

        let placeholder = Regex::new(r"\{(\w+)\}").map_err(invalid)?;

        let mut expr = String::from("^");
        let mut param_names = Vec::new();
        let mut last = 0;

        for caps in placeholder.captures_iter(pattern) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            expr.push_str(&regex::escape(&pattern[last..whole.start()]));
            expr.push_str(&format!("(?P<{}>[^/]+)", name.as_str()));
            param_names.push(name.as_str().to_string());
            last = whole.end();
        }
        expr.push_str(&regex::escape(&pattern[last..]));
        expr.push('$');

        let regex = Regex::new(&expr).map_err(invalid)?;

        Ok(Self {
            source: pattern.to_string(),
            regex,
            param_names,
        })
    }

    /// Matches `path` and returns its parameters, or `None` if it does not match.
    pub fn captures(&self, path: &str) -> Option<RouteParams> {
        let caps = self.regex.captures(path)?;

        Some(
            self.param_names
                .iter()
                .filter_map(|name| {
                    caps.name(name)
                        .map(|value| (name.clone(), value.as_str().to_string()))
                })
                .collect(),
        )
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn param_names(&self) -> &[String] {
        &self.param_names
    }
}
