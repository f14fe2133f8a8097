use std::fmt::Display;

use urlencoding::encode;

/// Ordered set of query parameters, rendered as `?a=1&b=2`.
#[derive(Debug, Default, Clone)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn param(mut self, name: &str, value: impl Display) -> Self {
        self.pairs.push((name.to_string(), value.to_string()));
        self
    }

    pub fn to_query_string(&self) -> String {
        if self.pairs.is_empty() {
            return String::new();
        }

        let joined = self
            .pairs
            .iter()
            .map(|(name, value)| format!("{}={}", encode(name), encode(value)))
            .collect::<Vec<_>>()
            .join("&");

        format!("?{}", joined)
    }
}
