use std::fmt::Display;

use super::ApiClientError;

/// Query parameters of a call, kept in insertion order.
///
/// ```rust
/// use snipdocs_core::CallQuery;
///
/// let query = CallQuery::new().add_param("page", 0).add_param("size", 10);
/// assert!(!query.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallQuery {
    params: Vec<(String, String)>,
}

impl CallQuery {
    /// Creates an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a parameter. Repeating a name sends it several times.
    pub fn add_param(mut self, name: impl Into<String>, value: impl Display) -> Self {
        self.params.push((name.into(), value.to_string()));
        self
    }

    /// Whether there is no parameter.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub(super) fn to_query_string(&self) -> Result<String, ApiClientError> {
        let result = serde_urlencoded::to_string(&self.params)?;
        Ok(result)
    }
}
