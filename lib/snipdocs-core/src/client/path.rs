use std::collections::HashSet;
use std::fmt::Display;
use std::sync::LazyLock;

use indexmap::IndexMap;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use regex::Regex;
use tracing::warn;

use super::ApiClientError;

static RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(?<name>\w+)}").expect("a valid regex"));

/// Unreserved characters (RFC 3986) are kept as is.
const PATH_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// The placeholder names of a path template, in order.
pub(crate) fn path_template_names(template: &str) -> impl Iterator<Item = &str> {
    RE.captures_iter(template)
        .filter_map(|caps| caps.name("name"))
        .map(|name| name.as_str())
}

/// A path template with `{name}` placeholders and their values.
///
/// ```rust
/// use snipdocs_core::CallPath;
///
/// let path = CallPath::from("/api/v1/users/{userId}").add_param("userId", 42);
/// assert_eq!(path.template(), "/api/v1/users/{userId}");
/// ```
#[derive(Debug, Clone, Default, derive_more::Display)]
#[display("{template}")]
pub struct CallPath {
    template: String,
    args: IndexMap<String, String>,
}

impl CallPath {
    /// Sets the value of the `{name}` placeholder.
    ///
    /// Values are percent-encoded when the path is resolved.
    pub fn add_param(mut self, name: impl Into<String>, value: impl Display) -> Self {
        self.args.insert(name.into(), value.to_string());
        self
    }

    /// The path template.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Replaces every placeholder with its encoded value.
    pub(super) fn resolve(&self) -> Result<String, ApiClientError> {
        let mut names = path_template_names(&self.template).collect::<HashSet<_>>();
        for name in self.args.keys() {
            if !names.contains(name.as_str()) {
                warn!(?name, path = %self.template, "argument name not found");
            }
        }

        let path = RE.replace_all(&self.template, |caps: &regex::Captures<'_>| {
            let name = &caps["name"];
            match self.args.get(name) {
                Some(value) => {
                    names.remove(name);
                    utf8_percent_encode(value, PATH_VALUE).to_string()
                }
                None => caps[0].to_string(),
            }
        });

        if names.is_empty() {
            return Ok(path.into_owned());
        }

        let mut missings = names.into_iter().map(str::to_string).collect::<Vec<_>>();
        missings.sort();
        Err(ApiClientError::PathUnresolved {
            path: self.template.clone(),
            missings,
        })
    }
}

impl From<&str> for CallPath {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<String> for CallPath {
    fn from(template: String) -> Self {
        Self {
            template,
            args: IndexMap::new(),
        }
    }
}
