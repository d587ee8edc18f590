use http::header::{CONTENT_LENGTH, HeaderName, HeaderValue};
use http::HeaderMap;
use regex::Regex;
use tracing::debug;

use super::{CapturedRequest, CapturedResponse, DocumentationError};

/// Transforms a captured request or response before it is rendered.
///
/// Preprocessing only affects the snippets; the exchange itself is left untouched.
#[derive(Debug, Clone)]
pub enum Preprocessor {
    /// Re-serializes JSON bodies with indentation. Other bodies are kept as is.
    PrettyPrint,

    /// Removes the given headers.
    RemoveHeaders(Vec<HeaderName>),

    /// Replaces every match of the pattern in a text body.
    ReplacePattern {
        /// The pattern to look for.
        pattern: Regex,
        /// The replacement, may use `$name` capture references.
        replacement: String,
    },
}

impl Preprocessor {
    /// Creates a preprocessor removing the given headers.
    pub fn remove_headers(names: impl IntoIterator<Item = HeaderName>) -> Self {
        Self::RemoveHeaders(names.into_iter().collect())
    }

    /// Creates a preprocessor replacing `pattern` in text bodies.
    pub fn replace_pattern(pattern: Regex, replacement: impl Into<String>) -> Self {
        Self::ReplacePattern {
            pattern,
            replacement: replacement.into(),
        }
    }

    pub(crate) fn preprocess_request(
        &self,
        request: &mut CapturedRequest,
    ) -> Result<(), DocumentationError> {
        self.apply(&mut request.headers, &mut request.body)
    }

    pub(crate) fn preprocess_response(
        &self,
        response: &mut CapturedResponse,
    ) -> Result<(), DocumentationError> {
        self.apply(&mut response.headers, &mut response.body)
    }

    fn apply(&self, headers: &mut HeaderMap, body: &mut Vec<u8>) -> Result<(), DocumentationError> {
        match self {
            Self::PrettyPrint => {
                if body.is_empty() {
                    return Ok(());
                }
                let Ok(value) = serde_json::from_slice::<serde_json::Value>(body) else {
                    debug!("body is not JSON, skip pretty printing");
                    return Ok(());
                };
                *body = serde_json::to_vec_pretty(&value)?;
                update_content_length(headers, body.len());
            }
            Self::RemoveHeaders(names) => {
                for name in names {
                    headers.remove(name);
                }
            }
            Self::ReplacePattern {
                pattern,
                replacement,
            } => {
                let Ok(text) = std::str::from_utf8(body) else {
                    debug!("body is not text, skip pattern replacement");
                    return Ok(());
                };
                let replaced = pattern.replace_all(text, replacement.as_str()).into_owned();
                *body = replaced.into_bytes();
                update_content_length(headers, body.len());
            }
        }
        Ok(())
    }
}

fn update_content_length(headers: &mut HeaderMap, length: usize) {
    if headers.contains_key(CONTENT_LENGTH) {
        headers.insert(CONTENT_LENGTH, HeaderValue::from(length));
    }
}
