use tracing::warn;
use url::Url;

use super::Preprocessor;

/// Default directory for snippet files, relative to the working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "target/generated-snippets";

/// The markup used to render snippets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TemplateFormat {
    /// Asciidoctor, written to `.adoc` files.
    #[default]
    Asciidoctor,
    /// Markdown, written to `.md` files.
    Markdown,
}

impl TemplateFormat {
    /// The snippet file extension.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Asciidoctor => "adoc",
            Self::Markdown => "md",
        }
    }
}

/// Snippets rendered for every documented operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultSnippet {
    /// `curl-request`: the request as a curl command.
    CurlRequest,
    /// `httpie-request`: the request as an HTTPie command.
    HttpieRequest,
    /// `http-request`: the raw HTTP request.
    HttpRequest,
    /// `http-response`: the raw HTTP response.
    HttpResponse,
    /// `request-body`: the request body alone.
    RequestBody,
    /// `response-body`: the response body alone.
    ResponseBody,
}

impl DefaultSnippet {
    /// All default snippets, in rendering order.
    pub const ALL: [Self; 6] = [
        Self::CurlRequest,
        Self::HttpieRequest,
        Self::HttpRequest,
        Self::HttpResponse,
        Self::RequestBody,
        Self::ResponseBody,
    ];
}

/// Scheme, host and port shown in documented URIs.
///
/// Test servers listen on ephemeral ports; rewriting the URI keeps snippets stable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriDefaults {
    /// The documented scheme.
    pub scheme: String,
    /// The documented host.
    pub host: String,
    /// The documented port, `None` for the scheme default.
    pub port: Option<u16>,
}

impl Default for UriDefaults {
    fn default() -> Self {
        Self {
            scheme: "http".to_string(),
            host: "localhost".to_string(),
            port: Some(8080),
        }
    }
}

impl UriDefaults {
    /// Rewrites the URI with the documented scheme, host and port.
    pub(crate) fn apply(&self, uri: &Url) -> Url {
        let mut result = uri.clone();
        let rewritten = result.set_scheme(&self.scheme).is_ok()
            && result.set_host(Some(&self.host)).is_ok()
            && result.set_port(self.port).is_ok();
        if !rewritten {
            warn!(%uri, defaults = ?self, "cannot rewrite documented URI, keep it as is");
            return uri.clone();
        }
        result
    }
}

/// How snippets are rendered.
///
/// # Example
///
/// ```rust
/// use snipdocs_core::{DocumentationConfig, Preprocessor, TemplateFormat};
///
/// let config = DocumentationConfig {
///     format: TemplateFormat::Markdown,
///     response_preprocessors: vec![Preprocessor::remove_headers([http::header::DATE])],
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Default)]
pub struct DocumentationConfig {
    /// The snippet markup.
    pub format: TemplateFormat,
    /// Scheme, host and port of documented URIs.
    pub uri: UriDefaults,
    /// Snippets rendered for every operation, `None` for [`DefaultSnippet::ALL`].
    pub default_snippets: Option<Vec<DefaultSnippet>>,
    /// Preprocessors applied to every request before the operation ones.
    pub request_preprocessors: Vec<Preprocessor>,
    /// Preprocessors applied to every response before the operation ones.
    pub response_preprocessors: Vec<Preprocessor>,
}

impl DocumentationConfig {
    pub(crate) fn default_snippets(&self) -> &[DefaultSnippet] {
        self.default_snippets
            .as_deref()
            .unwrap_or(&DefaultSnippet::ALL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_rewrite_documented_uri() {
        let uri =
            Url::parse("http://127.0.0.1:43117/api/v1/users?page=0&size=10").expect("valid url");

        let documented = UriDefaults::default().apply(&uri);

        assert_eq!(
            documented.as_str(),
            "http://localhost:8080/api/v1/users?page=0&size=10"
        );
    }

    #[test]
    fn should_drop_default_port() {
        let uri = Url::parse("http://127.0.0.1:43117/api").expect("valid url");
        let defaults = UriDefaults {
            scheme: "https".to_string(),
            host: "api.example.com".to_string(),
            port: None,
        };

        let documented = defaults.apply(&uri);

        assert_eq!(documented.as_str(), "https://api.example.com/api");
    }

    #[test]
    fn should_render_every_default_snippet_by_default() {
        let config = DocumentationConfig::default();

        assert_eq!(config.default_snippets(), &DefaultSnippet::ALL);
        assert_eq!(config.format.extension(), "adoc");
    }
}
