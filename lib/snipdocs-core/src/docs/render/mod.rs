//! Snippet rendering, Asciidoctor or Markdown.

use http::HeaderMap;
use http::header::{CONTENT_LENGTH, HOST};

use super::{DefaultSnippet, DocumentationConfig, Operation, TemplateFormat};

mod exchange;
mod table;
pub(crate) use self::table::{FieldRow, ParameterRow, fields_table, parameters_table};

/// A rendered snippet, ready to be recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSnippet {
    name: String,
    extension: &'static str,
    content: String,
}

impl RenderedSnippet {
    pub(crate) fn new(name: impl Into<String>, format: TemplateFormat, content: String) -> Self {
        Self {
            name: name.into(),
            extension: format.extension(),
            content,
        }
    }

    /// The snippet name, e.g. `http-request` or `response-fields`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The rendered text.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// The snippet file name, e.g. `http-request.adoc`.
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.name, self.extension)
    }
}

pub(crate) fn default_snippet(
    snippet: DefaultSnippet,
    operation: &Operation,
    config: &DocumentationConfig,
) -> RenderedSnippet {
    let format = config.format;
    let (name, content) = match snippet {
        DefaultSnippet::CurlRequest => (
            "curl-request",
            code_block(format, Some("bash"), false, &exchange::curl(operation, &config.uri)),
        ),
        DefaultSnippet::HttpieRequest => (
            "httpie-request",
            code_block(format, Some("bash"), false, &exchange::httpie(operation, &config.uri)),
        ),
        DefaultSnippet::HttpRequest => (
            "http-request",
            code_block(
                format,
                Some("http"),
                true,
                &exchange::http_request(operation, &config.uri),
            ),
        ),
        DefaultSnippet::HttpResponse => (
            "http-response",
            code_block(format, Some("http"), true, &exchange::http_response(operation)),
        ),
        DefaultSnippet::RequestBody => (
            "request-body",
            code_block(format, None, true, &body_text(&operation.request.body)),
        ),
        DefaultSnippet::ResponseBody => (
            "response-body",
            code_block(format, None, true, &body_text(&operation.response.body)),
        ),
    };
    RenderedSnippet::new(name, format, content)
}

fn code_block(
    format: TemplateFormat,
    language: Option<&str>,
    nowrap: bool,
    content: &str,
) -> String {
    match format {
        TemplateFormat::Asciidoctor => {
            let mut attributes = vec!["source"];
            attributes.extend(language);
            if nowrap {
                attributes.push(r#"options="nowrap""#);
            }
            format!("[{}]\n----\n{content}\n----\n", attributes.join(","))
        }
        TemplateFormat::Markdown => {
            format!("```{}\n{content}\n```\n", language.unwrap_or_default())
        }
    }
}

fn body_text(body: &[u8]) -> String {
    String::from_utf8_lossy(body).into_owned()
}

/// Headers to render, `Host` and `Content-Length` excluded: they are derived from the exchange.
fn displayed_headers(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .filter(|(name, _)| **name != HOST && **name != CONTENT_LENGTH)
        .map(|(name, value)| {
            (
                header_display_name(name.as_str()),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect()
}

/// `content-type` → `Content-Type`
fn header_display_name(name: &str) -> String {
    name.split('-')
        .map(|part| {
            let mut chars = part.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_ascii_uppercase().to_string() + chars.as_str()
            })
        })
        .collect::<Vec<_>>()
        .join("-")
}
