use http::header::CONTENT_TYPE;
use http::{HeaderMap, Method, StatusCode};
use mime::Mime;
use url::Url;

/// The request of a documented exchange, as sent by the client.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub(crate) method: Method,
    pub(crate) uri: Url,
    pub(crate) path_template: String,
    pub(crate) headers: HeaderMap,
    pub(crate) body: Vec<u8>,
}

impl CapturedRequest {
    pub(crate) fn new(
        method: Method,
        uri: Url,
        path_template: String,
        headers: HeaderMap,
        body: Vec<u8>,
    ) -> Self {
        Self {
            method,
            uri,
            path_template,
            headers,
            body,
        }
    }

    /// The HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The full request URI.
    pub fn uri(&self) -> &Url {
        &self.uri
    }

    /// The path template with `{name}` placeholders, base path included.
    pub fn path_template(&self) -> &str {
        &self.path_template
    }

    /// The request headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The request body, possibly empty.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// The query parameters, in request order.
    pub fn query_parameters(&self) -> Vec<(String, String)> {
        self.uri
            .query_pairs()
            .map(|(name, value)| (name.into_owned(), value.into_owned()))
            .collect()
    }

    /// The `Content-Type` of the request, if any.
    pub fn content_type(&self) -> Option<Mime> {
        content_type(&self.headers)
    }
}

/// The response of a documented exchange.
#[derive(Debug, Clone)]
pub struct CapturedResponse {
    pub(crate) status: StatusCode,
    pub(crate) headers: HeaderMap,
    pub(crate) body: Vec<u8>,
}

impl CapturedResponse {
    pub(crate) fn new(status: StatusCode, headers: HeaderMap, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// The response status.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// The response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The response body, possibly empty.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// The `Content-Type` of the response, if any.
    pub fn content_type(&self) -> Option<Mime> {
        content_type(&self.headers)
    }
}

/// A named, captured HTTP exchange: the input of every snippet.
#[derive(Debug, Clone)]
pub struct Operation {
    pub(crate) name: String,
    pub(crate) request: CapturedRequest,
    pub(crate) response: CapturedResponse,
}

impl Operation {
    /// The operation name, used as the snippet directory.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The captured request.
    pub fn request(&self) -> &CapturedRequest {
        &self.request
    }

    /// The captured response.
    pub fn response(&self) -> &CapturedResponse {
        &self.response
    }
}

pub(crate) fn content_type(headers: &HeaderMap) -> Option<Mime> {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse().ok())
}

pub(crate) fn is_json(mime: &Mime) -> bool {
    mime.subtype() == mime::JSON || mime.suffix() == Some(mime::JSON)
}
