use crate::docs::DocumentationError;

/// Errors raised by [`ApiClient`](crate::ApiClient) and [`ApiCall`](crate::ApiCall).
#[derive(Debug, derive_more::Error, derive_more::Display, derive_more::From)]
pub enum ApiClientError {
    /// The HTTP client failed.
    ReqwestError(reqwest::Error),

    /// The request URL cannot be parsed.
    UrlError(url::ParseError),

    /// The base URI cannot be built.
    HttpError(http::Error),

    /// A header name is invalid.
    InvalidHeaderName(http::header::InvalidHeaderName),

    /// A header value is invalid.
    InvalidHeaderValue(http::header::InvalidHeaderValue),

    /// A body cannot be serialized.
    JsonValueError(serde_json::Error),

    /// Query parameters cannot be serialized.
    QuerySerializationError(serde_urlencoded::ser::Error),

    /// The documentation of the call failed.
    DocumentationError(DocumentationError),

    /// The base path is not a valid URI path.
    #[display("Invalid base path: {error}")]
    #[from(skip)]
    InvalidBasePath {
        /// Why it was rejected.
        error: String,
    },

    /// The response body cannot be deserialized.
    #[display("Failed to deserialize JSON at '{path}': {error}\n{body}")]
    #[from(skip)]
    JsonError {
        /// The path of the offending value.
        path: String,
        /// The deserialization error.
        error: serde_json::Error,
        /// The response body.
        body: String,
    },

    /// A path placeholder has no value.
    #[display("Path '{path}' is missing required arguments: {missings:?}")]
    #[from(skip)]
    PathUnresolved {
        /// The path template.
        path: String,
        /// The placeholders without value.
        missings: Vec<String>,
    },

    /// The response status is not expected.
    #[display("Unexpected status code {status_code}: {body}")]
    #[from(skip)]
    UnexpectedStatusCode {
        /// The received status.
        status_code: u16,
        /// The response body, truncated.
        body: String,
    },

    /// The response body is not empty.
    #[display("Expected an empty body, got {body_length} bytes")]
    #[from(skip)]
    ExpectedEmptyBody {
        /// The body length.
        body_length: usize,
    },

    /// A JSONPath expression cannot be parsed.
    #[display("Invalid JSON path '{path}': {error}")]
    #[from(skip)]
    InvalidJsonPath {
        /// The expression.
        path: String,
        /// The parse error.
        error: String,
    },

    /// A JSON expectation on the response body failed.
    #[display("Expectation failed for '{path}': {message}\n{body}")]
    #[from(skip)]
    ExpectationFailed {
        /// The JSONPath expression.
        path: String,
        /// What went wrong.
        message: String,
        /// The response body.
        body: String,
    },
}
