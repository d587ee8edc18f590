use std::future::{Future, IntoFuture};
use std::pin::Pin;
use std::sync::Arc;

use headers::HeaderMapExt;
use http::header::{ACCEPT, HeaderName, HeaderValue};
use http::{HeaderMap, Method, StatusCode, Uri};
use reqwest::{Body, Request};
use serde::Serialize;
use tracing::debug;
use url::Url;

use super::{ApiClientError, CallBody, CallPath, CallQuery, CallResult, ExpectedStatusCodes};
use crate::docs::{CapturedRequest, CapturedResponse, Documentation, Documenter};

const BODY_MAX_LENGTH: usize = 1024;

/// A call under construction, executed with `.await` or [`ApiCall::exchange`].
///
/// ```rust,no_run
/// # use snipdocs_core::{ApiClient, CallPath, Documentation, FieldDescriptor, ParameterDescriptor};
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ApiClient::builder().with_port(8080).build()?;
/// let path = CallPath::from("/api/v1/users/{userId}").add_param("userId", "42");
/// let user = client
///     .get(path)?
///     .accept_json()
///     .with_expected_status_code(http::StatusCode::OK)
///     .document(
///         Documentation::new("getUser")
///             .path_parameters([ParameterDescriptor::new("userId", "User's identifier")])
///             .response_fields([FieldDescriptor::new("userId", "User's identifier")]),
///     )
///     .await?
///     .as_json_value()?;
/// # Ok(())
/// # }
/// ```
#[derive(derive_more::Debug)]
pub struct ApiCall {
    client: reqwest::Client,
    base_uri: Uri,
    base_path: String,
    #[debug(skip)]
    documenter: Arc<Documenter>,

    method: Method,
    path: CallPath,
    query: CallQuery,
    headers: HeaderMap,
    #[debug(ignore)]
    body: Option<CallBody>,

    expected_status_codes: ExpectedStatusCodes,
    expectations: Vec<BodyExpectation>,
    documentation: Option<Documentation>,
}

/// A check on the response body, evaluated before the call is documented.
#[derive(Debug, Clone)]
enum BodyExpectation {
    NotEmpty(String),
    Array(String),
}

impl BodyExpectation {
    fn check(&self, result: &CallResult) -> Result<(), ApiClientError> {
        match self {
            Self::NotEmpty(path) => result.expect_not_empty(path)?,
            Self::Array(path) => result.expect_array(path)?,
        };
        Ok(())
    }
}

impl ApiCall {
    pub(super) fn build(
        client: reqwest::Client,
        base_uri: Uri,
        base_path: String,
        documenter: Arc<Documenter>,
        method: Method,
        path: CallPath,
    ) -> Self {
        Self {
            client,
            base_uri,
            base_path,
            documenter,
            method,
            path,
            query: CallQuery::default(),
            headers: HeaderMap::new(),
            body: None,
            expected_status_codes: ExpectedStatusCodes::default(),
            expectations: Vec::new(),
            documentation: None,
        }
    }
}

// Request
impl ApiCall {
    /// Sets the query parameters.
    pub fn with_query(mut self, query: CallQuery) -> Self {
        self.query = query;
        self
    }

    /// Sets a header, replacing any previous value.
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Sets `Accept: application/json`.
    pub fn accept_json(self) -> Self {
        self.with_header(ACCEPT, HeaderValue::from_static("application/json"))
    }

    /// Sets a JSON body.
    pub fn json<T>(mut self, t: &T) -> Result<Self, ApiClientError>
    where
        T: Serialize + ?Sized,
    {
        self.body = Some(CallBody::json(t)?);
        Ok(self)
    }

    /// Sets the body.
    pub fn with_body(mut self, body: CallBody) -> Self {
        self.body = Some(body);
        self
    }
}

// Status
impl ApiCall {
    /// Accepts a single status code.
    ///
    /// # Panics
    ///
    /// Panics if `status` is not between 100 and 599.
    pub fn with_expected_status(self, status: u16) -> Self {
        self.with_expected_status_codes(ExpectedStatusCodes::from_single(status))
    }

    /// Accepts a single status code.
    pub fn with_expected_status_code(self, status: StatusCode) -> Self {
        self.with_expected_status_codes(ExpectedStatusCodes::from_status_code(status))
    }

    /// Replaces the accepted status codes.
    pub fn with_expected_status_codes(mut self, codes: ExpectedStatusCodes) -> Self {
        self.expected_status_codes = codes;
        self
    }
}

// Expectations
impl ApiCall {
    /// Checks, before documenting, that the JSONPath selects only non-empty values.
    ///
    /// See [`CallResult::expect_not_empty`].
    pub fn expect_not_empty(mut self, path: impl Into<String>) -> Self {
        self.expectations.push(BodyExpectation::NotEmpty(path.into()));
        self
    }

    /// Checks, before documenting, that the JSONPath selects only arrays.
    ///
    /// See [`CallResult::expect_array`].
    pub fn expect_array(mut self, path: impl Into<String>) -> Self {
        self.expectations.push(BodyExpectation::Array(path.into()));
        self
    }
}

// Documentation
impl ApiCall {
    /// Documents this call once its status is accepted.
    pub fn document(mut self, documentation: Documentation) -> Self {
        self.documentation = Some(documentation);
        self
    }
}

// Execution
impl ApiCall {
    /// Sends the request, checks the status and body expectations, then documents the exchange.
    ///
    /// Nothing is recorded when a check fails.
    pub async fn exchange(self) -> Result<CallResult, ApiClientError> {
        let Self {
            client,
            base_uri,
            base_path,
            documenter,
            method,
            path,
            query,
            headers,
            body,
            expected_status_codes,
            expectations,
            documentation,
        } = self;

        let url = Self::build_url(&base_uri, &path, &query)?;
        let request = Self::build_request(method.clone(), url.clone(), headers, &body);
        let request_headers = request.headers().clone();

        debug!(?request, "sending...");
        let response = client.execute(request).await?;
        debug!(?response, "...receiving");

        let status = response.status();
        let response_headers = response.headers().clone();
        let response_body = response.bytes().await?.to_vec();

        if !expected_status_codes.contains_status_code(status) {
            return Err(ApiClientError::UnexpectedStatusCode {
                status_code: status.as_u16(),
                body: truncate_body(&response_body),
            });
        }

        let result = CallResult::new(status, response_headers, response_body);
        for expectation in &expectations {
            expectation.check(&result)?;
        }

        if let Some(documentation) = documentation {
            let template = format!(
                "{}/{}",
                base_path.trim_end_matches('/'),
                path.template().trim_start_matches('/')
            );
            let request = CapturedRequest::new(
                method,
                url,
                template,
                request_headers,
                body.map(|body| body.data).unwrap_or_default(),
            );
            let response =
                CapturedResponse::new(status, result.headers().clone(), result.body().to_vec());
            documenter.record(&documentation, request, response)?;
        }

        Ok(result)
    }

    fn build_url(
        base_uri: &Uri,
        path: &CallPath,
        query: &CallQuery,
    ) -> Result<Url, ApiClientError> {
        let path = path.resolve()?;
        let base_uri = base_uri.to_string();
        let url = format!(
            "{}/{}",
            base_uri.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        let mut url = url.parse::<Url>()?;

        if !query.is_empty() {
            let query_string = query.to_query_string()?;
            url.set_query(Some(&query_string));
        }

        Ok(url)
    }

    fn build_request(
        method: Method,
        url: Url,
        headers: HeaderMap,
        body: &Option<CallBody>,
    ) -> Request {
        let mut request = Request::new(method, url);
        let req_headers = request.headers_mut();

        if let Some(body) = body {
            req_headers.typed_insert(body.content_type.clone());
        }
        req_headers.extend(headers);

        if let Some(body) = body {
            *request.body_mut() = Some(Body::from(body.data.clone()));
        }

        request
    }
}

fn truncate_body(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    if text.chars().count() > BODY_MAX_LENGTH {
        let truncated = text.chars().take(BODY_MAX_LENGTH).collect::<String>();
        format!("{truncated}... (truncated)")
    } else {
        text.into_owned()
    }
}

impl IntoFuture for ApiCall {
    type Output = Result<CallResult, ApiClientError>;
    type IntoFuture = Pin<Box<dyn Future<Output = Self::Output> + Send>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.exchange())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_build_url_with_query() {
        let base_uri = Uri::from_static("http://127.0.0.1:8080/api");
        let path = CallPath::from("/v1/users/{userId}").add_param("userId", "4 2");
        let query = CallQuery::new().add_param("verbose", true);

        let url = ApiCall::build_url(&base_uri, &path, &query).expect("url");

        insta::assert_snapshot!(url, @"http://127.0.0.1:8080/api/v1/users/4%202?verbose=true");
    }

    #[test]
    fn should_put_content_type_before_custom_headers() {
        let url = Url::parse("http://localhost/api").expect("valid url");
        let body = CallBody::json(&serde_json::json!({ "username": "foobar" })).expect("body");
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let request = ApiCall::build_request(Method::POST, url, headers, &Some(body));

        let names = request
            .headers()
            .keys()
            .map(HeaderName::as_str)
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["content-type", "accept"]);
    }

    #[test]
    fn should_truncate_long_bodies() {
        let body = "x".repeat(2000);

        let truncated = truncate_body(body.as_bytes());

        assert_eq!(truncated.len(), BODY_MAX_LENGTH + "... (truncated)".len());
    }
}
