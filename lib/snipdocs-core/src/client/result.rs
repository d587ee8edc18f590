use http::{HeaderMap, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use serde_json_path::JsonPath;

use super::ApiClientError;

/// The response of an executed call.
///
/// The body is fully read: the result can be inspected several times.
///
/// ```rust,no_run
/// # use snipdocs_core::ApiClient;
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ApiClient::builder().with_port(8080).build()?;
/// let result = client.get("/api/v1/users")?.await?;
/// result
///     .expect_array("$")?
///     .expect_not_empty("$[*].userId")?;
/// let users = result.as_json::<Vec<serde_json::Value>>()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct CallResult {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl CallResult {
    pub(super) fn new(status: StatusCode, headers: HeaderMap, body: Vec<u8>) -> Self {
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

    /// The raw response body.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Deserializes the body.
    ///
    /// On failure, the error names the path of the offending value.
    pub fn as_json<T>(&self) -> Result<T, ApiClientError>
    where
        T: DeserializeOwned,
    {
        let deserializer = &mut serde_json::Deserializer::from_slice(&self.body);
        let result: T = serde_path_to_error::deserialize(deserializer).map_err(|err| {
            ApiClientError::JsonError {
                path: err.path().to_string(),
                error: err.into_inner(),
                body: self.body_text(),
            }
        })?;
        Ok(result)
    }

    /// Parses the body as a JSON value.
    pub fn as_json_value(&self) -> Result<Value, ApiClientError> {
        self.as_json()
    }

    /// The body as text, invalid UTF-8 sequences replaced.
    pub fn as_text(&self) -> String {
        self.body_text()
    }

    /// Checks that the body is empty.
    pub fn as_empty(&self) -> Result<(), ApiClientError> {
        if self.body.is_empty() {
            Ok(())
        } else {
            Err(ApiClientError::ExpectedEmptyBody {
                body_length: self.body.len(),
            })
        }
    }

    /// Checks that the JSONPath selects at least one value, and that no selected
    /// value is `null`, `""`, `[]` or `{}`.
    pub fn expect_not_empty(&self, path: &str) -> Result<&Self, ApiClientError> {
        let values = self.select(path)?;
        if values.is_empty() {
            return Err(self.expectation_failed(path, "no value matches"));
        }
        if let Some(value) = values.iter().find(|value| is_empty_value(value)) {
            return Err(self.expectation_failed(path, &format!("found an empty value: {value}")));
        }
        Ok(self)
    }

    /// Checks that the JSONPath selects at least one value, and that every selected value
    /// is an array.
    pub fn expect_array(&self, path: &str) -> Result<&Self, ApiClientError> {
        let values = self.select(path)?;
        if values.is_empty() {
            return Err(self.expectation_failed(path, "no value matches"));
        }
        if let Some(value) = values.iter().find(|value| !value.is_array()) {
            return Err(self.expectation_failed(path, &format!("expected an array, got {value}")));
        }
        Ok(self)
    }

    fn select(&self, path: &str) -> Result<Vec<Value>, ApiClientError> {
        let json_path = JsonPath::parse(path).map_err(|err| ApiClientError::InvalidJsonPath {
            path: path.to_string(),
            error: err.to_string(),
        })?;
        let root = self.as_json_value()?;
        let values = json_path.query(&root).all().into_iter().cloned().collect();
        Ok(values)
    }

    fn expectation_failed(&self, path: &str, message: &str) -> ApiClientError {
        ApiClientError::ExpectationFailed {
            path: path.to_string(),
            message: message.to_string(),
            body: self.body_text(),
        }
    }

    fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}
