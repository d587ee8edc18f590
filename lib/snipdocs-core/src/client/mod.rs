use std::sync::Arc;

use http::{Method, Uri};

use crate::docs::Documenter;

mod builder;
pub use self::builder::ApiClientBuilder;

mod body;
pub use self::body::CallBody;

mod call;
pub use self::call::ApiCall;

mod error;
pub use self::error::ApiClientError;

mod path;
pub use self::path::CallPath;
pub(crate) use self::path::path_template_names;

mod query;
pub use self::query::CallQuery;

mod result;
pub use self::result::CallResult;

mod status;
pub use self::status::ExpectedStatusCodes;

/// An HTTP client documenting the calls it makes.
///
/// Clones share the same documentation configuration and recorders.
///
/// ```rust,no_run
/// use snipdocs_core::{ApiClient, Documentation};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ApiClient::builder()
///     .with_host("localhost")
///     .with_port(8080)
///     .with_snippets_dir("target/generated-snippets")
///     .build()?;
///
/// client
///     .get("/api/health")?
///     .document(Documentation::new("health"))
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_uri: Uri,
    base_path: String,
    documenter: Arc<Documenter>,
}

// Create
impl ApiClient {
    /// Creates a builder with default settings.
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }
}

impl ApiClient {
    /// Prepares a call.
    pub fn call(&self, method: Method, path: CallPath) -> Result<ApiCall, ApiClientError> {
        let call = ApiCall::build(
            self.client.clone(),
            self.base_uri.clone(),
            self.base_path.clone(),
            Arc::clone(&self.documenter),
            method,
            path,
        );
        Ok(call)
    }

    /// Prepares a `GET` call.
    pub fn get(&self, path: impl Into<CallPath>) -> Result<ApiCall, ApiClientError> {
        self.call(Method::GET, path.into())
    }

    /// Prepares a `POST` call.
    pub fn post(&self, path: impl Into<CallPath>) -> Result<ApiCall, ApiClientError> {
        self.call(Method::POST, path.into())
    }

    /// Prepares a `PUT` call.
    pub fn put(&self, path: impl Into<CallPath>) -> Result<ApiCall, ApiClientError> {
        self.call(Method::PUT, path.into())
    }

    /// Prepares a `DELETE` call.
    pub fn delete(&self, path: impl Into<CallPath>) -> Result<ApiCall, ApiClientError> {
        self.call(Method::DELETE, path.into())
    }

    /// Prepares a `PATCH` call.
    pub fn patch(&self, path: impl Into<CallPath>) -> Result<ApiCall, ApiClientError> {
        self.call(Method::PATCH, path.into())
    }
}

#[cfg(test)]
mod integration_tests;
