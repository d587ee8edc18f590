//! # Snipdocs Core
//!
//! Document an HTTP API from its tests: every documented call renders
//! request/response snippets (curl, HTTPie, raw HTTP, bodies, field and
//! parameter tables) in Asciidoctor or Markdown.
//!
//! - **[`ApiClient`]** sends the calls and checks their status
//! - **[`Documentation`]** names an operation and declares its fields and parameters
//! - **[`SnippetRecorder`]** receives the rendered snippets ([`FileRecorder`] by default)
//! - **[`TestClient`](test_client::TestClient)** runs the application under test
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use snipdocs_core::{ApiClient, CallPath, Documentation, FieldDescriptor, ParameterDescriptor};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ApiClient::builder()
//!     .with_host("localhost")
//!     .with_port(8080)
//!     .build()?;
//!
//! let path = CallPath::from("/api/v1/users/{userId}").add_param("userId", "42");
//! client
//!     .get(path)?
//!     .accept_json()
//!     .with_expected_status_code(http::StatusCode::OK)
//!     .document(
//!         Documentation::new("getUser")
//!             .pretty_print()
//!             .path_parameters([ParameterDescriptor::new("userId", "User's identifier")])
//!             .response_fields([
//!                 FieldDescriptor::new("userId", "User's identifier"),
//!                 FieldDescriptor::new("username", "User's username"),
//!             ]),
//!     )
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! Snippets land in `target/generated-snippets/getUser/`:
//! `curl-request.adoc`, `httpie-request.adoc`, `http-request.adoc`,
//! `http-response.adoc`, `request-body.adoc`, `response-body.adoc`,
//! `path-parameters.adoc` and `response-fields.adoc`.
//!
//! ## Validation
//!
//! A documented call fails when a documented field is missing from the payload,
//! when a payload field is not documented, or when path or query parameters do not
//! match their descriptors. Documentation stays in sync with the API.

mod client;
mod docs;

pub mod test_client;

pub use self::client::{
    ApiCall, ApiClient, ApiClientBuilder, ApiClientError, CallBody, CallPath, CallQuery,
    CallResult, ExpectedStatusCodes,
};
pub use self::docs::{
    CapturedRequest, CapturedResponse, DEFAULT_OUTPUT_DIR, DefaultSnippet, Documentation,
    DocumentationConfig, DocumentationError, FieldDescriptor, FieldType, FileRecorder,
    MemoryRecorder, Operation, ParameterDescriptor, ParameterLocation, PayloadKind, Preprocessor,
    RecordedOperation, RenderedSnippet, SnippetRecorder, TemplateFormat, UriDefaults,
};

/// Creates an [`ExpectedStatusCodes`] from codes and ranges.
///
/// - Single codes: `200`, `404`
/// - Inclusive ranges: `200-299`
/// - Exclusive ranges: `200..300`
///
/// ```rust
/// use snipdocs_core::expected_status_codes;
///
/// let codes = expected_status_codes!(200, 201-204, 400..500);
/// assert!(codes.contains(203));
/// assert!(codes.contains(404));
/// assert!(!codes.contains(205));
/// ```
#[macro_export]
macro_rules! expected_status_codes {
    () => {
        $crate::ExpectedStatusCodes::default()
    };

    ($start:literal - $end:literal $(, $($rest:tt)*)?) => {{
        #[allow(unused_mut)]
        let mut codes = $crate::ExpectedStatusCodes::from_inclusive_range($start..=$end);
        $($crate::expected_status_codes!(@accumulate codes, $($rest)*);)?
        codes
    }};

    ($start:literal .. $end:literal $(, $($rest:tt)*)?) => {{
        #[allow(unused_mut)]
        let mut codes = $crate::ExpectedStatusCodes::from_exclusive_range($start..$end);
        $($crate::expected_status_codes!(@accumulate codes, $($rest)*);)?
        codes
    }};

    ($single:literal $(, $($rest:tt)*)?) => {{
        #[allow(unused_mut)]
        let mut codes = $crate::ExpectedStatusCodes::from_single($single);
        $($crate::expected_status_codes!(@accumulate codes, $($rest)*);)?
        codes
    }};

    (@accumulate $codes:ident, $start:literal - $end:literal $(, $($rest:tt)*)?) => {
        $codes = $codes.add_inclusive_range($start..=$end);
        $($crate::expected_status_codes!(@accumulate $codes, $($rest)*);)?
    };

    (@accumulate $codes:ident, $start:literal .. $end:literal $(, $($rest:tt)*)?) => {
        $codes = $codes.add_exclusive_range($start..$end);
        $($crate::expected_status_codes!(@accumulate $codes, $($rest)*);)?
    };

    (@accumulate $codes:ident, $single:literal $(, $($rest:tt)*)?) => {
        $codes = $codes.add_single($single);
        $($crate::expected_status_codes!(@accumulate $codes, $($rest)*);)?
    };

    (@accumulate $codes:ident $(,)?) => {};
}
