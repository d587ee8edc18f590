//! Documentation of API calls as snippets.
//!
//! A [`Documentation`] attached to an [`ApiCall`](crate::ApiCall) names the operation and
//! declares the documented fields and parameters. Once the response status is accepted,
//! the exchange is captured, preprocessed, checked against the descriptors, rendered
//! and handed to every [`SnippetRecorder`].

use std::sync::Arc;

use tracing::debug;

mod config;
pub use self::config::*;

mod descriptor;
pub use self::descriptor::*;

mod error;
pub use self::error::*;

mod field_path;
mod fields;

mod operation;
pub use self::operation::{CapturedRequest, CapturedResponse, Operation};
use self::operation::is_json;

mod parameters;

mod preprocess;
pub use self::preprocess::Preprocessor;

mod recorder;
pub use self::recorder::*;

mod render;
pub use self::render::RenderedSnippet;

/// Describes how a single call is documented.
///
/// ```rust
/// use snipdocs_core::{Documentation, FieldDescriptor, ParameterDescriptor};
///
/// let documentation = Documentation::new("getUser")
///     .pretty_print()
///     .path_parameters([ParameterDescriptor::new("userId", "User's identifier")])
///     .response_fields([
///         FieldDescriptor::new("userId", "User's identifier"),
///         FieldDescriptor::new("username", "User's username"),
///     ]);
/// assert_eq!(documentation.name(), "getUser");
/// ```
#[derive(Debug, Clone)]
pub struct Documentation {
    name: String,
    request_preprocessors: Vec<Preprocessor>,
    response_preprocessors: Vec<Preprocessor>,
    request_fields: Option<Vec<FieldDescriptor>>,
    response_fields: Option<Vec<FieldDescriptor>>,
    path_parameters: Option<Vec<ParameterDescriptor>>,
    query_parameters: Option<Vec<ParameterDescriptor>>,
}

impl Documentation {
    /// Creates the documentation of the operation `name`.
    ///
    /// The name is used as the snippet directory, several calls may share it:
    /// the last one wins on disk.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            request_preprocessors: Vec::new(),
            response_preprocessors: Vec::new(),
            request_fields: None,
            response_fields: None,
            path_parameters: None,
            query_parameters: None,
        }
    }

    /// The operation name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Pretty prints JSON bodies of both the request and the response.
    pub fn pretty_print(self) -> Self {
        self.with_request_preprocessor(Preprocessor::PrettyPrint)
            .with_response_preprocessor(Preprocessor::PrettyPrint)
    }

    /// Adds a request preprocessor, applied after the configured ones.
    pub fn with_request_preprocessor(mut self, preprocessor: Preprocessor) -> Self {
        self.request_preprocessors.push(preprocessor);
        self
    }

    /// Adds a response preprocessor, applied after the configured ones.
    pub fn with_response_preprocessor(mut self, preprocessor: Preprocessor) -> Self {
        self.response_preprocessors.push(preprocessor);
        self
    }

    /// Documents the request payload fields, rendered as `request-fields`.
    pub fn request_fields(mut self, fields: impl IntoIterator<Item = FieldDescriptor>) -> Self {
        self.request_fields = Some(fields.into_iter().collect());
        self
    }

    /// Documents the response payload fields, rendered as `response-fields`.
    pub fn response_fields(mut self, fields: impl IntoIterator<Item = FieldDescriptor>) -> Self {
        self.response_fields = Some(fields.into_iter().collect());
        self
    }

    /// Documents the path parameters, rendered as `path-parameters`.
    pub fn path_parameters(
        mut self,
        parameters: impl IntoIterator<Item = ParameterDescriptor>,
    ) -> Self {
        self.path_parameters = Some(parameters.into_iter().collect());
        self
    }

    /// Documents the query parameters, rendered as `query-parameters`.
    pub fn query_parameters(
        mut self,
        parameters: impl IntoIterator<Item = ParameterDescriptor>,
    ) -> Self {
        self.query_parameters = Some(parameters.into_iter().collect());
        self
    }
}

/// Renders documented calls and dispatches them to the recorders.
#[derive(Debug, Clone)]
pub(crate) struct Documenter {
    config: DocumentationConfig,
    recorders: Vec<Arc<dyn SnippetRecorder>>,
}

impl Documenter {
    pub(crate) fn new(
        config: DocumentationConfig,
        recorders: Vec<Arc<dyn SnippetRecorder>>,
    ) -> Self {
        Self { config, recorders }
    }

    pub(crate) fn record(
        &self,
        documentation: &Documentation,
        mut request: CapturedRequest,
        mut response: CapturedResponse,
    ) -> Result<(), DocumentationError> {
        let request_preprocessors = self
            .config
            .request_preprocessors
            .iter()
            .chain(&documentation.request_preprocessors);
        for preprocessor in request_preprocessors {
            preprocessor.preprocess_request(&mut request)?;
        }
        let response_preprocessors = self
            .config
            .response_preprocessors
            .iter()
            .chain(&documentation.response_preprocessors);
        for preprocessor in response_preprocessors {
            preprocessor.preprocess_response(&mut response)?;
        }

        let operation = Operation {
            name: documentation.name.clone(),
            request,
            response,
        };
        let snippets = self.render(documentation, &operation)?;

        debug!(
            operation = operation.name(),
            snippets = snippets.len(),
            "operation documented"
        );
        for recorder in &self.recorders {
            recorder.record(&operation, &snippets)?;
        }
        Ok(())
    }

    fn render(
        &self,
        documentation: &Documentation,
        operation: &Operation,
    ) -> Result<Vec<RenderedSnippet>, DocumentationError> {
        let format = self.config.format;
        let name = operation.name();

        let mut snippets = self
            .config
            .default_snippets()
            .iter()
            .map(|snippet| render::default_snippet(*snippet, operation, &self.config))
            .collect::<Vec<_>>();

        if let Some(descriptors) = &documentation.path_parameters {
            let template = operation.request.path_template();
            let rows = parameters::document_path_parameters(name, template, descriptors)?;
            snippets.push(render::parameters_table(
                "path-parameters",
                Some(template),
                &rows,
                format,
            ));
        }

        if let Some(descriptors) = &documentation.query_parameters {
            let query = operation.request.query_parameters();
            let rows = parameters::document_query_parameters(name, &query, descriptors)?;
            snippets.push(render::parameters_table(
                "query-parameters",
                None,
                &rows,
                format,
            ));
        }

        if let Some(descriptors) = &documentation.request_fields {
            check_json(name, PayloadKind::Request, operation.request.content_type())?;
            let rows = fields::document_fields(
                name,
                PayloadKind::Request,
                operation.request.body(),
                descriptors,
            )?;
            snippets.push(render::fields_table("request-fields", &rows, format));
        }

        if let Some(descriptors) = &documentation.response_fields {
            check_json(name, PayloadKind::Response, operation.response.content_type())?;
            let rows = fields::document_fields(
                name,
                PayloadKind::Response,
                operation.response.body(),
                descriptors,
            )?;
            snippets.push(render::fields_table("response-fields", &rows, format));
        }

        Ok(snippets)
    }
}

/// A declared content type must be JSON, an absent one is left to the body parsing.
fn check_json(
    operation: &str,
    payload: PayloadKind,
    content_type: Option<mime::Mime>,
) -> Result<(), DocumentationError> {
    match content_type {
        Some(mime) if !is_json(&mime) => Err(DocumentationError::NotJson {
            operation: operation.to_string(),
            payload,
        }),
        _ => Ok(()),
    }
}
