use super::FieldType;

/// The payload a field descriptor applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum PayloadKind {
    /// The request body.
    #[display("request")]
    Request,
    /// The response body.
    #[display("response")]
    Response,
}

/// Where a documented parameter lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum ParameterLocation {
    /// A `{name}` placeholder of the path template.
    #[display("path")]
    Path,
    /// A query string parameter.
    #[display("query")]
    Query,
}

/// Errors raised while documenting an operation.
///
/// Validation errors name the operation so that a failing scenario points to the step at fault.
#[derive(Debug, derive_more::Error, derive_more::Display, derive_more::From)]
pub enum DocumentationError {
    /// Writing snippets failed.
    #[display("I/O error: {_0}")]
    IoError(std::io::Error),

    /// A payload could not be parsed or written as JSON.
    #[display("JSON error: {_0}")]
    JsonError(serde_json::Error),

    /// A field descriptor path cannot be parsed.
    #[from(skip)]
    #[display("Invalid field path '{path}': {reason}")]
    InvalidFieldPath {
        /// The raw path.
        path: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The operation name cannot be used as a snippet directory.
    #[from(skip)]
    #[display("Invalid operation name '{name}': {reason}")]
    InvalidOperationName {
        /// The operation name.
        name: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Fields are documented on a payload that is empty or not JSON.
    #[from(skip)]
    #[display("Operation '{operation}': cannot document {payload} fields, the body is not JSON")]
    NotJson {
        /// The operation name.
        operation: String,
        /// The payload at fault.
        payload: PayloadKind,
    },

    /// Documented fields are absent from the payload.
    #[from(skip)]
    #[display("Operation '{operation}': {payload} fields not found in the payload: {paths:?}")]
    MissingFields {
        /// The operation name.
        operation: String,
        /// The payload at fault.
        payload: PayloadKind,
        /// The missing field paths.
        paths: Vec<String>,
    },

    /// Payload fields are not covered by any descriptor.
    #[from(skip)]
    #[display("Operation '{operation}': {payload} fields are not documented: {paths:?}")]
    UndocumentedFields {
        /// The operation name.
        operation: String,
        /// The payload at fault.
        payload: PayloadKind,
        /// The undocumented field paths.
        paths: Vec<String>,
    },

    /// A field declared with a type holds a value of another type.
    #[from(skip)]
    #[display(
        "Operation '{operation}': {payload} field '{path}' is documented as {expected} but is {actual}"
    )]
    FieldTypeMismatch {
        /// The operation name.
        operation: String,
        /// The payload at fault.
        payload: PayloadKind,
        /// The field path.
        path: String,
        /// The declared type.
        expected: FieldType,
        /// The payload type.
        actual: FieldType,
    },

    /// Documented parameters are absent from the request.
    #[from(skip)]
    #[display("Operation '{operation}': {location} parameters not found in the request: {names:?}")]
    MissingParameters {
        /// The operation name.
        operation: String,
        /// Path or query.
        location: ParameterLocation,
        /// The missing parameter names.
        names: Vec<String>,
    },

    /// Request parameters are not covered by any descriptor.
    #[from(skip)]
    #[display("Operation '{operation}': {location} parameters are not documented: {names:?}")]
    UndocumentedParameters {
        /// The operation name.
        operation: String,
        /// Path or query.
        location: ParameterLocation,
        /// The undocumented parameter names.
        names: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documentation_error_is_send_and_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<DocumentationError>();
        assert_sync::<DocumentationError>();
    }

    #[test]
    fn should_display_missing_fields() {
        let error = DocumentationError::MissingFields {
            operation: "getUser".to_string(),
            payload: PayloadKind::Response,
            paths: vec!["userId".to_string()],
        };

        insta::assert_snapshot!(error, @r#"Operation 'getUser': response fields not found in the payload: ["userId"]"#);
    }

    #[test]
    fn should_display_undocumented_parameters() {
        let error = DocumentationError::UndocumentedParameters {
            operation: "getUsers".to_string(),
            location: ParameterLocation::Query,
            names: vec!["sort".to_string()],
        };

        insta::assert_snapshot!(error, @r#"Operation 'getUsers': query parameters are not documented: ["sort"]"#);
    }
}
