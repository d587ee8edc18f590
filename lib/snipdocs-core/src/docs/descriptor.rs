use serde_json::Value;

/// The JSON type of a documented field.
///
/// When a [`FieldDescriptor`] does not declare a type explicitly, the type is
/// resolved from the payload. A field matching values of different types (for
/// example a `[].name` that is sometimes `null`) resolves to [`FieldType::Varies`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum FieldType {
    /// A JSON array.
    Array,
    /// A JSON boolean.
    Boolean,
    /// A JSON object.
    Object,
    /// A JSON number.
    Number,
    /// The JSON `null` value.
    Null,
    /// A JSON string.
    String,
    /// Values with different types.
    Varies,
}

impl FieldType {
    /// Returns the type of a single JSON value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }

    /// Resolves the common type of several values.
    ///
    /// Returns `None` when there is no value.
    pub fn resolve<'a>(values: impl IntoIterator<Item = &'a Value>) -> Option<Self> {
        values
            .into_iter()
            .map(Self::of)
            .reduce(|acc, it| if acc == it { acc } else { Self::Varies })
    }
}

/// Describes a field of a JSON request or response payload.
///
/// Paths use dotted keys, and `[]` for every element of an array:
///
/// ```rust
/// use snipdocs_core::{FieldDescriptor, FieldType};
///
/// let single = FieldDescriptor::new("userId", "User's identifier");
/// let in_list = FieldDescriptor::new("[].userId", "User's identifier");
/// let list = FieldDescriptor::new("[]", "Users list").with_type(FieldType::Array);
/// let nickname = FieldDescriptor::new("nickname", "Optional nickname").optional();
/// ```
///
/// Documenting a field also documents all of its descendants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    path: String,
    description: String,
    field_type: Option<FieldType>,
    optional: bool,
    ignored: bool,
}

impl FieldDescriptor {
    /// Creates a descriptor for the field at `path`.
    pub fn new(path: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            description: description.into(),
            field_type: None,
            optional: false,
            ignored: false,
        }
    }

    /// Declares the field type instead of resolving it from the payload.
    ///
    /// A payload value with another type fails the documentation.
    pub fn with_type(mut self, field_type: FieldType) -> Self {
        self.field_type = Some(field_type);
        self
    }

    /// Marks the field as optional: it may be absent from the payload.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Marks the field as ignored: it is accepted in the payload but not rendered.
    pub fn ignored(mut self) -> Self {
        self.ignored = true;
        self
    }

    /// The field path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The field description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The explicitly declared type, if any.
    pub fn field_type(&self) -> Option<FieldType> {
        self.field_type
    }

    /// Whether the field may be absent.
    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// Whether the field is left out of the rendered snippet.
    pub fn is_ignored(&self) -> bool {
        self.ignored
    }
}

/// Describes a path or query parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDescriptor {
    name: String,
    description: String,
    optional: bool,
}

impl ParameterDescriptor {
    /// Creates a descriptor for the parameter `name`.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            optional: false,
        }
    }

    /// Marks the parameter as optional: it may be absent from the request.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// The parameter name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The parameter description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Whether the parameter may be absent.
    pub fn is_optional(&self) -> bool {
        self.optional
    }
}
