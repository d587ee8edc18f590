use indexmap::IndexSet;

use super::render::ParameterRow;
use super::{DocumentationError, ParameterDescriptor, ParameterLocation};
use crate::client::path_template_names;

/// Checks path parameter descriptors against the `{name}` placeholders of the template.
pub(crate) fn document_path_parameters(
    operation: &str,
    template: &str,
    descriptors: &[ParameterDescriptor],
) -> Result<Vec<ParameterRow>, DocumentationError> {
    let actual = path_template_names(template).collect::<IndexSet<_>>();
    document(operation, ParameterLocation::Path, &actual, descriptors)
}

/// Checks query parameter descriptors against the parameters sent in the request.
pub(crate) fn document_query_parameters(
    operation: &str,
    query: &[(String, String)],
    descriptors: &[ParameterDescriptor],
) -> Result<Vec<ParameterRow>, DocumentationError> {
    let actual = query
        .iter()
        .map(|(name, _)| name.as_str())
        .collect::<IndexSet<_>>();
    document(operation, ParameterLocation::Query, &actual, descriptors)
}

fn document(
    operation: &str,
    location: ParameterLocation,
    actual: &IndexSet<&str>,
    descriptors: &[ParameterDescriptor],
) -> Result<Vec<ParameterRow>, DocumentationError> {
    let missing = descriptors
        .iter()
        .filter(|descriptor| !descriptor.is_optional() && !actual.contains(descriptor.name()))
        .map(|descriptor| descriptor.name().to_string())
        .collect::<Vec<_>>();
    if !missing.is_empty() {
        return Err(DocumentationError::MissingParameters {
            operation: operation.to_string(),
            location,
            names: missing,
        });
    }

    let undocumented = actual
        .iter()
        .filter(|name| !descriptors.iter().any(|descriptor| descriptor.name() == **name))
        .map(|name| name.to_string())
        .collect::<Vec<_>>();
    if !undocumented.is_empty() {
        return Err(DocumentationError::UndocumentedParameters {
            operation: operation.to_string(),
            location,
            names: undocumented,
        });
    }

    Ok(descriptors
        .iter()
        .map(|descriptor| ParameterRow {
            name: descriptor.name().to_string(),
            description: descriptor.description().to_string(),
        })
        .collect())
}
