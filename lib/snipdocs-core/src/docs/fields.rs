use serde_json::Value;
use tracing::debug;

use super::field_path::FieldPath;
use super::render::FieldRow;
use super::{DocumentationError, FieldDescriptor, FieldType, PayloadKind};

/// Checks the descriptors against a JSON payload and returns the rows to render.
///
/// Missing fields are reported first, then undocumented ones, then type mismatches.
pub(crate) fn document_fields(
    operation: &str,
    payload: PayloadKind,
    body: &[u8],
    descriptors: &[FieldDescriptor],
) -> Result<Vec<FieldRow>, DocumentationError> {
    let not_json = || DocumentationError::NotJson {
        operation: operation.to_string(),
        payload,
    };
    if body.is_empty() {
        return Err(not_json());
    }
    let root = serde_json::from_slice::<Value>(body).map_err(|error| {
        debug!(%operation, %payload, ?error, "cannot parse payload as JSON");
        not_json()
    })?;

    let parsed = descriptors
        .iter()
        .map(|descriptor| FieldPath::parse(descriptor.path()).map(|path| (descriptor, path)))
        .collect::<Result<Vec<_>, _>>()?;

    let missing = parsed
        .iter()
        .filter(|(descriptor, path)| !descriptor.is_optional() && !path.is_present(&root))
        .map(|(descriptor, _)| descriptor.path().to_string())
        .collect::<Vec<_>>();
    if !missing.is_empty() {
        return Err(DocumentationError::MissingFields {
            operation: operation.to_string(),
            payload,
            paths: missing,
        });
    }

    let undocumented = FieldPath::leaves(&root)
        .into_iter()
        .filter(|leaf| !parsed.iter().any(|(_, path)| path.covers(leaf)))
        .map(|leaf| leaf.to_string())
        .collect::<Vec<_>>();
    if !undocumented.is_empty() {
        return Err(DocumentationError::UndocumentedFields {
            operation: operation.to_string(),
            payload,
            paths: undocumented,
        });
    }

    let mut rows = Vec::with_capacity(parsed.len());
    for (descriptor, path) in parsed {
        let values = path.values(&root);
        if let Some(expected) = descriptor.field_type() {
            check_type(operation, payload, descriptor, expected, &values)?;
        }
        if descriptor.is_ignored() {
            continue;
        }
        let field_type = descriptor
            .field_type()
            .or_else(|| FieldType::resolve(values.iter().copied()))
            .unwrap_or(FieldType::Varies);
        rows.push(FieldRow {
            path: descriptor.path().to_string(),
            field_type,
            description: descriptor.description().to_string(),
        });
    }

    Ok(rows)
}

fn check_type(
    operation: &str,
    payload: PayloadKind,
    descriptor: &FieldDescriptor,
    expected: FieldType,
    values: &[&Value],
) -> Result<(), DocumentationError> {
    if expected == FieldType::Varies {
        return Ok(());
    }
    let mismatch = values.iter().map(|value| FieldType::of(value)).find(|actual| {
        *actual != expected && !(descriptor.is_optional() && *actual == FieldType::Null)
    });
    match mismatch {
        Some(actual) => Err(DocumentationError::FieldTypeMismatch {
            operation: operation.to_string(),
            payload,
            path: descriptor.path().to_string(),
            expected,
            actual,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn user_fields() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::new("userId", "User id"),
            FieldDescriptor::new("username", "Username"),
            FieldDescriptor::new("firstName", "First name"),
            FieldDescriptor::new("lastName", "Last name"),
        ]
    }

    fn body(value: Value) -> Vec<u8> {
        serde_json::to_vec(&value).expect("serializable")
    }

    #[test]
    fn should_resolve_field_types() {
        let payload = body(json!({
            "userId": "3f2b",
            "username": "foobar",
            "firstName": "Foo",
            "lastName": "Bar"
        }));

        let rows = document_fields("getUser", PayloadKind::Response, &payload, &user_fields())
            .expect("documented");

        let types = rows.iter().map(|row| row.field_type).collect::<Vec<_>>();
        assert_eq!(types, vec![FieldType::String; 4]);
        assert_eq!(rows[1].path, "username");
        assert_eq!(rows[1].description, "Username");
    }

    #[test]
    fn should_report_missing_fields() {
        let payload = body(json!({ "userId": "3f2b", "username": "foobar" }));

        let error = document_fields("getUser", PayloadKind::Response, &payload, &user_fields())
            .expect_err("missing fields");

        insta::assert_snapshot!(error, @r#"Operation 'getUser': response fields not found in the payload: ["firstName", "lastName"]"#);
    }

    #[test]
    fn should_report_undocumented_fields() {
        let payload = body(json!({
            "userId": "3f2b",
            "username": "foobar",
            "firstName": "Foo",
            "lastName": "Bar",
            "address": { "city": "Paris" }
        }));

        let error = document_fields("getUser", PayloadKind::Response, &payload, &user_fields())
            .expect_err("undocumented fields");

        insta::assert_snapshot!(error, @r#"Operation 'getUser': response fields are not documented: ["address.city"]"#);
    }

    #[test]
    fn should_accept_missing_optional_field() {
        let payload = body(json!({ "username": "foobar" }));
        let descriptors = vec![
            FieldDescriptor::new("userId", "User id").optional(),
            FieldDescriptor::new("username", "Username"),
        ];

        let rows = document_fields("insertUser", PayloadKind::Request, &payload, &descriptors)
            .expect("documented");

        assert_eq!(rows[0].field_type, FieldType::Varies);
    }

    #[test]
    fn should_document_array_elements() {
        let payload = body(json!([
            { "userId": "1", "nickname": "foo" },
            { "userId": "2", "nickname": null }
        ]));
        let descriptors = vec![
            FieldDescriptor::new("[]", "Users"),
            FieldDescriptor::new("[].userId", "User id"),
            FieldDescriptor::new("[].nickname", "Nickname"),
        ];

        let rows = document_fields("getUsers", PayloadKind::Response, &payload, &descriptors)
            .expect("documented");

        let types = rows.iter().map(|row| row.field_type).collect::<Vec<_>>();
        assert_eq!(
            types,
            vec![FieldType::Array, FieldType::String, FieldType::Varies]
        );
    }

    #[test]
    fn should_document_empty_array() {
        let payload = body(json!([]));
        let descriptors = vec![
            FieldDescriptor::new("[]", "Users").with_type(FieldType::Array),
            FieldDescriptor::new("[].userId", "User id").with_type(FieldType::String),
        ];

        let rows = document_fields("getUsers", PayloadKind::Response, &payload, &descriptors)
            .expect("documented");

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].field_type, FieldType::String);
    }

    #[test]
    fn should_report_type_mismatch() {
        let payload = body(json!({ "userId": 42 }));
        let descriptors =
            vec![FieldDescriptor::new("userId", "User id").with_type(FieldType::String)];

        let error = document_fields("getUser", PayloadKind::Response, &payload, &descriptors)
            .expect_err("type mismatch");

        insta::assert_snapshot!(error, @"Operation 'getUser': response field 'userId' is documented as String but is Number");
    }

    #[test]
    fn should_skip_ignored_fields() {
        let payload = body(json!({ "userId": "3f2b", "links": { "self": "/users/3f2b" } }));
        let descriptors = vec![
            FieldDescriptor::new("userId", "User id"),
            FieldDescriptor::new("links", "Hypermedia links").ignored(),
        ];

        let rows = document_fields("getUser", PayloadKind::Response, &payload, &descriptors)
            .expect("documented");

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].path, "userId");
    }

    #[test]
    fn should_reject_non_json_body() {
        let error = document_fields("getUser", PayloadKind::Response, b"", &user_fields())
            .expect_err("not json");

        assert!(matches!(
            error,
            DocumentationError::NotJson {
                payload: PayloadKind::Response,
                ..
            }
        ));
    }
}
