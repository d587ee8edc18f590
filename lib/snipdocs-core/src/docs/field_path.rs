use std::fmt;

use indexmap::IndexSet;
use serde_json::Value;

use super::DocumentationError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Segment {
    Key(String),
    Array,
}

/// A parsed field path such as `userId`, `[].userId` or `owner['first.name']`.
///
/// `[]` selects every element of an array; a trailing `[]` selects the array itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct FieldPath {
    segments: Vec<Segment>,
}

impl FieldPath {
    pub(crate) fn parse(raw: &str) -> Result<Self, DocumentationError> {
        let invalid = |reason: &str| DocumentationError::InvalidFieldPath {
            path: raw.to_string(),
            reason: reason.to_string(),
        };

        let mut segments = Vec::new();
        let mut current = String::new();
        let mut after_dot = false;
        let mut needs_separator = false;
        let mut chars = raw.chars().peekable();

        while let Some(ch) = chars.next() {
            match ch {
                '.' => {
                    if !current.is_empty() {
                        segments.push(Segment::Key(std::mem::take(&mut current)));
                    } else if segments.is_empty() || after_dot {
                        return Err(invalid("empty key"));
                    }
                    after_dot = true;
                    needs_separator = false;
                }
                '[' => {
                    if after_dot {
                        return Err(invalid("empty key"));
                    }
                    if !current.is_empty() {
                        segments.push(Segment::Key(std::mem::take(&mut current)));
                    }
                    match chars.next() {
                        Some(']') => segments.push(Segment::Array),
                        Some('\'') => {
                            let mut key = String::new();
                            loop {
                                match chars.next() {
                                    Some('\'') if chars.peek() == Some(&']') => {
                                        chars.next();
                                        break;
                                    }
                                    Some(other) => key.push(other),
                                    None => return Err(invalid("unterminated bracket")),
                                }
                            }
                            if key.is_empty() {
                                return Err(invalid("empty key"));
                            }
                            segments.push(Segment::Key(key));
                        }
                        _ => return Err(invalid("expected '[]' or \"['key']\"")),
                    }
                    needs_separator = true;
                }
                other => {
                    if needs_separator {
                        return Err(invalid("expected '.' after ']'"));
                    }
                    current.push(other);
                    after_dot = false;
                }
            }
        }

        if after_dot {
            return Err(invalid("trailing '.'"));
        }
        if !current.is_empty() {
            segments.push(Segment::Key(current));
        }
        if segments.is_empty() {
            return Err(invalid("empty path"));
        }

        Ok(Self { segments })
    }

    /// The values selected by this path.
    pub(crate) fn values<'a>(&self, root: &'a Value) -> Vec<&'a Value> {
        self.walk(root).0
    }

    /// Whether the path exists in the payload.
    ///
    /// A path crossing an empty array is present: there is no element to contradict it.
    pub(crate) fn is_present(&self, root: &Value) -> bool {
        let (values, crossed_empty_array) = self.walk(root);
        !values.is_empty() || crossed_empty_array
    }

    /// Whether `other` is this path or one of its descendants.
    pub(crate) fn covers(&self, other: &Self) -> bool {
        other.segments.starts_with(&self.segments)
    }

    fn walk<'a>(&self, root: &'a Value) -> (Vec<&'a Value>, bool) {
        let mut current = vec![root];
        let mut crossed_empty_array = false;
        let last = self.segments.len().saturating_sub(1);

        for (index, segment) in self.segments.iter().enumerate() {
            current = match segment {
                Segment::Key(key) => current
                    .into_iter()
                    .filter_map(|value| value.as_object().and_then(|object| object.get(key)))
                    .collect(),
                Segment::Array if index == last => {
                    current.into_iter().filter(|value| value.is_array()).collect()
                }
                Segment::Array => {
                    let arrays = current
                        .into_iter()
                        .filter_map(Value::as_array)
                        .collect::<Vec<_>>();
                    if !arrays.is_empty() && arrays.iter().all(|array| array.is_empty()) {
                        crossed_empty_array = true;
                    }
                    arrays.into_iter().flatten().collect()
                }
            };
        }

        (current, crossed_empty_array)
    }

    /// Lists every leaf field of a payload: scalars, empty objects and empty arrays.
    pub(crate) fn leaves(root: &Value) -> Vec<Self> {
        let mut result = IndexSet::new();
        collect_leaves(root, &mut Vec::new(), &mut result);
        result.into_iter().collect()
    }
}

fn collect_leaves(value: &Value, prefix: &mut Vec<Segment>, result: &mut IndexSet<FieldPath>) {
    match value {
        Value::Object(object) if !object.is_empty() => {
            for (key, child) in object {
                prefix.push(Segment::Key(key.clone()));
                collect_leaves(child, prefix, result);
                prefix.pop();
            }
        }
        Value::Array(array) if !array.is_empty() => {
            prefix.push(Segment::Array);
            for child in array {
                collect_leaves(child, prefix, result);
            }
            prefix.pop();
        }
        _ => {
            if !prefix.is_empty() {
                result.insert(FieldPath {
                    segments: prefix.clone(),
                });
            }
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Array => write!(f, "[]")?,
                Segment::Key(key) if key.contains(['.', '[', ']']) => write!(f, "['{key}']")?,
                Segment::Key(key) if index == 0 => write!(f, "{key}")?,
                Segment::Key(key) => write!(f, ".{key}")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn path(raw: &str) -> FieldPath {
        FieldPath::parse(raw).expect("valid path")
    }

    #[test]
    fn should_parse_and_display_paths() {
        for raw in ["userId", "[]", "[].userId", "owner.name", "tags[]", "a[].b[].c"] {
            assert_eq!(path(raw).to_string(), raw);
        }
    }

    #[test]
    fn should_parse_bracket_keys() {
        let parsed = path("owner['first.name']");
        assert_eq!(parsed.to_string(), "owner['first.name']");

        let value = json!({"owner": {"first.name": "Foo"}});
        assert_eq!(parsed.values(&value), vec![&json!("Foo")]);
    }

    #[test]
    fn should_reject_invalid_paths() {
        for raw in ["", ".a", "a.", "a..b", "a.[]", "[]a", "[x]", "['a'", "['']"] {
            let result = FieldPath::parse(raw);
            assert!(
                matches!(result, Err(DocumentationError::InvalidFieldPath { .. })),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn should_select_values() {
        let users = json!([
            {"userId": "1", "username": "foobar"},
            {"userId": "2", "username": "foobar1"}
        ]);

        assert_eq!(
            path("[].userId").values(&users),
            vec![&json!("1"), &json!("2")]
        );
        assert_eq!(path("[]").values(&users), vec![&users]);
        assert!(path("userId").values(&users).is_empty());
    }

    #[test]
    fn should_check_presence() {
        let user = json!({"userId": null, "username": "foobar"});

        assert!(path("userId").is_present(&user));
        assert!(path("username").is_present(&user));
        assert!(!path("firstName").is_present(&user));
    }

    #[test]
    fn should_treat_fields_under_empty_array_as_present() {
        assert!(path("[].userId").is_present(&json!([])));
        assert!(!path("[].userId").is_present(&json!({})));
    }

    #[test]
    fn should_list_leaves() {
        let payload = json!({
            "users": [
                {"userId": "1", "tags": []},
                {"userId": "2", "tags": []}
            ],
            "meta": {}
        });

        let leaves = FieldPath::leaves(&payload)
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>();

        assert_eq!(leaves, vec!["users[].userId", "users[].tags", "meta"]);
    }

    #[test]
    fn should_cover_descendants() {
        assert!(path("[]").covers(&path("[].userId")));
        assert!(path("owner").covers(&path("owner.name")));
        assert!(path("userId").covers(&path("userId")));
        assert!(!path("user").covers(&path("userId")));
        assert!(!path("[].userId").covers(&path("[]")));
    }
}
