use headers::ContentType;
use serde::Serialize;

use super::ApiClientError;

/// A request body with its content type.
#[derive(Clone, derive_more::Debug)]
pub struct CallBody {
    pub(super) content_type: ContentType,
    #[debug(ignore)]
    pub(super) data: Vec<u8>,
}

impl CallBody {
    /// Serializes `t` as `application/json`.
    pub fn json<T>(t: &T) -> Result<Self, ApiClientError>
    where
        T: Serialize + ?Sized,
    {
        let content_type = ContentType::json();
        let data = serde_json::to_vec(t)?;
        Ok(Self { content_type, data })
    }

    /// A raw body with an explicit content type.
    pub fn raw(data: Vec<u8>, content_type: ContentType) -> Self {
        Self { content_type, data }
    }

    /// A `text/plain` body.
    pub fn text(text: &str) -> Self {
        Self::raw(text.as_bytes().to_vec(), ContentType::text())
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;

    use super::*;

    #[derive(Debug, Serialize)]
    #[serde(rename_all = "camelCase")]
    struct TestData {
        first_name: String,
        user_id: Option<u32>,
    }

    #[test]
    fn test_call_body_json_creates_valid_body() {
        let test_data = TestData {
            first_name: "Foo".to_string(),
            user_id: None,
        };

        let body = CallBody::json(&test_data).expect("should create body");

        insta::assert_debug_snapshot!(body, @r#"
        CallBody {
            content_type: ContentType(
                "application/json",
            ),
            ..
        }
        "#);
        insta::assert_snapshot!(
            String::from_utf8_lossy(&body.data),
            @r#"{"firstName":"Foo","userId":null}"#
        );
    }

    #[test]
    fn test_call_body_text() {
        let body = CallBody::text("hello");

        assert_eq!(body.content_type, ContentType::text());
        assert_eq!(body.data, b"hello");
    }
}
