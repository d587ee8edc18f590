use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// A fresh random identifier
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

/// A user, as sent and received by the API.
///
/// `userId` is always serialized, as `null` when the server should assign it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: Option<UserId>,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

impl User {
    pub fn new(
        user_id: Option<UserId>,
        username: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            user_id,
            username: username.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    pub(crate) fn placeholder(id: UserId) -> Self {
        Self::new(Some(id), "", "", "")
    }

    pub(crate) fn with_id(self, id: UserId) -> Self {
        Self {
            user_id: Some(id),
            ..self
        }
    }
}
