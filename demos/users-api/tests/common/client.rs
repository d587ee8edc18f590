#![allow(clippy::missing_errors_doc, dead_code)]
use anyhow::Context;
use http::StatusCode;

use snipdocs_core::{CallPath, CallQuery, Documentation, FieldDescriptor, ParameterDescriptor};
use users_api::users::{User, UserId};

use super::TestApp;

const USERS: &str = "/v1/users";
const USER: &str = "/v1/users/{userId}";

/// Descriptors of the four user fields, prefixed by `prefix` (e.g. `[].`).
pub fn user_fields(prefix: &str) -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::new(format!("{prefix}userId"), "User's identifier"),
        FieldDescriptor::new(format!("{prefix}firstName"), "User's first name"),
        FieldDescriptor::new(format!("{prefix}lastName"), "User's last name"),
        FieldDescriptor::new(format!("{prefix}username"), "User's username"),
    ]
}

fn user_path_parameters() -> [ParameterDescriptor; 1] {
    [ParameterDescriptor::new("userId", "User's identifier")]
}

fn user_path(id: UserId) -> CallPath {
    CallPath::from(USER).add_param("userId", id)
}

impl TestApp {
    pub async fn insert_user(&self, user: &User) -> anyhow::Result<User> {
        let result = self
            .post(USERS)?
            .accept_json()
            .json(user)?
            .with_expected_status_code(StatusCode::OK)
            .document(
                Documentation::new("insertUser")
                    .pretty_print()
                    .request_fields(user_fields(""))
                    .response_fields(user_fields("")),
            )
            .await
            .context("insert user")?
            .as_json()?;
        Ok(result)
    }

    pub async fn get_user(&self, id: UserId) -> anyhow::Result<User> {
        let result = self
            .get(user_path(id))?
            .accept_json()
            .with_expected_status_code(StatusCode::OK)
            .expect_not_empty("$.userId")
            .expect_not_empty("$.firstName")
            .expect_not_empty("$.lastName")
            .expect_not_empty("$.username")
            .document(
                Documentation::new("getUser")
                    .pretty_print()
                    .path_parameters(user_path_parameters())
                    .response_fields(user_fields("")),
            )
            .await
            .context("get user")?
            .as_json()?;
        Ok(result)
    }

    pub async fn list_users(&self, page: usize, size: usize) -> anyhow::Result<Vec<User>> {
        let mut fields = vec![FieldDescriptor::new("[]", "Users list")];
        fields.extend(user_fields("[]."));

        let result = self
            .get(USERS)?
            .with_query(
                CallQuery::new()
                    .add_param("page", page)
                    .add_param("size", size),
            )
            .accept_json()
            .with_expected_status_code(StatusCode::OK)
            .expect_array("$")
            .expect_not_empty("$[*].userId")
            .expect_not_empty("$[*].firstName")
            .expect_not_empty("$[*].lastName")
            .expect_not_empty("$[*].username")
            .document(
                Documentation::new("getUsers")
                    .pretty_print()
                    .query_parameters([
                        ParameterDescriptor::new("page", "Page of results"),
                        ParameterDescriptor::new("size", "Size of results"),
                    ])
                    .response_fields(fields),
            )
            .await
            .context("list users")?
            .as_json()?;
        Ok(result)
    }

    pub async fn update_user(&self, id: UserId, user: &User) -> anyhow::Result<User> {
        let result = self
            .put(user_path(id))?
            .accept_json()
            .json(user)?
            .with_expected_status_code(StatusCode::OK)
            .document(
                Documentation::new("updateUser")
                    .pretty_print()
                    .path_parameters(user_path_parameters())
                    .request_fields(user_fields(""))
                    .response_fields(user_fields("")),
            )
            .await
            .context("update user")?
            .as_json()?;
        Ok(result)
    }

    pub async fn delete_user(&self, id: UserId) -> anyhow::Result<User> {
        let result = self
            .delete(user_path(id))?
            .accept_json()
            .with_expected_status_code(StatusCode::OK)
            .document(
                Documentation::new("deleteUser")
                    .pretty_print()
                    .path_parameters(user_path_parameters())
                    .response_fields(user_fields("")),
            )
            .await
            .context("delete user")?
            .as_json()?;
        Ok(result)
    }
}
