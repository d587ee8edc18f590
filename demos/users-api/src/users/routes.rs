use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tracing::warn;

use super::domain::{User, UserId};
use super::repository::UserRepository;
use crate::errors::RepositoryError;
use crate::{ApiConfig, AppState};

pub(crate) fn user_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route(
            "/{user_id}",
            get(get_user).put(update_user).delete(delete_user),
        )
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct ListOption {
    page: usize,
    size: usize,
}

impl Default for ListOption {
    fn default() -> Self {
        Self { page: 0, size: 20 }
    }
}

async fn list_users(
    State(repo): State<UserRepository>,
    Query(ListOption { page, size }): Query<ListOption>,
) -> impl IntoResponse {
    let size = size.min(100);
    let users = repo.list(page.saturating_mul(size), size).await;
    Json(users)
}

async fn create_user(
    State(repo): State<UserRepository>,
    Json(new_user): Json<User>,
) -> impl IntoResponse {
    repo.create(new_user).await.map(Json)
}

async fn get_user(
    State(repo): State<UserRepository>,
    Path(user_id): Path<UserId>,
) -> impl IntoResponse {
    repo.get(user_id).await.map(Json)
}

async fn update_user(
    State(repo): State<UserRepository>,
    State(config): State<ApiConfig>,
    Path(user_id): Path<UserId>,
    Json(user): Json<User>,
) -> impl IntoResponse {
    repo.update(user_id, user, config.lenient_updates)
        .await
        .map(Json)
}

async fn delete_user(
    State(repo): State<UserRepository>,
    State(config): State<ApiConfig>,
    Path(user_id): Path<UserId>,
) -> impl IntoResponse {
    match repo.delete(user_id).await {
        Err(RepositoryError::UserNotFound { id }) if config.lenient_deletes => {
            warn!(%id, "deleting an unknown user");
            Ok(Json(User::placeholder(id)))
        }
        result => result.map(Json),
    }
}
