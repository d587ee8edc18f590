use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use super::domain::{User, UserId};
use crate::errors::RepositoryError;

#[derive(Clone, Default)]
pub(crate) struct UserRepository {
    data: Arc<RwLock<HashMap<UserId, User>>>,
}

impl UserRepository {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) async fn list(&self, offset: usize, limit: usize) -> Vec<User> {
        let data = self.data.read().await;

        let mut result = data.values().cloned().collect::<Vec<_>>();
        // sort
        result.sort_by(|a, b| {
            (a.username.as_str(), a.user_id).cmp(&(b.username.as_str(), b.user_id))
        });
        // Limit/offset
        result.into_iter().skip(offset).take(limit).collect()
    }

    pub(crate) async fn get(&self, id: UserId) -> Result<User, RepositoryError> {
        let data = self.data.read().await;
        data.get(&id)
            .cloned()
            .ok_or(RepositoryError::UserNotFound { id })
    }

    pub(crate) async fn create(&self, new_user: User) -> Result<User, RepositoryError> {
        let mut data = self.data.write().await;
        let id = new_user.user_id.unwrap_or_else(UserId::random);
        if data.contains_key(&id) {
            return Err(RepositoryError::UserAlreadyExists { id });
        }

        let user = new_user.with_id(id);
        data.insert(id, user.clone());

        Ok(user)
    }

    pub(crate) async fn update(
        &self,
        id: UserId,
        updated_user: User,
        upsert: bool,
    ) -> Result<User, RepositoryError> {
        if let Some(body) = updated_user.user_id.filter(|body| *body != id) {
            return Err(RepositoryError::MismatchedId { path: id, body });
        }

        let mut data = self.data.write().await;
        if !upsert && !data.contains_key(&id) {
            return Err(RepositoryError::UserNotFound { id });
        }

        let user = updated_user.with_id(id);
        if data.insert(id, user.clone()).is_none() {
            debug!(%id, "unknown user created by update");
        }

        Ok(user)
    }

    pub(crate) async fn delete(&self, id: UserId) -> Result<User, RepositoryError> {
        let mut data = self.data.write().await;

        let Some(result) = data.remove(&id) else {
            return Err(RepositoryError::UserNotFound { id });
        };

        Ok(result)
    }
}
