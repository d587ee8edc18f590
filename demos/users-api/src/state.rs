use std::time::{Duration, Instant};

use crate::ApiConfig;
use crate::users::repository::UserRepository;

/// The application state
#[derive(Clone, axum::extract::FromRef)]
pub struct AppState {
    #[from_ref(skip)]
    started_at: Instant,
    config: ApiConfig,
    repository: UserRepository,
}

impl AppState {
    /// Create a state
    pub fn new(config: ApiConfig) -> Self {
        Self {
            started_at: Instant::now(),
            config,
            repository: UserRepository::new(),
        }
    }
}

impl AppState {
    pub(crate) fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }
}
