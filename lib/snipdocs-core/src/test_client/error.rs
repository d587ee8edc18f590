//! Error types for the test client.

use std::time::Duration;

use crate::ApiClientError;

/// Errors raised while starting a [`TestClient`](super::TestClient).
#[derive(Debug, derive_more::Error, derive_more::Display, derive_more::From)]
pub enum TestAppError {
    /// Binding the listener failed.
    #[display("I/O error: {_0}")]
    IoError(tokio::io::Error),

    /// The API client cannot be built.
    #[display("API client error: {_0}")]
    ClientError(ApiClientError),

    /// The server did not become healthy.
    #[from(skip)]
    #[display("Server failed to become healthy within {timeout:?}")]
    UnhealthyServer {
        /// The maximum backoff delay.
        timeout: Duration,
    },
}
