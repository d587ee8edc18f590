use std::future::Future;
use std::net::TcpListener;
use std::time::Duration;

use crate::{ApiClient, ApiClientBuilder};

/// The result of a health check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStatus {
    /// The server is ready.
    Healthy,
    /// The server is not ready yet, retry later.
    Unhealthy,
    /// No health check: wait until a TCP connection succeeds.
    Uncheckable,
}

/// A server started by a [`TestClient`](super::TestClient).
///
/// ```rust,no_run
/// use std::net::TcpListener;
///
/// use snipdocs_core::ApiClient;
/// use snipdocs_core::test_client::{HealthStatus, TestServer};
///
/// #[derive(Debug)]
/// struct MyServer;
///
/// impl TestServer for MyServer {
///     type Error = std::io::Error;
///
///     async fn launch(&self, listener: TcpListener) -> Result<(), Self::Error> {
///         listener.set_nonblocking(true)?;
///         let _listener = tokio::net::TcpListener::from_std(listener)?;
///         // serve the application
///         Ok(())
///     }
///
///     async fn is_healthy(&self, client: &mut ApiClient) -> Result<HealthStatus, Self::Error> {
///         let Ok(call) = client.get("/api/health") else {
///             return Ok(HealthStatus::Unhealthy);
///         };
///         let status = if call.await.is_ok() {
///             HealthStatus::Healthy
///         } else {
///             HealthStatus::Unhealthy
///         };
///         Ok(status)
///     }
/// }
/// ```
pub trait TestServer {
    /// The error raised by the server.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Serves the application on `listener` until the task is aborted.
    fn launch(&self, listener: TcpListener) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Checks whether the server accepts requests.
    ///
    /// Defaults to [`HealthStatus::Uncheckable`].
    fn is_healthy(
        &self,
        _client: &mut ApiClient,
    ) -> impl Future<Output = Result<HealthStatus, Self::Error>> + Send {
        std::future::ready(Ok(HealthStatus::Uncheckable))
    }

    /// The client and health check configuration.
    fn config(&self) -> TestServerConfig {
        TestServerConfig::default()
    }
}

/// Configures the client and the health check of a [`TestServer`].
#[derive(Debug, Clone)]
pub struct TestServerConfig {
    /// The client configuration, the port is set by the test client.
    pub api_client: Option<ApiClientBuilder>,
    /// Minimum delay between health checks.
    pub min_backoff_delay: Duration,
    /// Maximum delay between health checks.
    pub max_backoff_delay: Duration,
    /// Whether to add jitter to the delays.
    pub backoff_jitter: bool,
    /// Maximum number of health checks.
    pub max_retry_attempts: usize,
}

impl Default for TestServerConfig {
    fn default() -> Self {
        Self {
            api_client: None,
            min_backoff_delay: Duration::from_millis(10),
            max_backoff_delay: Duration::from_secs(1),
            backoff_jitter: true,
            max_retry_attempts: 10,
        }
    }
}
