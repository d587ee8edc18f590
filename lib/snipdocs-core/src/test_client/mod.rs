//! Run an application in-process and document it through an [`ApiClient`].
//!
//! ```rust,no_run
//! use std::net::TcpListener;
//!
//! use snipdocs_core::Documentation;
//! use snipdocs_core::test_client::{TestClient, TestServer};
//!
//! #[derive(Debug)]
//! struct MyServer;
//!
//! impl TestServer for MyServer {
//!     type Error = std::io::Error;
//!
//!     async fn launch(&self, listener: TcpListener) -> Result<(), Self::Error> {
//!         listener.set_nonblocking(true)?;
//!         let _listener = tokio::net::TcpListener::from_std(listener)?;
//!         // serve the application
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::test]
//! async fn document_health() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = TestClient::start(MyServer).await?;
//!     client
//!         .get("/api/health")?
//!         .document(Documentation::new("health"))
//!         .await?;
//!     Ok(())
//! }
//! ```

use std::net::{Ipv4Addr, SocketAddr, TcpListener};
use std::sync::Arc;
use std::time::Duration;

use backon::{ExponentialBuilder, Retryable};
use tracing::{debug, error, info};

use crate::ApiClient;

mod error;
pub use self::error::*;

mod test_server;
pub use self::test_server::*;

/// A running [`TestServer`] and an [`ApiClient`] pointing at it.
///
/// The client is reachable through `Deref`. Dropping the `TestClient` aborts the server.
#[derive(Debug, derive_more::Deref, derive_more::DerefMut)]
pub struct TestClient<T> {
    local_addr: SocketAddr,
    #[deref]
    #[deref_mut]
    client: ApiClient,
    handle: Option<tokio::task::JoinHandle<()>>,
    test_server: Arc<T>,
}

impl<T> TestClient<T>
where
    T: TestServer + Send + Sync + 'static,
{
    /// Starts the server on `127.0.0.1` with an ephemeral port and waits until it is healthy.
    ///
    /// # Errors
    ///
    /// Fails if the port cannot be bound, the client cannot be built, or the
    /// server does not become healthy.
    pub async fn start(test_server: T) -> Result<Self, TestAppError> {
        let addr = SocketAddr::from((Ipv4Addr::LOCALHOST, 0));
        let listener = TcpListener::bind(addr)?;
        let local_addr = listener.local_addr()?;

        let test_server = Arc::new(test_server);
        let handle = tokio::spawn({
            let server = Arc::clone(&test_server);
            async move {
                if let Err(error) = server.launch(listener).await {
                    error!(?error, "Server launch failed");
                }
            }
        });

        let TestServerConfig {
            api_client,
            min_backoff_delay,
            max_backoff_delay,
            backoff_jitter,
            max_retry_attempts,
        } = test_server.config();

        let client = api_client.unwrap_or_else(ApiClient::builder);
        let client = client.with_port(local_addr.port()).build()?;

        let healthy = Self::wait_for_health(
            &test_server,
            &client,
            local_addr,
            min_backoff_delay,
            max_backoff_delay,
            backoff_jitter,
            max_retry_attempts,
        )
        .await;

        if !healthy {
            handle.abort();
            return Err(TestAppError::UnhealthyServer {
                timeout: max_backoff_delay,
            });
        }
        info!(%local_addr, "🚀 test server started");

        Ok(Self {
            local_addr,
            client,
            handle: Some(handle),
            test_server,
        })
    }

    async fn wait_for_health(
        test_server: &Arc<T>,
        client: &ApiClient,
        local_addr: SocketAddr,
        min_backoff_delay: Duration,
        max_backoff_delay: Duration,
        backoff_jitter: bool,
        max_retry_attempts: usize,
    ) -> bool {
        let mut backoff = ExponentialBuilder::default()
            .with_min_delay(min_backoff_delay)
            .with_max_delay(max_backoff_delay)
            .with_max_times(max_retry_attempts);
        if backoff_jitter {
            backoff = backoff.with_jitter();
        }

        let health_check = || {
            let mut client = client.clone();
            let server = Arc::clone(test_server);
            async move {
                match server.is_healthy(&mut client).await {
                    Ok(HealthStatus::Healthy) => {
                        debug!("🟢 server healthy");
                        Ok(true)
                    }
                    Ok(HealthStatus::Unhealthy) => {
                        debug!("🟠 server not yet healthy, retrying");
                        Err(std::io::Error::new(
                            std::io::ErrorKind::ConnectionRefused,
                            "Server not healthy yet",
                        ))
                    }
                    Ok(HealthStatus::Uncheckable) => {
                        debug!("❓ wait until a connection can be established with the server");
                        tokio::net::TcpStream::connect(local_addr)
                            .await
                            .map(|_| true)
                    }
                    Err(error) => {
                        error!(?error, "Health check error");
                        Ok(false)
                    }
                }
            }
        };

        health_check.retry(&backoff).await.unwrap_or(false)
    }

    /// The address the server listens on.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// The running server.
    pub fn server(&self) -> &T {
        &self.test_server
    }
}

impl<T> Drop for TestClient<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
