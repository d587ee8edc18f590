#![allow(
    clippy::missing_errors_doc,
    dead_code,
    missing_docs,
    clippy::expect_used
)]
use std::io;
use std::net::TcpListener;
use std::path::{Path, PathBuf};

use http::StatusCode;
use tempfile::TempDir;
use tracing::info;

use snipdocs_core::test_client::{HealthStatus, TestClient, TestServer, TestServerConfig};
use snipdocs_core::{ApiClient, MemoryRecorder};

use users_api::{ApiConfig, launch};

#[derive(Debug)]
pub struct AppTestServer {
    config: ApiConfig,
    snippets_dir: PathBuf,
    recorder: MemoryRecorder,
}

impl TestServer for AppTestServer {
    type Error = io::Error;

    async fn launch(&self, listener: TcpListener) -> Result<(), Self::Error> {
        listener.set_nonblocking(true)?;
        let listener = tokio::net::TcpListener::from_std(listener)?;
        info!(?listener, "launching server");
        launch(listener, self.config)
            .await
            .map_err(|error| io::Error::other(format!("{error:#}")))
    }

    async fn is_healthy(&self, client: &mut ApiClient) -> Result<HealthStatus, Self::Error> {
        let Ok(call) = client.get("/health") else {
            return Ok(HealthStatus::Unhealthy);
        };
        let status = match call.with_expected_status_code(StatusCode::OK).await {
            Ok(_) => HealthStatus::Healthy,
            Err(_) => HealthStatus::Unhealthy,
        };
        Ok(status)
    }

    fn config(&self) -> TestServerConfig {
        let client = ApiClient::builder()
            .with_base_path("/api")
            .expect("valid base path")
            .with_snippets_dir(&self.snippets_dir)
            .add_recorder(self.recorder.clone());
        TestServerConfig {
            api_client: Some(client),
            ..Default::default()
        }
    }
}

#[derive(Debug, derive_more::Deref, derive_more::DerefMut)]
pub struct TestApp {
    #[deref]
    #[deref_mut]
    client: TestClient<AppTestServer>,
    recorder: MemoryRecorder,
    snippets_dir: TempDir,
}

impl TestApp {
    pub async fn start(config: ApiConfig) -> anyhow::Result<Self> {
        let snippets_dir = tempfile::tempdir()?;
        let recorder = MemoryRecorder::default();
        let server = AppTestServer {
            config,
            snippets_dir: snippets_dir.path().to_path_buf(),
            recorder: recorder.clone(),
        };
        let client = TestClient::start(server).await?;
        Ok(Self {
            client,
            recorder,
            snippets_dir,
        })
    }

    /// Everything documented so far, in call order.
    pub fn recorder(&self) -> &MemoryRecorder {
        &self.recorder
    }

    /// Where snippet files are written.
    pub fn snippets_dir(&self) -> &Path {
        self.snippets_dir.path()
    }
}
