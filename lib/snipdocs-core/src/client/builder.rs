use std::fmt::Debug;
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;
use std::sync::Arc;

use http::Uri;
use http::uri::{PathAndQuery, Scheme};

use super::{ApiClient, ApiClientError};
use crate::docs::{
    DEFAULT_OUTPUT_DIR, Documenter, DocumentationConfig, FileRecorder, SnippetRecorder,
};

/// Configures an [`ApiClient`].
///
/// Without any recorder, snippets are written by a [`FileRecorder`] under
/// [`DEFAULT_OUTPUT_DIR`], or the directory set with
/// [`with_snippets_dir`](Self::with_snippets_dir).
#[derive(Debug, Clone)]
pub struct ApiClientBuilder {
    client: reqwest::Client,
    scheme: Scheme,
    host: String,
    port: u16,
    base_path: Option<PathAndQuery>,
    documentation: DocumentationConfig,
    snippets_dir: Option<PathBuf>,
    recorders: Vec<Arc<dyn SnippetRecorder>>,
}

impl ApiClientBuilder {
    /// Builds the client.
    pub fn build(self) -> Result<ApiClient, ApiClientError> {
        let Self {
            client,
            scheme,
            host,
            port,
            base_path,
            documentation,
            snippets_dir,
            mut recorders,
        } = self;

        let builder = Uri::builder()
            .scheme(scheme)
            .authority(format!("{host}:{port}"));
        let builder = if let Some(path) = &base_path {
            builder.path_and_query(path.path())
        } else {
            builder.path_and_query("/")
        };

        let base_uri = builder.build()?;
        let base_path = base_path
            .as_ref()
            .map(|it| it.path().to_string())
            .unwrap_or_default();

        if recorders.is_empty() || snippets_dir.is_some() {
            let dir = snippets_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));
            recorders.insert(0, Arc::new(FileRecorder::new(dir)));
        }
        let documenter = Arc::new(Documenter::new(documentation, recorders));

        Ok(ApiClient {
            client,
            base_uri,
            base_path,
            documenter,
        })
    }

    /// Sets the scheme, `http` by default.
    pub fn with_scheme(mut self, scheme: Scheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Sets the host, `127.0.0.1` by default.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Sets the port, `80` by default.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Prefixes every call path, e.g. `/api`.
    pub fn with_base_path<P>(mut self, base_path: P) -> Result<Self, ApiClientError>
    where
        P: TryInto<PathAndQuery>,
        P::Error: Debug + 'static,
    {
        let base_path = base_path
            .try_into()
            .map_err(|err| ApiClientError::InvalidBasePath {
                error: format!("{err:?}"),
            })?;
        self.base_path = Some(base_path);
        Ok(self)
    }

    /// Sets how snippets are rendered.
    pub fn with_documentation_config(mut self, config: DocumentationConfig) -> Self {
        self.documentation = config;
        self
    }

    /// Writes snippet files under `dir`, even when other recorders are added.
    pub fn with_snippets_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.snippets_dir = Some(dir.into());
        self
    }

    /// Adds a recorder, called after the previous ones.
    pub fn add_recorder(mut self, recorder: impl SnippetRecorder + 'static) -> Self {
        self.recorders.push(Arc::new(recorder));
        self
    }
}

impl Default for ApiClientBuilder {
    fn default() -> Self {
        Self {
            client: reqwest::Client::new(),
            scheme: Scheme::HTTP,
            host: IpAddr::V4(Ipv4Addr::LOCALHOST).to_string(),
            port: 80,
            base_path: None,
            documentation: DocumentationConfig::default(),
            snippets_dir: None,
            recorders: Vec::new(),
        }
    }
}
