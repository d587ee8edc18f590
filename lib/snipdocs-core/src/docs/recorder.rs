use std::fmt::Debug;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, info};

use super::{DocumentationError, Operation, RenderedSnippet};

/// Receives the snippets of every documented operation.
///
/// Recorders are called in registration order, after every snippet of the
/// operation has been rendered. `record` is synchronous and runs on the task
/// awaiting the call: when the call returns, every recorder is done.
pub trait SnippetRecorder: Debug + Send + Sync {
    /// Records the snippets of an operation.
    fn record(
        &self,
        operation: &Operation,
        snippets: &[RenderedSnippet],
    ) -> Result<(), DocumentationError>;
}

/// Writes snippets under `<output_dir>/<operation name>/<snippet>.<ext>`.
///
/// Existing files are overwritten.
///
/// Files are written with blocking `std::fs` calls on the task awaiting the call.
/// Snippets are small and written once per documented call, so a test awaiting
/// the call can read them right after.
#[derive(Debug, Clone)]
pub struct FileRecorder {
    output_dir: PathBuf,
}

impl FileRecorder {
    /// Creates a recorder writing under `output_dir`.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// The root directory of snippets.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

impl SnippetRecorder for FileRecorder {
    fn record(
        &self,
        operation: &Operation,
        snippets: &[RenderedSnippet],
    ) -> Result<(), DocumentationError> {
        check_operation_name(operation.name())?;

        let dir = self.output_dir.join(operation.name());
        fs::create_dir_all(&dir)?;
        for snippet in snippets {
            let path = dir.join(snippet.file_name());
            debug!(path = %path.display(), "writing snippet");
            fs::write(&path, snippet.content())?;
        }
        info!(
            operation = operation.name(),
            dir = %dir.display(),
            count = snippets.len(),
            "📝 snippets written"
        );
        Ok(())
    }
}

fn check_operation_name(name: &str) -> Result<(), DocumentationError> {
    let reason = if name.is_empty() {
        Some("empty name")
    } else if name.contains(['/', '\\']) {
        Some("path separators are not allowed")
    } else if name == "." || name == ".." {
        Some("relative directory names are not allowed")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(DocumentationError::InvalidOperationName {
            name: name.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}

/// An operation kept in memory by a [`MemoryRecorder`].
#[derive(Debug, Clone)]
pub struct RecordedOperation {
    /// The documented exchange, after preprocessing.
    pub operation: Operation,
    /// Its rendered snippets.
    pub snippets: Vec<RenderedSnippet>,
}

/// Keeps every recorded operation in memory, in call order.
///
/// Clones share the same recordings: keep a clone to inspect what a client documented.
///
/// ```rust
/// use snipdocs_core::{ApiClient, MemoryRecorder};
///
/// let recorder = MemoryRecorder::default();
/// let client = ApiClient::builder()
///     .add_recorder(recorder.clone())
///     .build()?;
/// assert!(recorder.recorded().is_empty());
/// # Ok::<(), snipdocs_core::ApiClientError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryRecorder {
    recorded: Arc<Mutex<Vec<RecordedOperation>>>,
}

impl MemoryRecorder {
    /// All recorded operations, in call order.
    pub fn recorded(&self) -> Vec<RecordedOperation> {
        self.recorded
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The names of recorded operations, in call order.
    pub fn operation_names(&self) -> Vec<String> {
        self.recorded
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|recorded| recorded.operation.name().to_string())
            .collect()
    }

    /// The content of the last snippet recorded for an operation.
    pub fn snippet(&self, operation: &str, snippet: &str) -> Option<String> {
        self.recorded
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .rev()
            .filter(|recorded| recorded.operation.name() == operation)
            .find_map(|recorded| {
                recorded
                    .snippets
                    .iter()
                    .find(|it| it.name() == snippet)
                    .map(|it| it.content().to_string())
            })
    }
}

impl SnippetRecorder for MemoryRecorder {
    fn record(
        &self,
        operation: &Operation,
        snippets: &[RenderedSnippet],
    ) -> Result<(), DocumentationError> {
        self.recorded
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedOperation {
                operation: operation.clone(),
                snippets: snippets.to_vec(),
            });
        Ok(())
    }
}
