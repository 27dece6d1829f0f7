//! Error types for nfuse-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from manifest and project-descriptor operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Underlying I/O failure (file not found, permission denied, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error (write/save path).
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// JSON parse error on load — includes file path and position context.
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// No `package.json` manifest in the working directory.
    #[error("No package.json found in {dir}")]
    ManifestNotFound { dir: PathBuf },

    /// No `.unoproj` descriptor in the working directory.
    #[error("no .unoproj project file found in {dir}")]
    ProjectNotFound { dir: PathBuf },
}
