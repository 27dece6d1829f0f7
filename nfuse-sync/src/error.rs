//! Error types for nfuse-sync.

use std::path::PathBuf;

use thiserror::Error;

use nfuse_core::error::CoreError;
use nfuse_resolver::ResolveError;
use nfuse_stubgen::StubError;

/// All errors that can arise from sync operations.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Manifest / descriptor errors surface with their own message — the
    /// missing-manifest text is user-facing as-is.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// An error raised during package resolution.
    #[error("resolve error: {0}")]
    Resolve(#[from] ResolveError),

    /// An error from stub generation.
    #[error("stub error: {0}")]
    Stub(#[from] StubError),

    /// A dependency resolved to no files — the classic "forgot to run
    /// npm install" failure, phrased accordingly.
    #[error("Couldn't resolve dependency '{name}', make sure to run 'npm install'")]
    UnresolvedDependency { name: String },

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization error (dependency cache).
    #[error("dependency cache JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A malformed pattern line in an ignore file.
    #[error("invalid ignore pattern '{pattern}' in {path}: {source}")]
    IgnorePattern {
        pattern: String,
        path: PathBuf,
        #[source]
        source: glob::PatternError,
    },
}

/// Convenience constructor for [`SyncError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SyncError {
    SyncError::Io {
        path: path.into(),
        source,
    }
}
