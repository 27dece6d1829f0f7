//! Error types for nfuse-stubgen.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from stub generation.
#[derive(Debug, Error)]
pub enum StubError {
    /// Tera template engine error.
    #[error("template engine error: {0}")]
    Tera(#[from] tera::Error),

    /// Filesystem error while writing a generated stub.
    #[error("stub io error at {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },
}

/// Convenience constructor for [`StubError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> StubError {
    StubError::Io {
        path: path.into(),
        source,
    }
}
