//! nfuse core library — domain types, manifest and descriptor persistence,
//! errors.
//!
//! Public API surface:
//! - [`types`] — newtypes for project names and dependency tokens
//! - [`manifest`] — the read-only `package.json` view
//! - [`project`] — `.unoproj` descriptor load / mutate / save
//! - [`path`] — relative-path and separator helpers
//! - [`error`] — [`CoreError`]

pub mod error;
pub mod manifest;
pub mod path;
pub mod project;
pub mod types;

pub use error::CoreError;
pub use manifest::PackageManifest;
pub use project::ProjectDescriptor;
pub use types::{DependencyToken, ProjectName};
