//! # nfuse-stubgen
//!
//! Generates the `Lib_<TypeName>.uno` binding stub that registers one npm
//! package in Fuse's script-module registry.
//!
//! Create a [`StubGenerator`] once and call [`StubGenerator::generate`] per
//! dependency.

pub mod context;
pub mod engine;
pub mod error;

pub use context::{StubContext, StubRequest};
pub use engine::StubGenerator;
pub use error::StubError;
