//! External `fuse` build-tool invocation.
//!
//! The subprocess inherits our standard streams, so its output passes
//! through byte-for-byte with no buffering or transformation.

use std::env;
use std::process::{Command, Stdio};

use anyhow::{Context, Result};

/// Default executable name; resolved through `PATH`.
const FUSE_PATH: &str = "fuse";

/// Override for the executable, mainly a seam for integration tests.
const FUSE_PATH_ENV: &str = "NFUSE_FUSE_PATH";

/// Forward `args` to the fuse executable.
///
/// With no arguments nothing is launched and `None` is returned. Otherwise
/// blocks until the tool exits and returns its exit code (a kill by signal
/// reports as 1).
pub fn run(args: &[String]) -> Result<Option<i32>> {
    if args.is_empty() {
        return Ok(None);
    }

    let program = env::var(FUSE_PATH_ENV).unwrap_or_else(|_| FUSE_PATH.to_string());
    log::debug!("launching {program} {}", args.join(" "));

    let status = Command::new(&program)
        .args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .with_context(|| format!("failed to launch '{program}'"))?;

    Ok(Some(status.code().unwrap_or(1)))
}
