//! Installed-package resolution for `nfuse-resolver`.
//!
//! `resolve_package(base_dir, name)` locates one declared dependency in the
//! flat `node_modules/` tree next to the manifest and returns the concrete
//! files belonging to it plus the directory roots to scan for further
//! related files. This is deliberately not a dependency resolver: no range
//! solving, no transitive graph — packages are assumed pre-installed by
//! `npm install`.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// A dependency resolved to concrete paths on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPackage {
    /// Files belonging to the package. The first entry is the module's
    /// entry file; resolution never returns an empty list.
    pub files: Vec<PathBuf>,
    /// Directory roots to scan for additional related files.
    pub dirs: Vec<PathBuf>,
}

/// Errors from package resolution. Every one of these aborts a sync run.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The package directory does not exist under `node_modules/`.
    #[error("package '{name}' is not installed under {dir}")]
    PackageNotFound { name: String, dir: PathBuf },

    /// The package is installed but its entry file is missing on disk.
    #[error("entry file {path} of package '{name}' does not exist")]
    EntryNotFound { name: String, path: PathBuf },

    #[error("failed to parse {path}: {message}")]
    ParseError { path: PathBuf, message: String },
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Resolve one installed dependency relative to `base_dir`.
///
/// The entry file is the `main` field of the package's own `package.json`
/// (`index.js` when absent), with npm's extensionless and directory `main`
/// conventions honored. Returns absolute paths.
pub fn resolve_package(base_dir: &Path, name: &str) -> Result<ResolvedPackage, ResolveError> {
    let package_dir = package_dir(base_dir, name);
    if !package_dir.is_dir() {
        return Err(ResolveError::PackageNotFound {
            name: name.to_owned(),
            dir: base_dir.join("node_modules"),
        });
    }

    let entry = entry_file(&package_dir, name)?;

    Ok(ResolvedPackage {
        files: vec![entry],
        dirs: vec![package_dir],
    })
}

// ---------------------------------------------------------------------------
// Internals
// ---------------------------------------------------------------------------

/// `<base>/node_modules/<name>`; scoped names (`@org/pkg`) nest naturally.
fn package_dir(base_dir: &Path, name: &str) -> PathBuf {
    let mut dir = base_dir.join("node_modules");
    for segment in name.split('/') {
        dir.push(segment);
    }
    dir
}

fn entry_file(package_dir: &Path, name: &str) -> Result<PathBuf, ResolveError> {
    let manifest_path = package_dir.join("package.json");
    let main = if manifest_path.is_file() {
        let contents = fs::read_to_string(&manifest_path)?;
        let json: serde_json::Value =
            serde_json::from_str(&contents).map_err(|e| ResolveError::ParseError {
                path: manifest_path.clone(),
                message: e.to_string(),
            })?;
        json.get("main").and_then(|v| v.as_str()).map(str::to_owned)
    } else {
        None
    };

    let declared = main.unwrap_or_else(|| "index.js".to_string());
    let candidate = package_dir.join(&declared);

    // npm allows "main": "lib/module" (no extension) and "main": "lib"
    // (a directory holding index.js).
    if candidate.is_file() {
        return Ok(candidate);
    }
    if candidate.extension().is_none() {
        let with_ext = candidate.with_extension("js");
        if with_ext.is_file() {
            return Ok(with_ext);
        }
        let index = candidate.join("index.js");
        if index.is_file() {
            return Ok(index);
        }
    }

    Err(ResolveError::EntryNotFound {
        name: name.to_owned(),
        path: candidate,
    })
}
