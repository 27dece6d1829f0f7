//! Dependency cache — the dependency-token set of the previous sync.
//!
//! Persists a `DependencyCacheFile` JSON document at
//! `<outDir>/dependencies.json`. Fully replaced on every successful
//! rebuild, never merged. Writes use the same atomic `.tmp` + rename
//! pattern as the project descriptors.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{io_err, SyncError};

/// Well-known cache filename inside the output directory.
pub const CACHE_FILENAME: &str = "dependencies.json";

/// On-disk dependency cache payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DependencyCacheFile {
    pub synced_at: DateTime<Utc>,
    pub dependencies: Vec<String>,
}

/// Caches written by earlier tool versions carry only the token list.
#[derive(Debug, Deserialize)]
struct DependencyCacheCompat {
    synced_at: Option<DateTime<Utc>>,
    dependencies: Vec<String>,
}

/// `<outDir>/dependencies.json` — pure, no I/O.
pub fn cache_path(out_dir: &Path) -> PathBuf {
    out_dir.join(CACHE_FILENAME)
}

/// Load the cache under `out_dir`.
///
/// Returns an empty token set if the file does not yet exist (first run).
pub fn load(out_dir: &Path) -> Result<DependencyCacheFile, SyncError> {
    let path = cache_path(out_dir);
    if !path.exists() {
        return Ok(DependencyCacheFile {
            synced_at: Utc::now(),
            dependencies: Vec::new(),
        });
    }
    let contents = std::fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
    let compat: DependencyCacheCompat = serde_json::from_str(&contents)?;
    Ok(DependencyCacheFile {
        synced_at: compat.synced_at.unwrap_or_else(Utc::now),
        dependencies: compat.dependencies,
    })
}

/// Save the cache under `out_dir` atomically.
///
/// Writes to `<path>.tmp` then renames to `<path>`.
pub fn save(out_dir: &Path, cache: &DependencyCacheFile) -> Result<(), SyncError> {
    let path = cache_path(out_dir);
    std::fs::create_dir_all(out_dir).map_err(|e| io_err(out_dir, e))?;

    let json = serde_json::to_string_pretty(cache)?;
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, &json).map_err(|e| io_err(&tmp, e))?;
    std::fs::rename(&tmp, &path).map_err(|e| io_err(&path, e))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
