//! Read-only view of the primary `package.json` manifest.
//!
//! Only the `dependencies` mapping is consumed. Enumeration order follows
//! the document (serde_json `preserve_order`), which fixes the order
//! dependencies are resolved in and the order of cache tokens.

use std::io::ErrorKind;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::error::CoreError;
use crate::types::DependencyToken;

/// Well-known manifest filename next to the primary `.unoproj`.
pub const MANIFEST_FILENAME: &str = "package.json";

/// The primary npm package manifest. Never mutated; every field other
/// than `dependencies` is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct PackageManifest {
    #[serde(default)]
    pub dependencies: serde_json::Map<String, Value>,
}

impl PackageManifest {
    /// Load `package.json` from `dir`.
    ///
    /// Returns `CoreError::ManifestNotFound` if absent,
    /// `CoreError::Parse` (with path context) if malformed JSON.
    pub fn load_from_dir(dir: &Path) -> Result<Self, CoreError> {
        let path = dir.join(MANIFEST_FILENAME);
        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(CoreError::ManifestNotFound { dir: dir.to_path_buf() });
            }
            Err(err) => return Err(CoreError::Io(err)),
        };
        serde_json::from_str(&contents).map_err(|e| CoreError::Parse { path, source: e })
    }

    /// `(name, versionRange)` pairs in document order.
    ///
    /// Non-string range values are rare but legal JSON; they are rendered
    /// with their JSON text so diffing still sees a stable token.
    pub fn dependency_entries(&self) -> Vec<(String, String)> {
        self.dependencies
            .iter()
            .map(|(name, value)| {
                let range = match value.as_str() {
                    Some(s) => s.to_owned(),
                    None => value.to_string(),
                };
                (name.clone(), range)
            })
            .collect()
    }

    /// Cache tokens for the current dependency set, in document order.
    pub fn dependency_tokens(&self) -> Vec<DependencyToken> {
        self.dependency_entries()
            .iter()
            .map(|(name, range)| DependencyToken::new(name, range))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_manifest(dir: &Path, contents: &str) {
        std::fs::write(dir.join(MANIFEST_FILENAME), contents).expect("write manifest");
    }

    #[test]
    fn missing_manifest_is_a_dedicated_error() {
        let tmp = TempDir::new().unwrap();
        let err = PackageManifest::load_from_dir(tmp.path()).unwrap_err();
        assert!(matches!(err, CoreError::ManifestNotFound { .. }));
        assert!(err.to_string().contains("No package.json found in"));
    }

    #[test]
    fn malformed_manifest_reports_path() {
        let tmp = TempDir::new().unwrap();
        write_manifest(tmp.path(), "{ not json");
        let err = PackageManifest::load_from_dir(tmp.path()).unwrap_err();
        assert!(matches!(err, CoreError::Parse { .. }));
        assert!(err.to_string().contains("package.json"));
    }

    #[test]
    fn dependencies_default_to_empty() {
        let tmp = TempDir::new().unwrap();
        write_manifest(tmp.path(), r#"{ "name": "app" }"#);
        let manifest = PackageManifest::load_from_dir(tmp.path()).unwrap();
        assert!(manifest.dependency_tokens().is_empty());
    }

    #[test]
    fn tokens_follow_document_order() {
        let tmp = TempDir::new().unwrap();
        write_manifest(
            tmp.path(),
            r#"{ "dependencies": { "zlib-like": "^2.1.0", "a-first": "1.0.0" } }"#,
        );
        let manifest = PackageManifest::load_from_dir(tmp.path()).unwrap();
        let tokens: Vec<String> = manifest
            .dependency_tokens()
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(tokens, vec!["zlib-like:^2.1.0", "a-first:1.0.0"]);
    }

    #[test]
    fn non_string_range_uses_json_text() {
        let tmp = TempDir::new().unwrap();
        write_manifest(tmp.path(), r#"{ "dependencies": { "odd": 2 } }"#);
        let manifest = PackageManifest::load_from_dir(tmp.path()).unwrap();
        assert_eq!(manifest.dependency_entries(), vec![("odd".to_string(), "2".to_string())]);
    }
}
