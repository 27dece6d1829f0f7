//! `.unoproj` project descriptors.
//!
//! # On-disk shape
//!
//! A descriptor is a JSON document; this pipeline reads and writes the
//! `Includes`, `Projects` and `Excludes` arrays and must round-trip every
//! other field untouched — the primary descriptor is the user's file.
//!
//! Writes use an atomic `.tmp` + rename pattern so a crash never leaves a
//! half-written descriptor behind.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;
use crate::types::ProjectName;

/// Extension of Uno project descriptor files.
pub const PROJECT_EXT: &str = "unoproj";

// ---------------------------------------------------------------------------
// Descriptor
// ---------------------------------------------------------------------------

/// One Uno project descriptor — the user's primary project or the generated
/// module bundle project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ProjectDescriptor {
    #[serde(rename = "Includes", default, skip_serializing_if = "Vec::is_empty")]
    pub includes: Vec<String>,

    #[serde(rename = "Projects", default, skip_serializing_if = "Vec::is_empty")]
    pub projects: Vec<String>,

    #[serde(rename = "Excludes", default, skip_serializing_if = "Vec::is_empty")]
    pub excludes: Vec<String>,

    /// Every field this pipeline does not own, preserved verbatim.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl ProjectDescriptor {
    /// Fresh descriptor for the generated module bundle project.
    ///
    /// Ships the packages the generated stubs compile against; the include
    /// list is owned and replaced by the assembler on every rebuild.
    pub fn module_project() -> Self {
        let mut extra = serde_json::Map::new();
        extra.insert(
            "Packages".to_string(),
            Value::Array(vec![Value::from("Fuse"), Value::from("FuseJS")]),
        );
        ProjectDescriptor {
            includes: Vec::new(),
            projects: Vec::new(),
            excludes: Vec::new(),
            extra,
        }
    }

    /// Append sub-project references. Appends only — never dedupes.
    pub fn add_projects<I, S>(&mut self, paths: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.projects.extend(paths.into_iter().map(Into::into));
    }

    /// Append exclusion patterns. Appends only — never dedupes.
    pub fn add_excludes<I, S>(&mut self, patterns: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excludes.extend(patterns.into_iter().map(Into::into));
    }
}

// ---------------------------------------------------------------------------
// Location
// ---------------------------------------------------------------------------

/// Path of the primary `.unoproj` in `dir`.
///
/// When several descriptors exist the lexicographically first one wins, so
/// repeated runs pick the same file.
pub fn project_path_from_dir(dir: &Path) -> Result<PathBuf, CoreError> {
    let mut candidates: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.is_file() && p.extension().and_then(|s| s.to_str()) == Some(PROJECT_EXT)
        })
        .collect();
    candidates.sort();
    candidates
        .into_iter()
        .next()
        .ok_or_else(|| CoreError::ProjectNotFound { dir: dir.to_path_buf() })
}

/// Primary project name — the `.unoproj` file stem.
pub fn project_name_from_dir(dir: &Path) -> Result<ProjectName, CoreError> {
    let path = project_path_from_dir(dir)?;
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(ProjectName::from(stem))
}

// ---------------------------------------------------------------------------
// Load / save
// ---------------------------------------------------------------------------

/// Load a descriptor from `path`.
///
/// Returns `CoreError::Parse` (with path context) if malformed JSON.
pub fn load_project(path: &Path) -> Result<ProjectDescriptor, CoreError> {
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| CoreError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Save a descriptor to `path` atomically.
///
/// Writes to `<path>.tmp` then renames to `<path>`. Parent directories are
/// created as needed.
pub fn save_project(path: &Path, project: &ProjectDescriptor) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(project)?;
    let tmp = path.with_extension(format!("{PROJECT_EXT}.tmp"));
    std::fs::write(&tmp, &json)?;
    if let Err(e) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(CoreError::Io(e));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn roundtrip_preserves_unknown_fields() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("app.unoproj");
        std::fs::write(
            &path,
            r#"{ "RootNamespace": "App", "Packages": ["Fuse"], "Includes": ["MainView.ux"] }"#,
        )
        .unwrap();

        let mut project = load_project(&path).unwrap();
        project.add_excludes(["node_modules"]);
        save_project(&path, &project).unwrap();

        let reloaded = load_project(&path).unwrap();
        assert_eq!(
            reloaded.extra.get("RootNamespace"),
            Some(&Value::from("App"))
        );
        assert_eq!(reloaded.includes, vec!["MainView.ux"]);
        assert_eq!(reloaded.excludes, vec!["node_modules"]);
    }

    #[test]
    fn appends_never_dedupe() {
        let mut project = ProjectDescriptor::default();
        project.add_excludes(["node_modules", "node_modules"]);
        project.add_projects(["NPM-Packages/app_modules.unoproj"]);
        project.add_projects(["NPM-Packages/app_modules.unoproj"]);
        assert_eq!(project.excludes.len(), 2);
        assert_eq!(project.projects.len(), 2);
    }

    #[test]
    fn missing_descriptor_is_a_dedicated_error() {
        let tmp = TempDir::new().unwrap();
        let err = project_path_from_dir(tmp.path()).unwrap_err();
        assert!(matches!(err, CoreError::ProjectNotFound { .. }));
    }

    #[test]
    fn first_descriptor_wins_deterministically() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("b.unoproj"), "{}").unwrap();
        std::fs::write(tmp.path().join("a.unoproj"), "{}").unwrap();
        let name = project_name_from_dir(tmp.path()).unwrap();
        assert_eq!(name.to_string(), "a");
    }

    #[test]
    fn save_is_atomic_and_cleans_tmp() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out").join("app_modules.unoproj");
        save_project(&path, &ProjectDescriptor::module_project()).unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("unoproj.tmp").exists());
    }

    #[test]
    fn module_project_carries_script_packages() {
        let project = ProjectDescriptor::module_project();
        let packages = project.extra.get("Packages").and_then(|v| v.as_array()).unwrap();
        assert!(packages.contains(&Value::from("FuseJS")));
    }

    #[test]
    fn empty_sections_stay_out_of_the_document() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("plain.unoproj");
        std::fs::write(&path, r#"{ "RootNamespace": "App" }"#).unwrap();
        let project = load_project(&path).unwrap();
        save_project(&path, &project).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(!text.contains("Excludes"));
    }
}
