//! Path helpers shared by the pipeline crates.
//!
//! Generated descriptors and stubs always embed forward-slash relative
//! paths, regardless of host platform.

use std::path::{Component, Path, PathBuf};

/// Compute `target` relative to `base` (both should be absolute, or both
/// relative to the same root). Walks up with `..` components where needed.
pub fn relative_path(base: &Path, target: &Path) -> PathBuf {
    let base_components: Vec<Component> = base.components().collect();
    let target_components: Vec<Component> = target.components().collect();

    let mut common = 0;
    while common < base_components.len()
        && common < target_components.len()
        && base_components[common] == target_components[common]
    {
        common += 1;
    }

    let mut rel = PathBuf::new();
    for _ in common..base_components.len() {
        rel.push("..");
    }
    for component in &target_components[common..] {
        rel.push(component.as_os_str());
    }
    rel
}

/// Render a path with forward slashes only.
pub fn to_slash(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// `target` relative to `base`, slash-normalized — the form every include
/// list entry takes.
pub fn relative_slash(base: &Path, target: &Path) -> String {
    to_slash(&relative_path(base, target))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sibling_directory_walks_up() {
        let base = Path::new("/work/app/NPM-Packages");
        let target = Path::new("/work/app/node_modules/left-pad/index.js");
        assert_eq!(
            relative_slash(base, target),
            "../node_modules/left-pad/index.js"
        );
    }

    #[test]
    fn descendant_needs_no_parent_components() {
        let base = Path::new("/work/app");
        let target = Path::new("/work/app/NPM-Packages/app_modules.unoproj");
        assert_eq!(relative_slash(base, target), "NPM-Packages/app_modules.unoproj");
    }

    #[test]
    fn disjoint_trees_climb_to_the_common_root() {
        let base = Path::new("/a/b/c");
        let target = Path::new("/a/x/y");
        assert_eq!(relative_path(base, target), PathBuf::from("../../x/y"));
    }

    #[test]
    fn identical_paths_yield_empty() {
        let p = Path::new("/a/b");
        assert_eq!(relative_path(p, p), PathBuf::new());
    }
}
