//! Stub context — serializable rendering payload for one dependency.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::StubError;

/// What the caller knows about one dependency to stub.
#[derive(Debug, Clone)]
pub struct StubRequest {
    /// npm package name as declared in the manifest.
    pub name: String,
    /// Entry-file path relative to the output directory. May still carry
    /// host separators; they are normalized before rendering.
    pub main_path: String,
    /// Name of the Uno bundle that owns the generated module project.
    pub bundle_name: String,
    /// Directory the stub file is written into.
    pub out_dir: PathBuf,
}

/// Normalized rendering payload handed to the template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StubContext {
    /// Global key the module registers under — the npm name, untouched.
    pub module_name: String,
    /// Uno type-name suffix derived from the npm name.
    pub type_name: String,
    /// Bundle-relative entry path, forward slashes only.
    pub main_path: String,
    pub bundle_name: String,
}

impl StubContext {
    pub fn from_request(request: &StubRequest) -> Self {
        StubContext {
            module_name: request.name.clone(),
            type_name: sanitize_type_name(&request.name),
            main_path: request.main_path.replace('\\', "/"),
            bundle_name: request.bundle_name.clone(),
        }
    }

    pub fn to_tera_context(&self) -> Result<tera::Context, StubError> {
        Ok(tera::Context::from_serialize(self)?)
    }
}

/// Derive the Uno type-name suffix from an npm package name.
///
/// `left-pad` → `left_pad`; scoped `@org/pkg` → `_org_pkg`. Distinct names
/// that collide after this transform overwrite each other's stub.
pub fn sanitize_type_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hyphens_become_underscores() {
        assert_eq!(sanitize_type_name("left-pad"), "left_pad");
    }

    #[test]
    fn scoped_names_flatten() {
        assert_eq!(sanitize_type_name("@org/pkg.js"), "_org_pkg_js");
    }

    #[test]
    fn context_normalizes_separators_but_keeps_the_module_name() {
        let request = StubRequest {
            name: "left-pad".to_string(),
            main_path: r"..\node_modules\left-pad\index.js".to_string(),
            bundle_name: "app_modules".to_string(),
            out_dir: PathBuf::from("/tmp/out"),
        };
        let ctx = StubContext::from_request(&request);
        assert_eq!(ctx.main_path, "../node_modules/left-pad/index.js");
        assert_eq!(ctx.module_name, "left-pad");
        assert_eq!(ctx.type_name, "left_pad");
    }
}
