//! Tera stub engine — renders and writes `Lib_<TypeName>.uno` sources.

use std::path::PathBuf;

use tera::Tera;

use crate::context::{StubContext, StubRequest};
use crate::error::{io_err, StubError};

// ---------------------------------------------------------------------------
// Embedded template — baked into the binary at compile time via include_str!
// ---------------------------------------------------------------------------

const STUB_TEMPLATE_NAME: &str = "lib_module.uno.tera";
const STUB_TEMPLATE: &str = include_str!("templates/lib_module.uno.tera");

// ---------------------------------------------------------------------------
// StubGenerator
// ---------------------------------------------------------------------------

/// Tera-based generator for dependency binding stubs.
///
/// Uses the embedded template only. Create once and reuse across the
/// dependency loop.
pub struct StubGenerator {
    tera: Tera,
}

impl StubGenerator {
    /// Construct a new [`StubGenerator`] with the embedded template.
    pub fn new() -> Result<Self, StubError> {
        let mut tera = Tera::default();
        tera.add_raw_template(STUB_TEMPLATE_NAME, STUB_TEMPLATE)?;
        Ok(StubGenerator { tera })
    }

    /// Render the stub source for one dependency without touching disk.
    pub fn render(&self, ctx: &StubContext) -> Result<String, StubError> {
        let tera_ctx = ctx.to_tera_context()?;
        Ok(self.tera.render(STUB_TEMPLATE_NAME, &tera_ctx)?)
    }

    /// Render and write the stub for one dependency.
    ///
    /// The file lands at `<out_dir>/Lib_<TypeName>.uno`; parent directories
    /// are created as needed. Returns the written path, which is guaranteed
    /// to exist afterwards.
    pub fn generate(&self, request: &StubRequest) -> Result<PathBuf, StubError> {
        let ctx = StubContext::from_request(request);
        let content = self.render(&ctx)?;

        let path = request.out_dir.join(format!("Lib_{}.uno", ctx.type_name));
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
        }
        std::fs::write(&path, content).map_err(|e| io_err(&path, e))?;
        Ok(path)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
