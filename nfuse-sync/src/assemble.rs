//! Project assembly — the five persisted artifacts of a rebuild.
//!
//! Runs only after every dependency resolved and collated. The five writes
//! are independent atomic file operations with no transactional grouping;
//! ordering puts the generated bundle first and the cache last, so an
//! interrupted run re-triggers a rebuild on the next invocation.

use chrono::Utc;

use nfuse_core::path::relative_slash;
use nfuse_core::project::{self, ProjectDescriptor};

use crate::cache::{self, DependencyCacheFile};
use crate::error::SyncError;
use crate::include::IncludeSet;
use crate::pipeline::{PipelineContext, OUT_DIR_NAME};

/// Install directory excluded from the primary project alongside the
/// generated output directory.
const NODE_MODULES_DIR: &str = "node_modules";

/// Persist the rebuilt module project, wire it into the primary
/// descriptor, and replace the dependency cache.
///
/// `primary` is taken by value: the assembler owns both descriptors for
/// the duration of a rebuild.
pub fn assemble(
    ctx: &PipelineContext,
    mut primary: ProjectDescriptor,
    includes: IncludeSet,
    new_dependencies: Vec<String>,
) -> Result<(), SyncError> {
    // The module project's include list is owned outright — replaced,
    // never merged.
    let mut module_project = ProjectDescriptor::module_project();
    module_project.includes = includes.into_vec();
    project::save_project(&ctx.module_project_path, &module_project)?;

    // The primary descriptor is only ever appended to.
    primary.add_projects([relative_slash(&ctx.cwd, &ctx.module_project_path)]);
    primary.add_excludes([NODE_MODULES_DIR, OUT_DIR_NAME]);
    project::save_project(&ctx.primary_path, &primary)?;

    cache::save(
        &ctx.out_dir,
        &DependencyCacheFile {
            synced_at: Utc::now(),
            dependencies: new_dependencies,
        },
    )?;

    tracing::info!(
        "assembled {} with {} include(s)",
        ctx.module_project_path.display(),
        module_project.includes.len()
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
