//! Pipeline driver — skip-vs-rebuild orchestration for one project.
//!
//! ## Rebuild sequence
//!
//! 1. Diff the cached dependency tokens against the manifest's (skipped
//!    entirely under `--force`).
//! 2. Clear previously generated files from the output directory.
//! 3. Resolve and stub every dependency in manifest order; the first
//!    failure aborts the run before anything is assembled.
//! 4. Drain the collation work-list, one directory fully at a time (FIFO).
//! 5. Assemble: persist the module project, the primary descriptor, and
//!    the new dependency cache.
//!
//! All state lives in an explicit [`PipelineContext`] built once from the
//! project directory; each stage owns and returns its accumulators.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use nfuse_core::manifest::PackageManifest;
use nfuse_core::path::relative_slash;
use nfuse_core::project::{self, ProjectDescriptor, PROJECT_EXT};
use nfuse_core::types::{DependencyToken, ProjectName};
use nfuse_resolver::{resolve_package, ResolveError};
use nfuse_stubgen::{StubGenerator, StubRequest};

use crate::assemble;
use crate::cache;
use crate::collate;
use crate::diff;
use crate::error::{io_err, SyncError};
use crate::include::IncludeSet;

/// Directory the generated bundle project lives in, relative to the
/// working directory.
pub const OUT_DIR_NAME: &str = "NPM-Packages";

// ---------------------------------------------------------------------------
// Context
// ---------------------------------------------------------------------------

/// Everything a sync run needs, resolved once up front.
#[derive(Debug)]
pub struct PipelineContext {
    /// Working directory holding `package.json` and the primary descriptor.
    pub cwd: PathBuf,
    pub manifest: PackageManifest,
    pub primary_path: PathBuf,
    pub primary: ProjectDescriptor,
    pub project_name: ProjectName,
    /// `<cwd>/NPM-Packages`
    pub out_dir: PathBuf,
    /// `<outDir>/<name>_modules.unoproj`
    pub module_project_path: PathBuf,
}

impl PipelineContext {
    /// Build the context from a project directory.
    ///
    /// Fails fast on a missing manifest or missing primary descriptor —
    /// nothing else runs in that case.
    pub fn from_dir(cwd: &Path) -> Result<Self, SyncError> {
        let manifest = PackageManifest::load_from_dir(cwd)?;
        let primary_path = project::project_path_from_dir(cwd)?;
        let primary = project::load_project(&primary_path)?;
        let project_name = project::project_name_from_dir(cwd)?;
        let out_dir = cwd.join(OUT_DIR_NAME);
        let module_project_path =
            out_dir.join(format!("{}.{}", project_name.modules_name(), PROJECT_EXT));
        Ok(PipelineContext {
            cwd: cwd.to_path_buf(),
            manifest,
            primary_path,
            primary,
            project_name,
            out_dir,
            module_project_path,
        })
    }

    /// Name of the Uno bundle owning the generated module project.
    pub fn bundle_name(&self) -> String {
        self.project_name.modules_name()
    }
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// Result summary of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Dependency set unchanged; nothing regenerated.
    Skipped,
    /// Module project regenerated.
    Rebuilt {
        dependencies: usize,
        includes: usize,
    },
}

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

/// Run the sync pipeline. `force` bypasses the diff gate and always
/// rebuilds.
///
/// Invoking the external build tool afterwards is the caller's job and
/// happens on every non-error path regardless of the outcome.
pub fn run(ctx: &PipelineContext, force: bool) -> Result<SyncOutcome, SyncError> {
    let current: Vec<String> = ctx
        .manifest
        .dependency_tokens()
        .into_iter()
        .map(String::from)
        .collect();
    let previous = cache::load(&ctx.out_dir)?.dependencies;

    if !force && !diff::needs_rebuild(&previous, &current) {
        tracing::info!("dependency set unchanged; skipping rebuild");
        return Ok(SyncOutcome::Skipped);
    }

    clear_generated(ctx)?;

    let ResolveOutput {
        mut includes,
        mut pending_dirs,
        new_dependencies,
    } = resolve_all(ctx)?;

    // One directory fully to completion per iteration, in append order.
    while let Some(dir) = pending_dirs.pop_front() {
        collate::collate_directory(&dir, &ctx.out_dir, &mut includes)?;
    }

    let dependencies = new_dependencies.len();
    let include_count = includes.len();
    assemble::assemble(ctx, ctx.primary.clone(), includes, new_dependencies)?;

    Ok(SyncOutcome::Rebuilt {
        dependencies,
        includes: include_count,
    })
}

// ---------------------------------------------------------------------------
// Stages
// ---------------------------------------------------------------------------

/// Accumulators owned and returned by the resolution stage.
struct ResolveOutput {
    includes: IncludeSet,
    pending_dirs: VecDeque<PathBuf>,
    new_dependencies: Vec<String>,
}

fn resolve_all(ctx: &PipelineContext) -> Result<ResolveOutput, SyncError> {
    let stubgen = StubGenerator::new()?;
    let mut includes = IncludeSet::new();
    let mut pending_dirs = VecDeque::new();
    let mut new_dependencies = Vec::new();

    for (name, range) in ctx.manifest.dependency_entries() {
        let package = match resolve_package(&ctx.cwd, &name) {
            Ok(package) => package,
            Err(ResolveError::PackageNotFound { name, .. }) => {
                return Err(SyncError::UnresolvedDependency { name });
            }
            Err(err) => return Err(err.into()),
        };
        if package.files.is_empty() {
            return Err(SyncError::UnresolvedDependency { name });
        }

        pending_dirs.extend(package.dirs);
        for file in &package.files {
            includes.push(relative_slash(&ctx.out_dir, file));
        }

        let stub_path = stubgen.generate(&StubRequest {
            name: name.clone(),
            main_path: relative_slash(&ctx.out_dir, &package.files[0]),
            bundle_name: ctx.bundle_name(),
            out_dir: ctx.out_dir.clone(),
        })?;
        includes.push(relative_slash(&ctx.out_dir, &stub_path));

        new_dependencies.push(DependencyToken::new(&name, &range).into());
        tracing::debug!("resolved '{name}'");
    }

    Ok(ResolveOutput {
        includes,
        pending_dirs,
        new_dependencies,
    })
}

/// Delete previously generated files under the output directory.
///
/// The dependency cache and the module descriptor are spared: an aborted
/// rebuild must leave the prior run's artifacts observable.
fn clear_generated(ctx: &PipelineContext) -> Result<(), SyncError> {
    if !ctx.out_dir.exists() {
        return Ok(());
    }
    let cache_path = cache::cache_path(&ctx.out_dir);
    for entry in WalkDir::new(&ctx.out_dir) {
        let entry = entry.map_err(|e| io_err(&ctx.out_dir, std::io::Error::other(e)))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if path == cache_path || path == ctx.module_project_path {
            continue;
        }
        std::fs::remove_file(path).map_err(|e| io_err(path, e))?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
