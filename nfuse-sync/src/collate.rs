//! Ignore-aware collation — sequential package-directory walks feeding the
//! include list.
//!
//! Each directory root handed over by resolution is walked recursively and
//! fully to completion before the next root starts; the include list and
//! its seen-set are single-owner state and rely on that ordering. Entering
//! a directory loads its `.gitignore` / `.npmignore` (rules scope to that
//! subtree and stack with the ancestors'; `.npmignore` lines are applied
//! after `.gitignore` and win on conflict, last match deciding).

use std::path::{Path, PathBuf};

use glob::Pattern;

use nfuse_core::path::relative_slash;

use crate::error::{io_err, SyncError};
use crate::include::IncludeSet;

/// Ignore filenames consulted in every directory, in application order.
pub const IGNORE_FILENAMES: &[&str] = &[".gitignore", ".npmignore"];

// ---------------------------------------------------------------------------
// Ignore rules
// ---------------------------------------------------------------------------

#[derive(Debug)]
struct IgnorePattern {
    pattern: Pattern,
    negated: bool,
    dir_only: bool,
    anchored: bool,
}

impl IgnorePattern {
    /// Parse one ignore-file line. Comments and blanks yield `None`.
    fn parse(line: &str, file: &Path) -> Result<Option<Self>, SyncError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }
        let (negated, line) = match line.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, line),
        };
        let (dir_only, line) = match line.strip_suffix('/') {
            Some(rest) => (true, rest),
            None => (false, line),
        };
        // A separator anywhere anchors the pattern to the ignore file's
        // directory; otherwise it matches by entry name at any depth.
        let (anchored, line) = match line.strip_prefix('/') {
            Some(rest) => (true, rest),
            None => (line.contains('/'), line),
        };
        let pattern = Pattern::new(line).map_err(|source| SyncError::IgnorePattern {
            pattern: line.to_string(),
            path: file.to_path_buf(),
            source,
        })?;
        Ok(Some(IgnorePattern {
            pattern,
            negated,
            dir_only,
            anchored,
        }))
    }
}

/// The ignore rules contributed by one directory.
#[derive(Debug)]
struct IgnoreRules {
    root: PathBuf,
    patterns: Vec<IgnorePattern>,
}

impl IgnoreRules {
    fn load(dir: &Path) -> Result<Option<Self>, SyncError> {
        let mut patterns = Vec::new();
        for filename in IGNORE_FILENAMES {
            let path = dir.join(filename);
            if !path.is_file() {
                continue;
            }
            let contents = std::fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
            for line in contents.lines() {
                if let Some(pattern) = IgnorePattern::parse(line, &path)? {
                    patterns.push(pattern);
                }
            }
        }
        if patterns.is_empty() {
            return Ok(None);
        }
        Ok(Some(IgnoreRules {
            root: dir.to_path_buf(),
            patterns,
        }))
    }

    /// `Some(true)` ignored, `Some(false)` re-included, `None` no opinion.
    /// Last matching pattern decides.
    fn status(&self, path: &Path, is_dir: bool) -> Option<bool> {
        let rel = relative_slash(&self.root, path);
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let mut verdict = None;
        for pattern in &self.patterns {
            if pattern.dir_only && !is_dir {
                continue;
            }
            let hit = if pattern.anchored {
                pattern.pattern.matches(&rel)
            } else {
                pattern.pattern.matches(&name)
            };
            if hit {
                verdict = Some(!pattern.negated);
            }
        }
        verdict
    }
}

/// Innermost ruleset with an opinion wins.
fn is_ignored(stack: &[IgnoreRules], path: &Path, is_dir: bool) -> bool {
    for rules in stack.iter().rev() {
        if let Some(ignored) = rules.status(path, is_dir) {
            return ignored;
        }
    }
    false
}

// ---------------------------------------------------------------------------
// Collation
// ---------------------------------------------------------------------------

/// Only script sources and nested project descriptors feed the include
/// list.
fn relevant_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("js") | Some("unoproj")
    )
}

/// Walk `dir` to completion, appending every newly seen relevant file to
/// `includes` as a path relative to `out_dir`. Returns how many entries
/// were appended.
pub fn collate_directory(
    dir: &Path,
    out_dir: &Path,
    includes: &mut IncludeSet,
) -> Result<usize, SyncError> {
    let mut stack = Vec::new();
    let mut appended = 0;
    walk(dir, out_dir, &mut stack, includes, &mut appended)?;
    tracing::debug!("collated {}: {} new file(s)", dir.display(), appended);
    Ok(appended)
}

fn walk(
    dir: &Path,
    out_dir: &Path,
    stack: &mut Vec<IgnoreRules>,
    includes: &mut IncludeSet,
    appended: &mut usize,
) -> Result<(), SyncError> {
    let pushed = match IgnoreRules::load(dir)? {
        Some(rules) => {
            stack.push(rules);
            true
        }
        None => false,
    };

    // Sorted traversal keeps the include list deterministic across runs.
    let mut entries: Vec<_> = std::fs::read_dir(dir)
        .map_err(|e| io_err(dir, e))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| io_err(dir, e))?;
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let path = entry.path();
        let file_type = entry.file_type().map_err(|e| io_err(&path, e))?;
        let is_dir = file_type.is_dir();
        if is_ignored(stack, &path, is_dir) {
            continue;
        }
        if is_dir {
            walk(&path, out_dir, stack, includes, appended)?;
        } else if file_type.is_file() && relevant_file(&path) {
            if includes.push(relative_slash(out_dir, &path)) {
                *appended += 1;
            }
        }
    }

    if pushed {
        stack.pop();
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
