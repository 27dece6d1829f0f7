//! Dependency-set diff — the skip-vs-rebuild gate.
//!
//! Tokens are compared as whole strings, so an added, removed or
//! range-changed dependency all look the same: rebuild. There is no
//! incremental patching; wholesale regeneration is the correctness story.

/// Decide whether the cached dependency set differs from the manifest's.
///
/// Both sides are sorted before an element-wise exact comparison, so input
/// enumeration order never affects the decision.
pub fn needs_rebuild(previous: &[String], current: &[String]) -> bool {
    let mut previous = previous.to_vec();
    let mut current = current.to_vec();
    previous.sort();
    current.sort();
    previous != current
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
