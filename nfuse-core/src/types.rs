//! Domain newtypes for nfuse.
//!
//! All path fields elsewhere use `PathBuf`; names and cache tokens are the
//! only stringly-typed values, and both get a newtype here.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A strongly-typed name for the primary Uno project, derived from the
/// `.unoproj` file stem.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectName(pub String);

impl ProjectName {
    /// Name of the generated bundle project: `<name>_modules`.
    pub fn modules_name(&self) -> String {
        format!("{}_modules", self.0)
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for ProjectName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ProjectName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// A `"name:versionRange"` token as persisted in the dependency cache.
///
/// Tokens are compared as opaque strings; no range solving happens anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DependencyToken(pub String);

impl DependencyToken {
    /// Build the token for one manifest entry.
    pub fn new(name: &str, version_range: &str) -> Self {
        Self(format!("{name}:{version_range}"))
    }
}

impl fmt::Display for DependencyToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for DependencyToken {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for DependencyToken {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<DependencyToken> for String {
    fn from(t: DependencyToken) -> Self {
        t.0
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newtype_display() {
        assert_eq!(ProjectName::from("app").to_string(), "app");
        assert_eq!(DependencyToken::from("lodash:^4.0.0").to_string(), "lodash:^4.0.0");
    }

    #[test]
    fn token_from_name_and_range() {
        let token = DependencyToken::new("left-pad", "1.1.3");
        assert_eq!(token.to_string(), "left-pad:1.1.3");
    }

    #[test]
    fn modules_name_appends_suffix() {
        assert_eq!(ProjectName::from("myapp").modules_name(), "myapp_modules");
    }

    #[test]
    fn newtype_equality() {
        let a = DependencyToken::from("x:1");
        let b = DependencyToken::new("x", "1");
        assert_eq!(a, b);
    }
}
