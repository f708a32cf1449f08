//! Identifiers for compilation units.

use std::fmt;

use smol_str::SmolStr;

/// Identity of a compilation unit, as keyed by the metadata source.
///
/// Usually equal to the unit's import path, but build variants (for example
/// a test build of a package) may share a path while having distinct ids.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnitId(SmolStr);

impl UnitId {
    pub fn new(id: impl Into<SmolStr>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UnitId({})", self.0)
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UnitId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Import path of a compilation unit (`runtime`, `internal/poll`, ...).
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnitPath(SmolStr);

impl UnitPath {
    pub fn new(path: impl Into<SmolStr>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for UnitPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UnitPath({})", self.0)
    }
}

impl fmt::Display for UnitPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UnitPath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl PartialEq<str> for UnitPath {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}
