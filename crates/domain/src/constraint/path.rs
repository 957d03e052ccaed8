//! Field paths — `host.cluster.id`, `disks[].image_id`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::parser::{ConstraintParseError, Parser};
use crate::name::Name;

/// One step of a [`FieldPath`]; `collection` marks a step through every
/// element of a list (`pm_proxies[]`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PathSegment {
    pub name: Name,
    pub collection: bool,
}

/// Dotted path from an operation parameter into its (external) type.
///
/// Always has at least one segment; the first one names the parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FieldPath {
    root: PathSegment,
    rest: Vec<PathSegment>,
}

impl FieldPath {
    #[must_use]
    pub fn new(root: PathSegment, rest: Vec<PathSegment>) -> Self {
        Self { root, rest }
    }

    /// The segment naming the operation parameter.
    #[must_use]
    pub fn root(&self) -> &PathSegment {
        &self.root
    }

    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        std::iter::once(&self.root).chain(self.rest.iter())
    }

    /// Number of segments, at least one.
    #[must_use]
    pub fn len(&self) -> usize {
        1 + self.rest.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl FromStr for FieldPath {
    type Err = ConstraintParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parser = Parser::new(s);
        let path = parser.path()?;
        parser.finish()?;
        Ok(path)
    }
}

impl TryFrom<String> for FieldPath {
    type Error = ConstraintParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FieldPath> for String {
    fn from(path: FieldPath) -> Self {
        path.to_string()
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if self.collection {
            f.write_str("[]")?;
        }
        Ok(())
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.root)?;
        for segment in &self.rest {
            write!(f, ".{segment}")?;
        }
        Ok(())
    }
}
