//! Constraint — declarative requiredness hints on operation inputs.
//!
//! A constraint is a small expression tree: leaves reference a
//! [`FieldPath`] as mandatory or optional, inner nodes combine children
//! with OR / AND. Constraints describe valid requests for documentation
//! and generators; nothing in this workspace enforces them.

mod parser;
mod path;
mod summary;

pub use parser::{ConstraintParseError, ParseErrorKind};
pub use path::{FieldPath, PathSegment};
pub use summary::InputSummary;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use parser::Parser;

/// Requiredness expression.
///
/// Serialized in its text form, e.g.
/// `or(mandatory(host.cluster.id), mandatory(host.cluster.name))`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Constraint {
    Mandatory(FieldPath),
    Optional(FieldPath),
    /// At least one child applies.
    Or(Vec<Constraint>),
    /// Every child applies.
    And(Vec<Constraint>),
}

impl Constraint {
    /// Every field path referenced by this constraint, depth first.
    #[must_use]
    pub fn paths(&self) -> Vec<&FieldPath> {
        let mut paths = Vec::new();
        self.collect_paths(&mut paths);
        paths
    }

    fn collect_paths<'a>(&'a self, out: &mut Vec<&'a FieldPath>) {
        match self {
            Self::Mandatory(path) | Self::Optional(path) => out.push(path),
            Self::Or(children) | Self::And(children) => {
                for child in children {
                    child.collect_paths(out);
                }
            }
        }
    }

    #[must_use]
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Mandatory(_) | Self::Optional(_))
    }
}

impl FromStr for Constraint {
    type Err = ConstraintParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parser = Parser::new(s);
        let constraint = parser.constraint()?;
        parser.finish()?;
        Ok(constraint)
    }
}

impl TryFrom<String> for Constraint {
    type Error = ConstraintParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Constraint> for String {
    fn from(constraint: Constraint) -> Self {
        constraint.to_string()
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (function, children) = match self {
            Self::Mandatory(path) => return write!(f, "mandatory({path})"),
            Self::Optional(path) => return write!(f, "optional({path})"),
            Self::Or(children) => ("or", children),
            Self::And(children) => ("and", children),
        };
        write!(f, "{function}(")?;
        for (i, child) in children.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{child}")?;
        }
        f.write_str(")")
    }
}
