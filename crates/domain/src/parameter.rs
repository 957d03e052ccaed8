//! Parameter — a named, typed input or output of an operation.

use serde::{Deserialize, Serialize};

use crate::documentation::Documentation;
use crate::name::Name;
use crate::type_ref::TypeRef;

/// Whether a parameter is sent by the client, returned, or both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    In,
    Out,
    InOut,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: Name,
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
    #[serde(default)]
    pub direction: Direction,
    #[serde(default, skip_serializing_if = "Documentation::is_empty")]
    pub doc: Documentation,
}

impl Parameter {
    #[must_use]
    pub fn new(name: Name, type_ref: TypeRef, direction: Direction) -> Self {
        Self {
            name,
            type_ref,
            direction,
            doc: Documentation::default(),
        }
    }

    #[must_use]
    pub fn input(name: Name, type_ref: TypeRef) -> Self {
        Self::new(name, type_ref, Direction::In)
    }

    #[must_use]
    pub fn output(name: Name, type_ref: TypeRef) -> Self {
        Self::new(name, type_ref, Direction::Out)
    }

    #[must_use]
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Documentation::new(doc);
        self
    }

    #[must_use]
    pub fn is_input(&self) -> bool {
        matches!(self.direction, Direction::In | Direction::InOut)
    }

    #[must_use]
    pub fn is_output(&self) -> bool {
        matches!(self.direction, Direction::Out | Direction::InOut)
    }
}
