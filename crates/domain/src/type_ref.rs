//! References to parameter types.
//!
//! Struct types (`Host`, `Disk`, …) are defined outside this model and are
//! only referenced by name.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Built-in scalar types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Boolean,
    Integer,
    Decimal,
    String,
    Date,
}

impl Primitive {
    fn as_str(self) -> &'static str {
        match self {
            Self::Boolean => "Boolean",
            Self::Integer => "Integer",
            Self::Decimal => "Decimal",
            Self::String => "String",
            Self::Date => "Date",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "Boolean" => Some(Self::Boolean),
            "Integer" => Some(Self::Integer),
            "Decimal" => Some(Self::Decimal),
            "String" => Some(Self::String),
            "Date" => Some(Self::Date),
            _ => None,
        }
    }
}

/// Type of a parameter: a primitive, an external struct type, or a list.
///
/// Text form: `Boolean`, `Host`, `Disk[]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TypeRef {
    Primitive(Primitive),
    Struct(String),
    List(Box<TypeRef>),
}

/// Why a type reference could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeRefError {
    #[error("type name must not be empty")]
    Empty,

    #[error("type name `{0}` must be PascalCase alphanumerics")]
    InvalidName(String),
}

impl TypeRef {
    #[must_use]
    pub fn list_of(element: TypeRef) -> Self {
        Self::List(Box::new(element))
    }

    #[must_use]
    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// The innermost non-list type.
    #[must_use]
    pub fn element(&self) -> &TypeRef {
        match self {
            Self::List(inner) => inner.element(),
            other => other,
        }
    }

    #[must_use]
    pub fn is_primitive(&self) -> bool {
        matches!(self, Self::Primitive(_))
    }
}

impl FromStr for TypeRef {
    type Err = TypeRefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(inner) = s.strip_suffix("[]") {
            return Ok(Self::list_of(inner.parse()?));
        }
        if s.is_empty() {
            return Err(TypeRefError::Empty);
        }
        if let Some(primitive) = Primitive::from_name(s) {
            return Ok(Self::Primitive(primitive));
        }
        let valid = s.starts_with(|c: char| c.is_ascii_uppercase())
            && s.chars().all(|c| c.is_ascii_alphanumeric());
        if !valid {
            return Err(TypeRefError::InvalidName(s.to_owned()));
        }
        Ok(Self::Struct(s.to_owned()))
    }
}

impl TryFrom<String> for TypeRef {
    type Error = TypeRefError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TypeRef> for String {
    fn from(type_ref: TypeRef) -> Self {
        type_ref.to_string()
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(p) => f.write_str(p.as_str()),
            Self::Struct(name) => f.write_str(name),
            Self::List(inner) => write!(f, "{inner}[]"),
        }
    }
}
