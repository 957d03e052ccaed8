//! Area — a documentation grouping tag such as `Storage` or `Infrastructure`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ValidationError};

/// Functional area a service belongs to. Has no effect beyond grouping
/// generated documentation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Area(String);

impl Area {
    /// Create an area from its display name.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Validation`] when `name` is empty or blank.
    pub fn new(name: impl Into<String>) -> Result<Self, ModelError> {
        let name = name.into();
        let area = Self(name.trim().to_owned());
        area.validate()?;
        Ok(area)
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Validation`] when the name is empty.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.0.is_empty() {
            return Err(ValidationError::EmptyArea.into());
        }
        Ok(())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Area {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyArea);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl From<Area> for String {
    fn from(area: Area) -> Self {
        area.0
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
