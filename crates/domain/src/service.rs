//! Service — a REST-exposed scope grouping operations and child services.
//!
//! Child services are reached through [`Locator`]s: `hosts` locates `host`
//! by `id`, `snapshot` locates `disks`, `nics` and `cdroms` without
//! parameters. Locators are what turns the flat service catalogue into a
//! resource tree.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::area::Area;
use crate::documentation::Documentation;
use crate::error::{ModelError, ValidationError};
use crate::name::Name;
use crate::operation::Operation;
use crate::parameter::Parameter;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub name: Name,
    #[serde(default, skip_serializing_if = "Documentation::is_empty")]
    pub doc: Documentation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<Area>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub operations: Vec<Operation>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locators: Vec<Locator>,
}

/// Reference from a service to a child service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locator {
    /// Path segment under the parent (`host`, `disks`).
    pub name: Name,
    /// Name of the target service.
    pub service: Name,
    /// Identifying inputs, typically `id`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
    #[serde(default, skip_serializing_if = "Documentation::is_empty")]
    pub doc: Documentation,
}

impl Service {
    /// Create a builder for constructing a [`Service`].
    #[must_use]
    pub fn builder() -> ServiceBuilder {
        ServiceBuilder::default()
    }

    /// `hosts` → `HostsService`
    #[must_use]
    pub fn type_name(&self) -> String {
        format!("{}Service", self.name.to_pascal_case())
    }

    #[must_use]
    pub fn operation(&self, name: &Name) -> Option<&Operation> {
        self.operations.iter().find(|op| &op.name == name)
    }

    #[must_use]
    pub fn locator(&self, name: &Name) -> Option<&Locator> {
        self.locators.iter().find(|l| &l.name == name)
    }

    /// Every broken structural rule of the service and its operations.
    #[must_use]
    pub fn problems(&self) -> Vec<ValidationError> {
        let mut problems = Vec::new();

        let mut seen = HashSet::new();
        for operation in &self.operations {
            if !seen.insert(&operation.name) {
                problems.push(ValidationError::DuplicateOperation {
                    service: self.name.clone(),
                    operation: operation.name.clone(),
                });
            }
        }

        let mut seen = HashSet::new();
        for locator in &self.locators {
            if !seen.insert(&locator.name) {
                problems.push(ValidationError::DuplicateLocator {
                    service: self.name.clone(),
                    locator: locator.name.clone(),
                });
            }
            for parameter in locator.parameters.iter().filter(|p| !p.is_input()) {
                problems.push(ValidationError::LocatorParameterNotInput {
                    service: self.name.clone(),
                    locator: locator.name.clone(),
                    parameter: parameter.name.clone(),
                });
            }
        }

        for operation in &self.operations {
            problems.extend(operation.problems());
        }
        problems
    }

    /// Check domain invariants, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Validation`] for the first of
    /// [`problems`](Self::problems).
    pub fn validate(&self) -> Result<(), ModelError> {
        if let Some(problem) = self.problems().into_iter().next() {
            return Err(problem.into());
        }
        Ok(())
    }
}

impl Locator {
    /// Locator without parameters (`snapshot` → `disks`).
    #[must_use]
    pub fn new(name: Name, service: Name) -> Self {
        Self {
            name,
            service,
            parameters: Vec::new(),
            doc: Documentation::default(),
        }
    }

    #[must_use]
    pub fn parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    #[must_use]
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Documentation::new(doc);
        self
    }
}

/// Step-by-step builder for [`Service`].
#[derive(Debug, Default)]
pub struct ServiceBuilder {
    name: Option<Name>,
    doc: Documentation,
    area: Option<Area>,
    operations: Vec<Operation>,
    locators: Vec<Locator>,
}

impl ServiceBuilder {
    #[must_use]
    pub fn name(mut self, name: Name) -> Self {
        self.name = Some(name);
        self
    }

    #[must_use]
    pub fn doc(mut self, doc: Documentation) -> Self {
        self.doc = doc;
        self
    }

    #[must_use]
    pub fn area(mut self, area: Area) -> Self {
        self.area = Some(area);
        self
    }

    #[must_use]
    pub fn operation(mut self, operation: Operation) -> Self {
        self.operations.push(operation);
        self
    }

    #[must_use]
    pub fn locator(mut self, locator: Locator) -> Self {
        self.locators.push(locator);
        self
    }

    /// Consume the builder, validate, and return a [`Service`].
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Validation`] if the name is missing or a
    /// structural rule is broken.
    pub fn build(self) -> Result<Service, ModelError> {
        let name = self.name.ok_or(ValidationError::EmptyName)?;
        let service = Service {
            name,
            doc: self.doc,
            area: self.area,
            operations: self.operations,
            locators: self.locators,
        };
        service.validate()?;
        Ok(service)
    }
}
