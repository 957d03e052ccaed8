//! Model — the complete service catalogue with a designated root.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, NotFoundError, ValidationError};
use crate::name::Name;
use crate::service::Service;

/// Every declared service, keyed by name, plus the root of the resource tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ModelRepr", into = "ModelRepr")]
pub struct Model {
    root: Name,
    services: BTreeMap<Name, Service>,
}

#[derive(Serialize, Deserialize)]
struct ModelRepr {
    root: Name,
    services: Vec<Service>,
}

impl Model {
    /// Create a builder for constructing a [`Model`].
    #[must_use]
    pub fn builder() -> ModelBuilder {
        ModelBuilder::default()
    }

    #[must_use]
    pub fn root(&self) -> &Name {
        &self.root
    }

    /// The root service; always present once built.
    #[must_use]
    pub fn root_service(&self) -> Option<&Service> {
        self.services.get(&self.root)
    }

    #[must_use]
    pub fn service(&self, name: &Name) -> Option<&Service> {
        self.services.get(name)
    }

    /// Look up a service, returning an error if not declared.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::NotFound`] when no service named `name` exists.
    pub fn require_service(&self, name: &Name) -> Result<&Service, ModelError> {
        self.service(name).ok_or_else(|| {
            NotFoundError {
                kind: "Service",
                name: name.to_string(),
            }
            .into()
        })
    }

    /// Services in name order.
    pub fn services(&self) -> impl Iterator<Item = &Service> {
        self.services.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.services.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

impl TryFrom<ModelRepr> for Model {
    type Error = ValidationError;

    fn try_from(repr: ModelRepr) -> Result<Self, Self::Error> {
        ModelBuilder {
            root: Some(repr.root),
            services: repr.services,
        }
        .assemble()
    }
}

impl From<Model> for ModelRepr {
    fn from(model: Model) -> Self {
        Self {
            root: model.root,
            services: model.services.into_values().collect(),
        }
    }
}

/// Step-by-step builder for [`Model`].
#[derive(Debug, Default)]
pub struct ModelBuilder {
    root: Option<Name>,
    services: Vec<Service>,
}

impl ModelBuilder {
    #[must_use]
    pub fn root(mut self, root: Name) -> Self {
        self.root = Some(root);
        self
    }

    #[must_use]
    pub fn service(mut self, service: Service) -> Self {
        self.services.push(service);
        self
    }

    #[must_use]
    pub fn services(mut self, services: impl IntoIterator<Item = Service>) -> Self {
        self.services.extend(services);
        self
    }

    fn assemble(self) -> Result<Model, ValidationError> {
        let root = self.root.ok_or(ValidationError::EmptyName)?;
        let mut services = BTreeMap::new();
        for service in self.services {
            let name = service.name.clone();
            if services.insert(name.clone(), service).is_some() {
                return Err(ValidationError::DuplicateService(name));
            }
        }
        if !services.contains_key(&root) {
            return Err(ValidationError::MissingRoot(root));
        }
        Ok(Model { root, services })
    }

    /// Consume the builder and return a [`Model`].
    ///
    /// Per-service rules are not checked here so that a model with broken
    /// services can still be inspected and reported on.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Validation`] when the root is missing or not
    /// declared, or a service name is declared twice.
    pub fn build(self) -> Result<Model, ModelError> {
        self.assemble().map_err(ModelError::from)
    }
}
