//! Documentation views: what a generator needs to render each service.

use std::collections::BTreeMap;

use serde::Serialize;

use virtapi_domain::constraint::InputSummary;
use virtapi_domain::documentation::Documentation;
use virtapi_domain::name::Name;
use virtapi_domain::operation::Operation;
use virtapi_domain::parameter::{Direction, Parameter};
use virtapi_domain::service::{Locator, Service};

use crate::catalog::Catalog;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterDoc {
    pub name: Name,
    #[serde(rename = "type")]
    pub type_name: String,
    pub direction: Direction,
    pub doc: Documentation,
}

impl From<&Parameter> for ParameterDoc {
    fn from(parameter: &Parameter) -> Self {
        Self {
            name: parameter.name.clone(),
            type_name: parameter.type_ref.to_string(),
            direction: parameter.direction,
            doc: parameter.doc.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignatureDoc {
    pub name: Name,
    pub doc: Documentation,
    pub inputs: InputSummary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationDoc {
    pub name: Name,
    pub doc: Documentation,
    /// `METHOD /path` for every mount point of the owning service.
    pub endpoints: Vec<String>,
    pub follow: bool,
    /// Includes the implicit `follow` input.
    pub parameters: Vec<ParameterDoc>,
    pub inputs: InputSummary,
    pub signatures: Vec<SignatureDoc>,
}

impl OperationDoc {
    fn build(catalog: &Catalog, service: &Service, operation: &Operation) -> Self {
        Self {
            name: operation.name.clone(),
            doc: operation.doc.clone(),
            endpoints: catalog
                .endpoints
                .for_operation(&service.name, &operation.name)
                .map(ToString::to_string)
                .collect(),
            follow: operation.follow,
            parameters: operation
                .effective_parameters()
                .iter()
                .map(ParameterDoc::from)
                .collect(),
            inputs: operation.input_summary(),
            signatures: operation
                .signatures
                .iter()
                .map(|signature| SignatureDoc {
                    name: signature.name.clone(),
                    doc: signature.doc.clone(),
                    inputs: operation.signature_summary(signature),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocatorDoc {
    pub name: Name,
    pub service: Name,
    pub parameters: Vec<ParameterDoc>,
    pub doc: Documentation,
}

impl From<&Locator> for LocatorDoc {
    fn from(locator: &Locator) -> Self {
        Self {
            name: locator.name.clone(),
            service: locator.service.clone(),
            parameters: locator.parameters.iter().map(ParameterDoc::from).collect(),
            doc: locator.doc.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceDoc {
    pub name: Name,
    /// `HostsService` style name.
    pub type_name: String,
    pub area: Option<String>,
    pub doc: Documentation,
    pub paths: Vec<String>,
    pub operations: Vec<OperationDoc>,
    pub locators: Vec<LocatorDoc>,
}

impl ServiceDoc {
    #[must_use]
    pub fn build(catalog: &Catalog, service: &Service) -> Self {
        Self {
            name: service.name.clone(),
            type_name: service.type_name(),
            area: service.area.as_ref().map(ToString::to_string),
            doc: service.doc.clone(),
            paths: catalog
                .tree
                .paths_of(&service.name)
                .map(ToString::to_string)
                .collect(),
            operations: service
                .operations
                .iter()
                .map(|operation| OperationDoc::build(catalog, service, operation))
                .collect(),
            locators: service.locators.iter().map(LocatorDoc::from).collect(),
        }
    }

    #[must_use]
    pub fn operation(&self, name: &Name) -> Option<&OperationDoc> {
        self.operations.iter().find(|o| &o.name == name)
    }
}

/// Label used for services without an area.
pub const UNGROUPED: &str = "General";

/// Views of every service, in name order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocSet {
    pub root: Option<Name>,
    pub services: Vec<ServiceDoc>,
}

impl DocSet {
    #[must_use]
    pub fn build(catalog: &Catalog) -> Self {
        Self {
            root: Some(catalog.model.root().clone()),
            services: catalog
                .model
                .services()
                .map(|service| ServiceDoc::build(catalog, service))
                .collect(),
        }
    }

    #[must_use]
    pub fn service(&self, name: &Name) -> Option<&ServiceDoc> {
        self.services.iter().find(|s| &s.name == name)
    }

    /// Services grouped by area; services without one land under
    /// [`UNGROUPED`].
    #[must_use]
    pub fn areas(&self) -> BTreeMap<&str, Vec<&ServiceDoc>> {
        let mut areas: BTreeMap<&str, Vec<&ServiceDoc>> = BTreeMap::new();
        for service in &self.services {
            let area = service.area.as_deref().unwrap_or(UNGROUPED);
            areas.entry(area).or_default().push(service);
        }
        areas
    }
}
