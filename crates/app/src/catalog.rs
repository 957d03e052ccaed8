//! Catalog: a model together with everything derived from it.

use virtapi_domain::error::{ModelError, NotFoundError};
use virtapi_domain::model::Model;
use virtapi_domain::name::Name;
use virtapi_domain::operation::Operation;
use virtapi_domain::service::Service;

use crate::checker::{CheckReport, ModelChecker};
use crate::endpoint::{Endpoint, EndpointTable};
use crate::resource_tree::ResourceTree;

/// A loaded model with its resource tree, endpoints and check report.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub model: Model,
    pub tree: ResourceTree,
    pub endpoints: EndpointTable,
    pub report: CheckReport,
}

impl Catalog {
    /// Derive the tree and endpoints, then run `checker` over the result.
    #[must_use]
    pub fn assemble(model: Model, checker: &ModelChecker) -> Self {
        let tree = ResourceTree::build(&model);
        let endpoints = EndpointTable::build(&model, &tree);
        let report = checker.check(&model, &tree, &endpoints);
        Self {
            model,
            tree,
            endpoints,
            report,
        }
    }

    /// # Errors
    ///
    /// Returns [`ModelError::NotFound`] if the service is not declared.
    pub fn service(&self, name: &Name) -> Result<&Service, ModelError> {
        self.model.require_service(name)
    }

    /// # Errors
    ///
    /// Returns [`ModelError::NotFound`] if either the service or the operation
    /// is not declared.
    pub fn operation(&self, service: &Name, operation: &Name) -> Result<&Operation, ModelError> {
        self.service(service)?.operation(operation).ok_or_else(|| {
            NotFoundError {
                kind: "Operation",
                name: format!("{service}.{operation}"),
            }
            .into()
        })
    }

    /// Endpoints of every operation of one service.
    pub fn endpoints_for<'a>(&'a self, service: &'a Name) -> impl Iterator<Item = &'a Endpoint> {
        self.endpoints.iter().filter(move |e| &e.service == service)
    }
}
