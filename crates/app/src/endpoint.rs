//! Endpoint table — the `METHOD /path` pairs derived from the tree.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use virtapi_domain::http::HttpMethod;
use virtapi_domain::model::Model;
use virtapi_domain::name::Name;

use crate::resource_tree::{ResourcePath, ResourceTree};

/// One operation of one mounted service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Endpoint {
    pub method: HttpMethod,
    pub path: ResourcePath,
    pub service: Name,
    pub operation: Name,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}

/// Every endpoint of the model, in tree order.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct EndpointTable(Vec<Endpoint>);

impl EndpointTable {
    /// Derive endpoints for every operation of every mounted service.
    #[must_use]
    pub fn build(model: &Model, tree: &ResourceTree) -> Self {
        let mut endpoints = Vec::new();
        for node in tree.nodes() {
            let Some(service) = model.service(&node.service) else {
                continue;
            };
            for operation in &service.operations {
                let kind = operation.kind();
                let path = match kind.action_segment() {
                    Some(action) => node.path.join(action),
                    None => node.path.clone(),
                };
                endpoints.push(Endpoint {
                    method: kind.http_method(),
                    path,
                    service: service.name.clone(),
                    operation: operation.name.clone(),
                });
            }
        }
        Self(endpoints)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Endpoint> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Endpoints of one operation (one per mount point of its service).
    pub fn for_operation<'a>(
        &'a self,
        service: &'a Name,
        operation: &'a Name,
    ) -> impl Iterator<Item = &'a Endpoint> {
        self.0
            .iter()
            .filter(move |e| &e.service == service && &e.operation == operation)
    }

    /// The endpoint answering `method` on a concrete path.
    #[must_use]
    pub fn find(&self, method: HttpMethod, concrete: &str) -> Option<&Endpoint> {
        self.0
            .iter()
            .find(|e| e.method == method && e.path.matches(concrete))
    }

    /// Whether any endpoint, whatever its method, lives at a concrete path.
    #[must_use]
    pub fn has_path(&self, concrete: &str) -> bool {
        self.0.iter().any(|e| e.path.matches(concrete))
    }

    /// Pairs of endpoints answering the same method on the same path shape,
    /// the earlier endpoint first.
    #[must_use]
    pub fn clashes(&self) -> Vec<(&Endpoint, &Endpoint)> {
        let mut seen: HashMap<(HttpMethod, Vec<Option<Name>>), &Endpoint> = HashMap::new();
        let mut clashes = Vec::new();
        for endpoint in &self.0 {
            let key = (endpoint.method, endpoint.path.shape());
            match seen.get(&key) {
                Some(first) => clashes.push((*first, endpoint)),
                None => {
                    seen.insert(key, endpoint);
                }
            }
        }
        clashes
    }
}
