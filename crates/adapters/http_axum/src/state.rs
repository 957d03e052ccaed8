//! Shared application state for axum handlers.

use std::sync::Arc;

use virtapi_app::catalog::Catalog;
use virtapi_app::checker::ModelChecker;
use virtapi_app::docs::DocSet;
use virtapi_app::ports::Site;

/// Read-only data shared across all axum handlers.
///
/// `Clone` only clones the `Arc` wrappers.
#[derive(Clone)]
pub struct AppState {
    /// Model, resource tree, endpoints and check report.
    pub catalog: Arc<Catalog>,
    /// Documentation views served as JSON.
    pub docs: Arc<DocSet>,
    /// Rendered documentation pages.
    pub site: Arc<Site>,
    /// Used to strip the API prefix from paths to resolve.
    pub checker: Arc<ModelChecker>,
}

impl AppState {
    /// Create a new application state, deriving documentation views from
    /// `catalog`.
    pub fn new(catalog: Catalog, site: Site, checker: ModelChecker) -> Self {
        let docs = DocSet::build(&catalog);
        Self {
            catalog: Arc::new(catalog),
            docs: Arc::new(docs),
            site: Arc::new(site),
            checker: Arc::new(checker),
        }
    }
}
