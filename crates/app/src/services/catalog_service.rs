//! Catalog service — loads a model and derives everything from it.

use virtapi_domain::error::ModelError;
use virtapi_domain::model::Model;
use virtapi_domain::name::Name;

use crate::catalog::Catalog;
use crate::checker::ModelChecker;
use crate::ports::ModelSource;

/// Application service that turns raw service definitions into a [`Catalog`].
pub struct CatalogService<S> {
    source: S,
    root: Name,
    checker: ModelChecker,
}

impl<S: ModelSource> CatalogService<S> {
    /// Create a new service reading from `source`, rooted at `root`.
    pub fn new(source: S, root: Name, checker: ModelChecker) -> Self {
        Self {
            source,
            root,
            checker,
        }
    }

    /// Load every definition, assemble the model and run the checks.
    ///
    /// A catalog with error-level violations is still returned; callers
    /// decide what to do with [`Catalog::report`].
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Source`] when definitions cannot be read, or
    /// [`ModelError::Validation`] when the root is not declared or a service
    /// name is used twice.
    #[tracing::instrument(skip(self), fields(root = %self.root))]
    pub async fn load(&self) -> Result<Catalog, ModelError> {
        let services = self.source.load_services().await?;
        tracing::debug!(services = services.len(), "definitions loaded");
        let model = Model::builder()
            .root(self.root.clone())
            .services(services)
            .build()?;
        let catalog = Catalog::assemble(model, &self.checker);
        tracing::info!(
            services = catalog.model.len(),
            endpoints = catalog.endpoints.len(),
            errors = catalog.report.errors().count(),
            warnings = catalog.report.warnings().count(),
            "catalog assembled"
        );
        Ok(catalog)
    }
}
