//! Model source port — where service definitions come from.

use std::future::Future;

use virtapi_domain::error::ModelError;
use virtapi_domain::service::Service;

/// Loads every service definition of a model.
pub trait ModelSource {
    /// Read and parse all service definitions.
    ///
    /// Implementations report IO and parse failures as
    /// [`ModelError::Source`]; structural rules are checked later.
    fn load_services(&self) -> impl Future<Output = Result<Vec<Service>, ModelError>> + Send;
}
