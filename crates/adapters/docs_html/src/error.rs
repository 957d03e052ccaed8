//! Rendering error type wrapping template failures.

use virtapi_domain::error::ModelError;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("unable to render page {page}")]
    Template {
        page: String,
        #[source]
        source: askama::Error,
    },
}

impl From<RenderError> for ModelError {
    fn from(err: RenderError) -> Self {
        Self::Source(Box::new(err))
    }
}
