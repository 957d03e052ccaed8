//! Filesystem-specific error type wrapping IO and parse errors.

use std::path::PathBuf;

use virtapi_domain::error::ModelError;

/// Errors originating from reading definitions or writing pages.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("unable to access {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML definition in {path}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid JSON definition in {path}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A page path would land outside the site directory.
    #[error("page path `{0}` escapes the site directory")]
    UnsafePath(String),
}

impl SourceError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { path, source }
    }
}

impl From<SourceError> for ModelError {
    fn from(err: SourceError) -> Self {
        Self::Source(Box::new(err))
    }
}
