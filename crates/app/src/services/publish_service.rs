//! Publish service — writes a rendered site under a release prefix.

use std::fmt;

use virtapi_domain::error::ModelError;

use crate::ports::{Site, SiteWriter};

/// Which documentation line a site is published as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishTarget {
    /// Development documentation, published under `master/`.
    Master,
    /// Documentation of a released version, published under `<tag>/`.
    Tagged(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PublishError {
    #[error("unknown publish target `{0}`, expected `master` or `tagged`")]
    UnknownTarget(String),

    #[error("publishing a tagged site requires a tag")]
    MissingTag,

    #[error("tag `{0}` cannot be used as a directory name")]
    InvalidTag(String),
}

impl PublishTarget {
    /// Interpret a `master` / `tagged` argument; `tagged` takes its tag from
    /// `tag` (usually configuration or the CI environment).
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::UnknownTarget`] for any other argument,
    /// [`PublishError::MissingTag`] when `tagged` has no tag, and
    /// [`PublishError::InvalidTag`] when the tag is not a plain directory name.
    pub fn parse(arg: &str, tag: Option<&str>) -> Result<Self, PublishError> {
        match arg {
            "master" => Ok(Self::Master),
            "tagged" => {
                let tag = tag.map(str::trim).filter(|t| !t.is_empty());
                let tag = tag.ok_or(PublishError::MissingTag)?;
                Self::tagged(tag)
            }
            other => Err(PublishError::UnknownTarget(other.to_owned())),
        }
    }

    /// # Errors
    ///
    /// Returns [`PublishError::InvalidTag`] when `tag` contains a path
    /// separator or is a relative path component.
    pub fn tagged(tag: &str) -> Result<Self, PublishError> {
        let invalid = tag.is_empty()
            || tag.starts_with('.')
            || tag.contains(['/', '\\'])
            || tag.chars().any(char::is_whitespace);
        if invalid {
            return Err(PublishError::InvalidTag(tag.to_owned()));
        }
        Ok(Self::Tagged(tag.to_owned()))
    }

    /// Directory the site is written to.
    #[must_use]
    pub fn prefix(&self) -> &str {
        match self {
            Self::Master => "master",
            Self::Tagged(tag) => tag,
        }
    }
}

impl fmt::Display for PublishTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// Application service that hands every page of a site to a [`SiteWriter`].
pub struct PublishService<W> {
    writer: W,
}

impl<W: SiteWriter> PublishService<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Write every page of `site` below the target's prefix and return the
    /// number of pages written.
    ///
    /// # Errors
    ///
    /// Returns the first error reported by the writer; pages written before
    /// it are left in place.
    #[tracing::instrument(skip(self, site), fields(target = %target, pages = site.len()))]
    pub async fn publish(&self, target: &PublishTarget, site: &Site) -> Result<usize, ModelError> {
        let written = self.write_all(target.prefix(), site).await?;
        tracing::info!(written, "site published");
        Ok(written)
    }

    /// Write every page of `site` directly below the writer's root.
    ///
    /// # Errors
    ///
    /// Same as [`PublishService::publish`].
    #[tracing::instrument(skip(self, site), fields(pages = site.len()))]
    pub async fn write(&self, site: &Site) -> Result<usize, ModelError> {
        self.write_all("", site).await
    }

    async fn write_all(&self, prefix: &str, site: &Site) -> Result<usize, ModelError> {
        let mut written = 0;
        for page in site.pages() {
            self.writer.write_page(prefix, &page).await?;
            written += 1;
        }
        Ok(written)
    }
}
