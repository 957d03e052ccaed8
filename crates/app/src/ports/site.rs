//! Site ports — rendering documentation and persisting the result.

use std::collections::BTreeMap;
use std::future::Future;

use virtapi_domain::error::ModelError;

use crate::docs::DocSet;

/// One rendered file, addressed by a `/`-separated relative path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub path: String,
    pub contents: String,
}

/// A set of rendered pages keyed by relative path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Site {
    pages: BTreeMap<String, String>,
}

impl Site {
    /// Add or replace a page.
    pub fn insert(&mut self, path: impl Into<String>, contents: impl Into<String>) {
        self.pages.insert(path.into(), contents.into());
    }

    #[must_use]
    pub fn get(&self, path: &str) -> Option<&str> {
        self.pages.get(path).map(String::as_str)
    }

    /// Pages in path order.
    pub fn pages(&self) -> impl Iterator<Item = Page> + '_ {
        self.pages.iter().map(|(path, contents)| Page {
            path: path.clone(),
            contents: contents.clone(),
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// Turns documentation views into a static site.
pub trait DocRenderer {
    /// # Errors
    ///
    /// Returns [`ModelError::Source`] when a page cannot be rendered.
    fn render(&self, docs: &DocSet) -> Result<Site, ModelError>;
}

/// Persists rendered pages somewhere (a directory, a docs branch checkout, …).
pub trait SiteWriter {
    /// Write `page` below `prefix` (e.g. `master` or a release tag).
    fn write_page(
        &self,
        prefix: &str,
        page: &Page,
    ) -> impl Future<Output = Result<(), ModelError>> + Send;
}
