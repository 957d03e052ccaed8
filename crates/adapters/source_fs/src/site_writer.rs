//! Directory-backed implementation of [`SiteWriter`].

use std::future::Future;
use std::path::{Component, Path, PathBuf};

use virtapi_app::ports::{Page, SiteWriter};
use virtapi_domain::error::ModelError;

use crate::error::SourceError;

/// Writes pages to `<root>/<prefix>/<page path>`, creating directories as
/// needed and overwriting existing files. An empty prefix writes directly
/// below the root.
#[derive(Debug, Clone)]
pub struct FsSiteWriter {
    root: PathBuf,
}

impl FsSiteWriter {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Target file of a page; only plain relative components are accepted.
    fn target(&self, prefix: &str, page: &str) -> Result<PathBuf, SourceError> {
        let mut target = self.root.clone();
        for (part, required) in [(prefix, false), (page, true)] {
            let relative = Path::new(part);
            let plain = relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
            if (required && part.is_empty()) || !plain {
                return Err(SourceError::UnsafePath(format!("{prefix}/{page}")));
            }
            if !part.is_empty() {
                target.push(relative);
            }
        }
        Ok(target)
    }
}

async fn write_file(path: PathBuf, contents: String) -> Result<(), SourceError> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(SourceError::io(parent))?;
    }
    tokio::fs::write(&path, contents)
        .await
        .map_err(SourceError::io(&path))?;
    tracing::trace!(path = %path.display(), "page written");
    Ok(())
}

impl SiteWriter for FsSiteWriter {
    fn write_page(
        &self,
        prefix: &str,
        page: &Page,
    ) -> impl Future<Output = Result<(), ModelError>> + Send {
        let target = self.target(prefix, &page.path);
        let contents = page.contents.clone();
        async move {
            write_file(target?, contents).await?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(path: &str, contents: &str) -> Page {
        Page {
            path: path.to_owned(),
            contents: contents.to_owned(),
        }
    }

    #[tokio::test]
    async fn should_write_page_below_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let writer = FsSiteWriter::new(dir.path());

        writer
            .write_page("4.2.0", &page("services/hosts.html", "<h1>Hosts</h1>"))
            .await
            .unwrap();

        let written = tokio::fs::read_to_string(dir.path().join("4.2.0/services/hosts.html"))
            .await
            .unwrap();
        assert_eq!(written, "<h1>Hosts</h1>");
    }

    #[tokio::test]
    async fn should_overwrite_existing_page() {
        let dir = tempfile::tempdir().unwrap();
        let writer = FsSiteWriter::new(dir.path());

        writer.write_page("master", &page("index.html", "old")).await.unwrap();
        writer.write_page("master", &page("index.html", "new")).await.unwrap();

        let written = tokio::fs::read_to_string(dir.path().join("master/index.html"))
            .await
            .unwrap();
        assert_eq!(written, "new");
    }

    #[tokio::test]
    async fn should_write_directly_below_root_without_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let writer = FsSiteWriter::new(dir.path());

        writer.write_page("", &page("index.html", "root")).await.unwrap();

        let written = tokio::fs::read_to_string(dir.path().join("index.html"))
            .await
            .unwrap();
        assert_eq!(written, "root");
    }

    #[tokio::test]
    async fn should_reject_paths_leaving_site_directory() {
        let dir = tempfile::tempdir().unwrap();
        let writer = FsSiteWriter::new(dir.path());

        let result = writer.write_page("master", &page("../escape.html", "x")).await;
        assert!(matches!(result, Err(ModelError::Source(_))));

        let result = writer.write_page("/etc", &page("index.html", "x")).await;
        assert!(matches!(result, Err(ModelError::Source(_))));
    }
}
