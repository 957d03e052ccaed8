//! Directory-backed implementation of [`ModelSource`].

use std::future::Future;
use std::path::{Path, PathBuf};

use virtapi_app::ports::ModelSource;
use virtapi_domain::error::ModelError;
use virtapi_domain::service::Service;

use crate::error::SourceError;

/// Supported definition formats, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Toml,
    Json,
}

impl Format {
    fn of(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    fn parse(self, path: &Path, contents: &str) -> Result<Service, SourceError> {
        match self {
            Self::Toml => toml::from_str(contents).map_err(|source| SourceError::Toml {
                path: path.to_path_buf(),
                source,
            }),
            Self::Json => serde_json::from_str(contents).map_err(|source| SourceError::Json {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

/// Reads one service per file from a directory, in file name order.
///
/// Files with other extensions and sub-directories are ignored.
#[derive(Debug, Clone)]
pub struct FsModelSource {
    dir: PathBuf,
}

impl FsModelSource {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

async fn definition_files(dir: &Path) -> Result<Vec<(PathBuf, Format)>, SourceError> {
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .map_err(SourceError::io(dir))?;
    let mut files = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(SourceError::io(dir))? {
        let path = entry.path();
        let file_type = entry.file_type().await.map_err(SourceError::io(&path))?;
        if !file_type.is_file() {
            continue;
        }
        if let Some(format) = Format::of(&path) {
            files.push((path, format));
        }
    }
    files.sort_by(|(a, _), (b, _)| a.cmp(b));
    Ok(files)
}

async fn load_dir(dir: &Path) -> Result<Vec<Service>, SourceError> {
    let files = definition_files(dir).await?;
    let mut services = Vec::with_capacity(files.len());
    for (path, format) in files {
        let contents = tokio::fs::read_to_string(&path)
            .await
            .map_err(SourceError::io(&path))?;
        let service = format.parse(&path, &contents)?;
        tracing::trace!(path = %path.display(), service = %service.name, "definition parsed");
        services.push(service);
    }
    Ok(services)
}

impl ModelSource for FsModelSource {
    fn load_services(&self) -> impl Future<Output = Result<Vec<Service>, ModelError>> + Send {
        let dir = self.dir.clone();
        async move {
            let services = load_dir(&dir).await?;
            tracing::debug!(dir = %dir.display(), count = services.len(), "definitions read");
            Ok(services)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOSTS_TOML: &str = r#"
name = "hosts"
area = "Virtualization"
doc = "Manages the hosts of the system."

[[operations]]
name = "list"
follow = true

[[operations.parameters]]
name = "hosts"
type = "Host[]"
direction = "out"

[[locators]]
name = "host"
service = "host"

[[locators.parameters]]
name = "id"
type = "String"
"#;

    const HOST_JSON: &str = r#"{
        "name": "host",
        "operations": [
            { "name": "get", "parameters": [{ "name": "host", "type": "Host", "direction": "out" }] }
        ]
    }"#;

    #[tokio::test]
    async fn should_load_toml_and_json_definitions_in_file_order() {
        let dir = tempfile::tempdir().unwrap();
        tokio::fs::write(dir.path().join("b_hosts.toml"), HOSTS_TOML)
            .await
            .unwrap();
        tokio::fs::write(dir.path().join("a_host.json"), HOST_JSON)
            .await
            .unwrap();
        tokio::fs::write(dir.path().join("README.md"), "not a definition")
            .await
            .unwrap();

        let services = FsModelSource::new(dir.path()).load_services().await.unwrap();
        let names: Vec<String> = services.iter().map(|s| s.name.to_string()).collect();
        assert_eq!(names, ["host", "hosts"]);

        let hosts = &services[1];
        assert_eq!(hosts.area.as_ref().unwrap().as_str(), "Virtualization");
        assert!(hosts.operations[0].follow);
        assert_eq!(hosts.locators[0].parameters[0].name.to_string(), "id");
    }

    #[tokio::test]
    async fn should_skip_sub_directories() {
        let dir = tempfile::tempdir().unwrap();
        tokio::fs::create_dir(dir.path().join("nested.toml"))
            .await
            .unwrap();
        let services = FsModelSource::new(dir.path()).load_services().await.unwrap();
        assert!(services.is_empty());
    }

    #[tokio::test]
    async fn should_report_parse_errors_with_path() {
        let dir = tempfile::tempdir().unwrap();
        tokio::fs::write(dir.path().join("broken.toml"), "name = ")
            .await
            .unwrap();

        let err = FsModelSource::new(dir.path())
            .load_services()
            .await
            .unwrap_err();
        let ModelError::Source(source) = err else {
            panic!("expected source error, got {err:?}");
        };
        assert!(source.to_string().contains("broken.toml"));
    }

    #[tokio::test]
    async fn should_reject_invalid_constraint_text() {
        let dir = tempfile::tempdir().unwrap();
        let definition = r#"
name = "hosts"

[[operations]]
name = "add"
input_detail = ["mandatory(host.name"]
"#;
        tokio::fs::write(dir.path().join("hosts.toml"), definition)
            .await
            .unwrap();

        let result = FsModelSource::new(dir.path()).load_services().await;
        assert!(matches!(result, Err(ModelError::Source(_))));
    }

    #[tokio::test]
    async fn should_fail_on_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let source = FsModelSource::new(dir.path().join("missing"));
        let result = source.load_services().await;
        assert!(matches!(result, Err(ModelError::Source(_))));
    }
}
