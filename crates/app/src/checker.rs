//! Structural checks over a loaded model.
//!
//! Collects every problem instead of stopping at the first one so a
//! definition author sees the whole picture in one run.

use serde::Serialize;

use virtapi_domain::documentation::Documentation;
use virtapi_domain::model::Model;
use virtapi_domain::operation::Operation;
use virtapi_domain::service::Service;

use crate::endpoint::EndpointTable;
use crate::resource_tree::ResourceTree;

/// Path prefix used by example requests in the documentation.
pub const DEFAULT_API_PREFIX: &str = "/ovirt-engine/api";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

/// One finding, located by a dotted `service.operation.parameter` string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub severity: Severity,
    pub location: String,
    pub message: String,
}

/// Result of [`ModelChecker::check`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct CheckReport {
    pub violations: Vec<Violation>,
}

impl CheckReport {
    /// `true` when no error-level violation was found.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.errors().next().is_none()
    }

    pub fn errors(&self) -> impl Iterator<Item = &Violation> {
        self.violations
            .iter()
            .filter(|v| v.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Violation> {
        self.violations
            .iter()
            .filter(|v| v.severity == Severity::Warning)
    }

    fn push(&mut self, severity: Severity, location: impl Into<String>, message: impl ToString) {
        self.violations.push(Violation {
            severity,
            location: location.into(),
            message: message.to_string(),
        });
    }
}

/// Runs every structural rule against a model and its derived tree.
#[derive(Debug, Clone)]
pub struct ModelChecker {
    api_prefix: String,
}

impl Default for ModelChecker {
    fn default() -> Self {
        Self::new(DEFAULT_API_PREFIX)
    }
}

impl ModelChecker {
    /// `api_prefix` is stripped from example request paths before they are
    /// resolved against the tree.
    #[must_use]
    pub fn new(api_prefix: impl Into<String>) -> Self {
        Self {
            api_prefix: api_prefix.into().trim_end_matches('/').to_owned(),
        }
    }

    #[must_use]
    pub fn api_prefix(&self) -> &str {
        &self.api_prefix
    }

    #[must_use]
    pub fn check(
        &self,
        model: &Model,
        tree: &ResourceTree,
        endpoints: &EndpointTable,
    ) -> CheckReport {
        let mut report = CheckReport::default();

        for issue in tree.issues() {
            let severity = if issue.is_error() {
                Severity::Error
            } else {
                Severity::Warning
            };
            report.push(severity, "tree", issue);
        }

        for (first, second) in endpoints.clashes() {
            report.push(
                Severity::Error,
                "endpoints",
                format!(
                    "{second} of `{}.{}` clashes with `{}.{}`",
                    second.service, second.operation, first.service, first.operation
                ),
            );
        }

        for service in model.services() {
            let location = service.name.to_string();
            for problem in service.problems() {
                report.push(Severity::Error, location.clone(), problem);
            }
            for operation in &service.operations {
                self.check_operation_shape(&mut report, service, operation);
            }
            self.check_documentation(&mut report, service, endpoints);
        }

        tracing::debug!(
            errors = report.errors().count(),
            warnings = report.warnings().count(),
            "model checked"
        );
        report
    }

    #[allow(clippy::unused_self)]
    fn check_operation_shape(
        &self,
        report: &mut CheckReport,
        service: &Service,
        operation: &Operation,
    ) {
        let location = format!("{}.{}", service.name, operation.name);
        let kind = operation.kind();
        if operation.follow && !kind.is_read() {
            report.push(
                Severity::Warning,
                location.clone(),
                "follow is only meaningful on get and list operations",
            );
        }
        if kind.is_read() {
            let outputs = operation.outputs().count();
            if outputs != 1 {
                report.push(
                    Severity::Warning,
                    location,
                    format!("read operation declares {outputs} outputs, expected exactly one"),
                );
            }
        }
    }

    fn check_documentation(
        &self,
        report: &mut CheckReport,
        service: &Service,
        endpoints: &EndpointTable,
    ) {
        let mut blocks: Vec<(String, &Documentation)> = vec![(service.name.to_string(), &service.doc)];
        for locator in &service.locators {
            blocks.push((format!("{}.{}", service.name, locator.name), &locator.doc));
        }
        for operation in &service.operations {
            let location = format!("{}.{}", service.name, operation.name);
            for parameter in &operation.parameters {
                blocks.push((format!("{location}.{}", parameter.name), &parameter.doc));
            }
            for signature in &operation.signatures {
                blocks.push((format!("{location}.{}", signature.name), &signature.doc));
            }
            blocks.push((location, &operation.doc));
        }

        for (location, doc) in blocks {
            for request in doc.example_requests() {
                let path = self.strip_prefix(&request.path);
                if endpoints.find(request.method, path).is_some() {
                    continue;
                }
                let message = if endpoints.has_path(path) {
                    format!(
                        "example request `{} {}` uses a method the resource does not support",
                        request.method, request.path
                    )
                } else {
                    format!(
                        "example request `{} {}` does not resolve to a declared resource",
                        request.method, request.path
                    )
                };
                report.push(Severity::Error, location.clone(), message);
            }
        }
    }

    /// Remove the API prefix from a concrete request path, if present.
    #[must_use]
    pub fn strip_prefix<'a>(&self, path: &'a str) -> &'a str {
        if self.api_prefix.is_empty() {
            return path;
        }
        match path.strip_prefix(self.api_prefix.as_str()) {
            Some(rest) if rest.is_empty() || rest.starts_with(['/', '?']) => rest,
            _ => path,
        }
    }
}
