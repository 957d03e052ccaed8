//! Resource tree — every path at which a service is reachable from the root.
//!
//! A locator with parameters contributes one `{locator:parameter}` segment
//! per parameter (`/hosts/{host:id}`); a locator without parameters
//! contributes its own name (`/snapshots/{snapshot:id}/disks`).

use std::collections::{BTreeSet, HashSet};
use std::fmt;

use serde::Serialize;

use virtapi_domain::model::Model;
use virtapi_domain::name::Name;
use virtapi_domain::service::Locator;

/// One segment of a [`ResourcePath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    Literal(Name),
    Parameter { locator: Name, parameter: Name },
}

/// Templated path from the API root, `/` for the root itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct ResourcePath(Vec<Segment>);

impl ResourcePath {
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Path of the service reached through `locator` from `self`.
    #[must_use]
    pub fn child(&self, locator: &Locator) -> Self {
        let mut segments = self.0.clone();
        if locator.parameters.is_empty() {
            segments.push(Segment::Literal(locator.name.clone()));
        } else {
            segments.extend(locator.parameters.iter().map(|p| Segment::Parameter {
                locator: locator.name.clone(),
                parameter: p.name.clone(),
            }));
        }
        Self(segments)
    }

    /// `self` followed by a literal segment (action sub-paths).
    #[must_use]
    pub fn join(&self, literal: &Name) -> Self {
        let mut segments = self.0.clone();
        segments.push(Segment::Literal(literal.clone()));
        Self(segments)
    }

    /// Literal segments with every parameter blanked out. Two templates
    /// with the same shape match the same concrete paths.
    #[must_use]
    pub fn shape(&self) -> Vec<Option<Name>> {
        self.0
            .iter()
            .map(|segment| match segment {
                Segment::Literal(name) => Some(name.clone()),
                Segment::Parameter { .. } => None,
            })
            .collect()
    }

    /// Whether a concrete path such as `/vms/123/snapshots/456` fits this
    /// template. Query strings and trailing slashes are ignored.
    #[must_use]
    pub fn matches(&self, concrete: &str) -> bool {
        let concrete = concrete.split(['?', '#']).next().unwrap_or_default();
        let parts: Vec<&str> = concrete.split('/').filter(|p| !p.is_empty()).collect();
        parts.len() == self.0.len()
            && self.0.iter().zip(&parts).all(|(segment, part)| match segment {
                Segment::Literal(name) => name.to_snake_case() == *part,
                Segment::Parameter { .. } => true,
            })
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(name) => write!(f, "{name}"),
            Self::Parameter { locator, parameter } => write!(f, "{{{locator}:{parameter}}}"),
        }
    }
}

impl fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.0 {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

impl From<ResourcePath> for String {
    fn from(path: ResourcePath) -> Self {
        path.to_string()
    }
}

/// A service mounted at a path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceNode {
    pub path: ResourcePath,
    pub service: Name,
    /// Locator that led here, `None` for the root.
    pub locator: Option<Name>,
}

/// Problems found while walking locators.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeIssue {
    #[error("locator `{locator}` of `{service}` at {path} targets undeclared service `{target}`")]
    DanglingLocator {
        path: ResourcePath,
        service: Name,
        locator: Name,
        target: Name,
    },

    #[error("locator `{locator}` of `{service}` at {path} leads back to ancestor `{target}`")]
    Cycle {
        path: ResourcePath,
        service: Name,
        locator: Name,
        target: Name,
    },

    #[error("path {path} is reached more than once")]
    DuplicatePath { path: ResourcePath },

    #[error("service `{0}` is not reachable from the root")]
    Unreachable(Name),
}

impl TreeIssue {
    /// Unreachable services are reported but do not break the tree.
    #[must_use]
    pub fn is_error(&self) -> bool {
        !matches!(self, Self::Unreachable(_))
    }
}

/// Depth-first expansion of the model from its root.
#[derive(Debug, Clone, Default)]
pub struct ResourceTree {
    nodes: Vec<ResourceNode>,
    issues: Vec<TreeIssue>,
}

impl ResourceTree {
    /// Walk every locator from the root service.
    #[must_use]
    pub fn build(model: &Model) -> Self {
        let mut walk = Walk {
            model,
            tree: Self::default(),
            seen_shapes: HashSet::new(),
            ancestors: Vec::new(),
        };
        walk.visit(model.root().clone(), ResourcePath::root(), None);

        let mut tree = walk.tree;
        let reached: BTreeSet<&Name> = tree.nodes.iter().map(|n| &n.service).collect();
        let unreachable: Vec<Name> = model
            .services()
            .map(|s| &s.name)
            .filter(|name| !reached.contains(name))
            .cloned()
            .collect();
        tree.issues
            .extend(unreachable.into_iter().map(TreeIssue::Unreachable));

        tracing::debug!(
            nodes = tree.nodes.len(),
            issues = tree.issues.len(),
            "resource tree built"
        );
        tree
    }

    /// Nodes in depth-first order, root first.
    #[must_use]
    pub fn nodes(&self) -> &[ResourceNode] {
        &self.nodes
    }

    #[must_use]
    pub fn issues(&self) -> &[TreeIssue] {
        &self.issues
    }

    /// Every path at which `service` is mounted.
    pub fn paths_of<'a>(&'a self, service: &'a Name) -> impl Iterator<Item = &'a ResourcePath> {
        self.nodes
            .iter()
            .filter(move |n| &n.service == service)
            .map(|n| &n.path)
    }

    /// The node whose template matches a concrete path.
    #[must_use]
    pub fn resolve(&self, concrete: &str) -> Option<&ResourceNode> {
        self.nodes.iter().find(|n| n.path.matches(concrete))
    }
}

struct Walk<'a> {
    model: &'a Model,
    tree: ResourceTree,
    seen_shapes: HashSet<Vec<Option<Name>>>,
    ancestors: Vec<Name>,
}

impl Walk<'_> {
    fn visit(&mut self, service_name: Name, path: ResourcePath, locator: Option<Name>) {
        if !self.seen_shapes.insert(path.shape()) {
            self.tree.issues.push(TreeIssue::DuplicatePath { path });
            return;
        }
        self.tree.nodes.push(ResourceNode {
            path: path.clone(),
            service: service_name.clone(),
            locator,
        });

        let Some(service) = self.model.service(&service_name) else {
            return;
        };
        self.ancestors.push(service_name.clone());
        for child in &service.locators {
            if self.model.service(&child.service).is_none() {
                self.tree.issues.push(TreeIssue::DanglingLocator {
                    path: path.clone(),
                    service: service_name.clone(),
                    locator: child.name.clone(),
                    target: child.service.clone(),
                });
                continue;
            }
            if self.ancestors.contains(&child.service) {
                self.tree.issues.push(TreeIssue::Cycle {
                    path: path.clone(),
                    service: service_name.clone(),
                    locator: child.name.clone(),
                    target: child.service.clone(),
                });
                continue;
            }
            self.visit(
                child.service.clone(),
                path.child(child),
                Some(child.name.clone()),
            );
        }
        self.ancestors.pop();
    }
}
