//! Flattened view of an operation's constraints for documentation.

use serde::Serialize;

use super::Constraint;
use super::path::FieldPath;

/// Constraints split into plain mandatory fields, plain optional fields
/// and alternative groups (`or` nodes) that cannot be flattened.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InputSummary {
    pub mandatory: Vec<FieldPath>,
    pub optional: Vec<FieldPath>,
    pub alternatives: Vec<Constraint>,
}

impl InputSummary {
    /// Flatten top-level leaves and `and` groups; keep `or` groups whole.
    #[must_use]
    pub fn from_constraints<'a>(constraints: impl IntoIterator<Item = &'a Constraint>) -> Self {
        let mut summary = Self::default();
        for constraint in constraints {
            summary.absorb(constraint);
        }
        summary
    }

    fn absorb(&mut self, constraint: &Constraint) {
        match constraint {
            Constraint::Mandatory(path) => push_unique(&mut self.mandatory, path),
            Constraint::Optional(path) => push_unique(&mut self.optional, path),
            Constraint::And(children) => {
                for child in children {
                    self.absorb(child);
                }
            }
            Constraint::Or(_) => {
                if !self.alternatives.contains(constraint) {
                    self.alternatives.push(constraint.clone());
                }
            }
        }
    }

    #[must_use]
    pub fn is_mandatory(&self, path: &FieldPath) -> bool {
        self.mandatory.contains(path)
    }

    #[must_use]
    pub fn is_optional(&self, path: &FieldPath) -> bool {
        self.optional.contains(path)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mandatory.is_empty() && self.optional.is_empty() && self.alternatives.is_empty()
    }
}

fn push_unique(list: &mut Vec<FieldPath>, path: &FieldPath) {
    if !list.contains(path) {
        list.push(path.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constraints(items: &[&str]) -> Vec<Constraint> {
        items.iter().map(|s| s.parse().unwrap()).collect()
    }

    fn path(s: &str) -> FieldPath {
        s.parse().unwrap()
    }

    #[test]
    fn should_split_leaves_into_mandatory_and_optional() {
        let list = constraints(&[
            "mandatory(host.address)",
            "mandatory(host.name)",
            "optional(host.comment)",
            "optional(host.port)",
        ]);
        let summary = InputSummary::from_constraints(&list);
        assert!(summary.is_mandatory(&path("host.name")));
        assert!(summary.is_mandatory(&path("host.address")));
        assert!(summary.is_optional(&path("host.comment")));
        assert!(summary.is_optional(&path("host.port")));
        assert!(summary.alternatives.is_empty());
    }

    #[test]
    fn should_keep_or_groups_as_alternatives() {
        let list = constraints(&["or(mandatory(host.cluster.id), mandatory(host.cluster.name))"]);
        let summary = InputSummary::from_constraints(&list);
        assert!(summary.mandatory.is_empty());
        assert_eq!(summary.alternatives.len(), 1);
    }

    #[test]
    fn should_flatten_and_groups() {
        let list = constraints(&["and(mandatory(a), optional(b))"]);
        let summary = InputSummary::from_constraints(&list);
        assert_eq!(summary.mandatory, vec![path("a")]);
        assert_eq!(summary.optional, vec![path("b")]);
    }

    #[test]
    fn should_not_repeat_fields() {
        let list = constraints(&["mandatory(a)", "and(mandatory(a))"]);
        let summary = InputSummary::from_constraints(&list);
        assert_eq!(summary.mandatory.len(), 1);
    }

    #[test]
    fn should_be_empty_without_constraints() {
        assert!(InputSummary::from_constraints(&[]).is_empty());
    }
}
