//! Operation — a named action exposed by a service.
//!
//! Well-known names (`add`, `get`, `list`, `update`, `remove`) map to the
//! usual REST verbs; any other name is an action invoked with `POST` on a
//! sub-path (`/snapshots/{snapshot:id}/restore`).

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::constraint::{Constraint, FieldPath, InputSummary};
use crate::documentation::Documentation;
use crate::error::{ModelError, ValidationError};
use crate::http::HttpMethod;
use crate::name::Name;
use crate::parameter::Parameter;
use crate::type_ref::{Primitive, TypeRef};

/// A named action under a service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    pub name: Name,
    #[serde(default, skip_serializing_if = "Documentation::is_empty")]
    pub doc: Documentation,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub input_detail: Vec<Constraint>,
    /// Supports expanding linked sub-resources through a `follow` input.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub follow: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub signatures: Vec<Signature>,
}

/// A named variant of an operation that adds its own constraints on top of
/// the operation's (e.g. adding a host `using_root_password`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    pub name: Name,
    #[serde(default, skip_serializing_if = "Documentation::is_empty")]
    pub doc: Documentation,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub input_detail: Vec<Constraint>,
}

/// Classification of an operation by its name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationKind {
    Add,
    Get,
    List,
    Update,
    Remove,
    Action(Name),
}

impl OperationKind {
    #[must_use]
    pub fn of(name: &Name) -> Self {
        match name.to_snake_case().as_str() {
            "add" => Self::Add,
            "get" => Self::Get,
            "list" => Self::List,
            "update" => Self::Update,
            "remove" => Self::Remove,
            _ => Self::Action(name.clone()),
        }
    }

    #[must_use]
    pub fn http_method(&self) -> HttpMethod {
        match self {
            Self::Get | Self::List => HttpMethod::Get,
            Self::Update => HttpMethod::Put,
            Self::Remove => HttpMethod::Delete,
            Self::Add | Self::Action(_) => HttpMethod::Post,
        }
    }

    /// Extra path segment for actions, `None` for the standard verbs.
    #[must_use]
    pub fn action_segment(&self) -> Option<&Name> {
        match self {
            Self::Action(name) => Some(name),
            _ => None,
        }
    }

    /// `Get` and `List` are the only kinds that read without side effects.
    #[must_use]
    pub fn is_read(&self) -> bool {
        matches!(self, Self::Get | Self::List)
    }
}

impl Operation {
    /// Create a builder for constructing an [`Operation`].
    #[must_use]
    pub fn builder() -> OperationBuilder {
        OperationBuilder::default()
    }

    #[must_use]
    pub fn kind(&self) -> OperationKind {
        OperationKind::of(&self.name)
    }

    /// Declared parameters plus the implicit `follow` input of followable
    /// operations.
    #[must_use]
    pub fn effective_parameters(&self) -> Vec<Parameter> {
        let mut parameters = self.parameters.clone();
        let follow = Name::word("follow");
        if self.follow && !parameters.iter().any(|p| p.name == follow) {
            parameters.push(
                Parameter::input(follow, TypeRef::Primitive(Primitive::String)).with_doc(
                    "Comma separated list of links to follow and embed in the response, \
                     for example `disk_attachments,nics`.",
                ),
            );
        }
        parameters
    }

    pub fn inputs(&self) -> impl Iterator<Item = &Parameter> {
        self.parameters.iter().filter(|p| p.is_input())
    }

    pub fn outputs(&self) -> impl Iterator<Item = &Parameter> {
        self.parameters.iter().filter(|p| p.is_output())
    }

    #[must_use]
    pub fn parameter(&self, name: &Name) -> Option<&Parameter> {
        self.parameters.iter().find(|p| &p.name == name)
    }

    #[must_use]
    pub fn signature(&self, name: &Name) -> Option<&Signature> {
        self.signatures.iter().find(|s| &s.name == name)
    }

    /// Summary of the operation's own constraints.
    #[must_use]
    pub fn input_summary(&self) -> InputSummary {
        InputSummary::from_constraints(&self.input_detail)
    }

    /// Summary of the operation's constraints extended by `signature`'s.
    #[must_use]
    pub fn signature_summary(&self, signature: &Signature) -> InputSummary {
        InputSummary::from_constraints(self.input_detail.iter().chain(&signature.input_detail))
    }

    /// Every broken structural rule, in declaration order.
    #[must_use]
    pub fn problems(&self) -> Vec<ValidationError> {
        let mut problems = Vec::new();

        let parameters = self.effective_parameters();
        let mut seen = HashSet::new();
        for parameter in &parameters {
            if !seen.insert(&parameter.name) {
                problems.push(ValidationError::DuplicateParameter {
                    operation: self.name.clone(),
                    parameter: parameter.name.clone(),
                });
            }
        }

        let mut seen = HashSet::new();
        for signature in &self.signatures {
            if !seen.insert(&signature.name) {
                problems.push(ValidationError::DuplicateSignature {
                    operation: self.name.clone(),
                    signature: signature.name.clone(),
                });
            }
        }

        let constraints = self
            .input_detail
            .iter()
            .chain(self.signatures.iter().flat_map(|s| &s.input_detail));
        for constraint in constraints {
            for path in constraint.paths() {
                if let Some(problem) = self.check_path(&parameters, path) {
                    problems.push(problem);
                }
            }
        }

        problems
    }

    fn check_path(&self, parameters: &[Parameter], path: &FieldPath) -> Option<ValidationError> {
        let root = path.root();
        let operation = self.name.clone();
        let path = path.clone();
        let Some(parameter) = parameters.iter().find(|p| p.name == root.name) else {
            return Some(ValidationError::UnknownConstraintRoot { operation, path });
        };
        if !parameter.is_input() {
            return Some(ValidationError::ConstraintOnOutput { operation, path });
        }
        if root.collection != parameter.type_ref.is_list() {
            return Some(ValidationError::CollectionMismatch { operation, path });
        }
        if parameter.type_ref.element().is_primitive() && path.len() > 1 {
            return Some(ValidationError::PathIntoPrimitive { operation, path });
        }
        None
    }

    /// Check domain invariants, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Validation`] for the first of
    /// [`problems`](Self::problems).
    pub fn validate(&self) -> Result<(), ModelError> {
        if let Some(problem) = self.problems().into_iter().next() {
            return Err(problem.into());
        }
        Ok(())
    }
}

impl Signature {
    #[must_use]
    pub fn new(name: Name) -> Self {
        Self {
            name,
            doc: Documentation::default(),
            input_detail: Vec::new(),
        }
    }

    #[must_use]
    pub fn constraint(mut self, constraint: Constraint) -> Self {
        self.input_detail.push(constraint);
        self
    }
}

/// Step-by-step builder for [`Operation`].
#[derive(Debug, Default)]
pub struct OperationBuilder {
    name: Option<Name>,
    doc: Documentation,
    parameters: Vec<Parameter>,
    input_detail: Vec<Constraint>,
    follow: bool,
    signatures: Vec<Signature>,
}

impl OperationBuilder {
    #[must_use]
    pub fn name(mut self, name: Name) -> Self {
        self.name = Some(name);
        self
    }

    #[must_use]
    pub fn doc(mut self, doc: Documentation) -> Self {
        self.doc = doc;
        self
    }

    #[must_use]
    pub fn parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    #[must_use]
    pub fn constraint(mut self, constraint: Constraint) -> Self {
        self.input_detail.push(constraint);
        self
    }

    #[must_use]
    pub fn follow(mut self, follow: bool) -> Self {
        self.follow = follow;
        self
    }

    #[must_use]
    pub fn signature(mut self, signature: Signature) -> Self {
        self.signatures.push(signature);
        self
    }

    /// Consume the builder, validate, and return an [`Operation`].
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Validation`] if the name is missing or a
    /// structural rule is broken.
    pub fn build(self) -> Result<Operation, ModelError> {
        let name = self.name.ok_or(ValidationError::EmptyName)?;
        let operation = Operation {
            name,
            doc: self.doc,
            parameters: self.parameters,
            input_detail: self.input_detail,
            follow: self.follow,
            signatures: self.signatures,
        };
        operation.validate()?;
        Ok(operation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> Name {
        s.parse().unwrap()
    }

    fn constraint(s: &str) -> Constraint {
        s.parse().unwrap()
    }

    fn add_host() -> OperationBuilder {
        Operation::builder()
            .name(name("add"))
            .parameter(Parameter::new(
                name("host"),
                "Host".parse().unwrap(),
                crate::parameter::Direction::InOut,
            ))
            .constraint(constraint("mandatory(host.address)"))
            .constraint(constraint("mandatory(host.name)"))
            .constraint(constraint("optional(host.comment)"))
            .constraint(constraint("optional(host.port)"))
    }

    #[test]
    fn should_build_valid_operation() {
        let op = add_host().build().unwrap();
        assert_eq!(op.kind(), OperationKind::Add);
        assert_eq!(op.inputs().count(), 1);
        assert_eq!(op.outputs().count(), 1);
    }

    #[test]
    fn should_return_validation_error_when_name_missing() {
        let result = Operation::builder().build();
        assert!(matches!(
            result,
            Err(ModelError::Validation(ValidationError::EmptyName))
        ));
    }

    #[test]
    fn should_summarize_mandatory_and_optional_inputs() {
        let op = add_host().build().unwrap();
        let summary = op.input_summary();
        let host_name: FieldPath = "host.name".parse().unwrap();
        let host_port: FieldPath = "host.port".parse().unwrap();
        assert!(summary.is_mandatory(&host_name));
        assert!(summary.is_optional(&host_port));
    }

    #[test]
    fn should_extend_summary_with_signature_constraints() {
        let op = add_host()
            .signature(
                Signature::new(name("using_root_password"))
                    .constraint(constraint("mandatory(host.root_password)")),
            )
            .build()
            .unwrap();
        let signature = op.signature(&name("using_root_password")).unwrap();
        let summary = op.signature_summary(signature);
        assert_eq!(summary.mandatory.len(), 3);
        assert_eq!(op.input_summary().mandatory.len(), 2);
    }

    #[test]
    fn should_reject_duplicate_parameter_names() {
        let result = Operation::builder()
            .name(name("list"))
            .parameter(Parameter::input(name("max"), "Integer".parse().unwrap()))
            .parameter(Parameter::input(name("max"), "Integer".parse().unwrap()))
            .build();
        assert!(matches!(
            result,
            Err(ModelError::Validation(ValidationError::DuplicateParameter { .. }))
        ));
    }

    #[test]
    fn should_reject_constraint_on_undeclared_parameter() {
        let result = add_host()
            .constraint(constraint("optional(vm.name)"))
            .build();
        assert!(matches!(
            result,
            Err(ModelError::Validation(ValidationError::UnknownConstraintRoot { .. }))
        ));
    }

    #[test]
    fn should_reject_constraint_on_output_parameter() {
        let op = Operation {
            name: name("get"),
            doc: Documentation::default(),
            parameters: vec![Parameter::output(name("snapshot"), "Snapshot".parse().unwrap())],
            input_detail: vec![constraint("optional(snapshot.id)")],
            follow: false,
            signatures: vec![],
        };
        assert!(matches!(
            op.problems().as_slice(),
            [ValidationError::ConstraintOnOutput { .. }]
        ));
    }

    #[test]
    fn should_check_collection_marker_against_list_type() {
        let op = Operation {
            name: name("restore"),
            doc: Documentation::default(),
            parameters: vec![
                Parameter::input(name("disks"), "Disk[]".parse().unwrap()),
                Parameter::input(name("restore_memory"), "Boolean".parse().unwrap()),
            ],
            input_detail: vec![
                constraint("optional(disks[].id)"),
                constraint("optional(disks.image_id)"),
                constraint("optional(restore_memory)"),
                constraint("optional(restore_memory.value)"),
            ],
            follow: false,
            signatures: vec![],
        };
        let problems = op.problems();
        assert_eq!(problems.len(), 2);
        assert!(matches!(problems[0], ValidationError::CollectionMismatch { .. }));
        assert!(matches!(problems[1], ValidationError::PathIntoPrimitive { .. }));
    }

    #[test]
    fn should_add_implicit_follow_parameter() {
        let op = Operation::builder()
            .name(name("get"))
            .parameter(Parameter::output(name("snapshot"), "Snapshot".parse().unwrap()))
            .follow(true)
            .build()
            .unwrap();
        let params = op.effective_parameters();
        assert_eq!(params.len(), 2);
        assert_eq!(params[1].name, name("follow"));
        assert!(params[1].is_input());
    }

    #[test]
    fn should_accept_constraint_on_implicit_follow_parameter() {
        let list = Operation::builder()
            .name(name("list"))
            .parameter(Parameter::output(name("hosts"), "Host[]".parse().unwrap()))
            .constraint(constraint("optional(follow)"))
            .follow(true)
            .build()
            .unwrap();
        assert!(list.problems().is_empty());

        let result = Operation::builder()
            .name(name("list"))
            .constraint(constraint("optional(follow)"))
            .build();
        assert!(matches!(
            result,
            Err(ModelError::Validation(ValidationError::UnknownConstraintRoot { .. }))
        ));
    }

    #[test]
    fn should_not_add_follow_parameter_when_already_declared() {
        let op = Operation {
            name: name("list"),
            doc: Documentation::default(),
            parameters: vec![
                Parameter::input(name("follow"), "String".parse().unwrap()),
                Parameter::input(name("follow"), "String".parse().unwrap()),
            ],
            input_detail: vec![],
            follow: true,
            signatures: vec![],
        };
        assert_eq!(op.effective_parameters().len(), 2);
        assert_eq!(op.problems().len(), 1);
    }

    #[test]
    fn should_classify_operation_kinds() {
        assert_eq!(OperationKind::of(&name("List")), OperationKind::List);
        assert_eq!(OperationKind::of(&name("remove")), OperationKind::Remove);
        let restore = OperationKind::of(&name("restore"));
        assert_eq!(restore.http_method(), HttpMethod::Post);
        assert_eq!(restore.action_segment(), Some(&name("restore")));
        assert!(OperationKind::Get.is_read());
        assert!(!OperationKind::Add.is_read());
    }

    #[test]
    fn should_reject_duplicate_signatures() {
        let result = add_host()
            .signature(Signature::new(name("using_ssh")))
            .signature(Signature::new(name("using_ssh")))
            .build();
        assert!(matches!(
            result,
            Err(ModelError::Validation(ValidationError::DuplicateSignature { .. }))
        ));
    }

    #[test]
    fn should_deserialize_operation_from_toml() {
        let op: Operation = toml::from_str(
            "
            name = 'list'
            follow = true
            input_detail = []

            [[parameters]]
            name = 'hosts'
            type = 'Host[]'
            direction = 'out'

            [[parameters]]
            name = 'max'
            type = 'Integer'
            doc = 'Sets the maximum number of hosts to return.'
            ",
        )
        .unwrap();
        assert_eq!(op.kind(), OperationKind::List);
        assert!(op.follow);
        assert_eq!(op.parameters.len(), 2);
        assert!(op.validate().is_ok());
    }
}
