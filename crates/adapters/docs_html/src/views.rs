//! Template-facing views: documentation views with doc text already
//! converted to HTML.

use askama::Template;

use virtapi_app::docs::{LocatorDoc, OperationDoc, ParameterDoc, ServiceDoc, SignatureDoc};
use virtapi_domain::constraint::InputSummary;
use virtapi_domain::documentation::Documentation;
use virtapi_domain::parameter::Direction;

use crate::asciidoc;

pub(crate) fn service_href(name: &str) -> String {
    format!("services/{name}.html")
}

pub(crate) struct MetadataView {
    pub authors: String,
    pub date: Option<String>,
    pub status: Option<String>,
    pub since: Option<String>,
}

impl MetadataView {
    fn from_doc(doc: &Documentation) -> Option<Self> {
        let metadata = &doc.metadata;
        if metadata.is_empty() {
            return None;
        }
        let date = match metadata.parsed_date() {
            Some(date) => Some(date.format("%Y-%m-%d").to_string()),
            None => metadata.date.clone(),
        };
        Some(Self {
            authors: metadata.authors.join(", "),
            date,
            status: metadata.status.clone(),
            since: metadata.since.clone(),
        })
    }
}

pub(crate) struct ParameterView {
    pub name: String,
    pub type_name: String,
    pub direction: &'static str,
    pub doc_html: String,
    pub metadata: Option<MetadataView>,
}

impl From<&ParameterDoc> for ParameterView {
    fn from(doc: &ParameterDoc) -> Self {
        Self {
            name: doc.name.to_string(),
            type_name: doc.type_name.clone(),
            direction: match doc.direction {
                Direction::In => "in",
                Direction::Out => "out",
                Direction::InOut => "in/out",
            },
            doc_html: asciidoc::to_html(&doc.doc.text),
            metadata: MetadataView::from_doc(&doc.doc),
        }
    }
}

pub(crate) struct InputsView {
    pub mandatory: Vec<String>,
    pub optional: Vec<String>,
    pub alternatives: Vec<String>,
}

impl InputsView {
    pub fn is_empty(&self) -> bool {
        self.mandatory.is_empty() && self.optional.is_empty() && self.alternatives.is_empty()
    }
}

impl From<&InputSummary> for InputsView {
    fn from(summary: &InputSummary) -> Self {
        Self {
            mandatory: summary.mandatory.iter().map(ToString::to_string).collect(),
            optional: summary.optional.iter().map(ToString::to_string).collect(),
            alternatives: summary.alternatives.iter().map(ToString::to_string).collect(),
        }
    }
}

pub(crate) struct SignatureView {
    pub name: String,
    pub doc_html: String,
    pub inputs: InputsView,
}

impl From<&SignatureDoc> for SignatureView {
    fn from(doc: &SignatureDoc) -> Self {
        Self {
            name: doc.name.to_string(),
            doc_html: asciidoc::to_html(&doc.doc.text),
            inputs: InputsView::from(&doc.inputs),
        }
    }
}

pub(crate) struct OperationView {
    pub name: String,
    pub endpoints: Vec<String>,
    pub follow: bool,
    pub doc_html: String,
    pub metadata: Option<MetadataView>,
    pub parameters: Vec<ParameterView>,
    pub inputs: InputsView,
    pub signatures: Vec<SignatureView>,
}

impl From<&OperationDoc> for OperationView {
    fn from(doc: &OperationDoc) -> Self {
        Self {
            name: doc.name.to_string(),
            endpoints: doc.endpoints.clone(),
            follow: doc.follow,
            doc_html: asciidoc::to_html(&doc.doc.text),
            metadata: MetadataView::from_doc(&doc.doc),
            parameters: doc.parameters.iter().map(ParameterView::from).collect(),
            inputs: InputsView::from(&doc.inputs),
            signatures: doc.signatures.iter().map(SignatureView::from).collect(),
        }
    }
}

pub(crate) struct LocatorView {
    pub name: String,
    pub service: String,
    pub href: String,
    pub parameters: Vec<ParameterView>,
    pub doc_html: String,
}

impl From<&LocatorDoc> for LocatorView {
    fn from(doc: &LocatorDoc) -> Self {
        let service = doc.service.to_string();
        Self {
            name: doc.name.to_string(),
            // service pages link to their siblings
            href: format!("{service}.html"),
            service,
            parameters: doc.parameters.iter().map(ParameterView::from).collect(),
            doc_html: asciidoc::to_html(&doc.doc.text),
        }
    }
}

pub(crate) struct ServiceLink {
    pub name: String,
    pub type_name: String,
    pub href: String,
    pub paths: Vec<String>,
    pub summary_html: String,
}

impl From<&ServiceDoc> for ServiceLink {
    fn from(doc: &ServiceDoc) -> Self {
        let name = doc.name.to_string();
        Self {
            href: service_href(&name),
            name,
            type_name: doc.type_name.clone(),
            paths: doc.paths.clone(),
            summary_html: asciidoc::summary_html(&doc.doc.text),
        }
    }
}

pub(crate) struct AreaView {
    pub name: String,
    pub services: Vec<ServiceLink>,
}

#[derive(Template)]
#[template(path = "index.html")]
pub(crate) struct IndexTemplate {
    pub title: String,
    pub areas: Vec<AreaView>,
}

#[derive(Template)]
#[template(path = "service.html")]
pub(crate) struct ServiceTemplate {
    pub title: String,
    pub name: String,
    pub type_name: String,
    pub area: Option<String>,
    pub paths: Vec<String>,
    pub doc_html: String,
    pub metadata: Option<MetadataView>,
    pub operations: Vec<OperationView>,
    pub locators: Vec<LocatorView>,
}

impl ServiceTemplate {
    pub fn new(title: &str, doc: &ServiceDoc) -> Self {
        Self {
            title: title.to_owned(),
            name: doc.name.to_string(),
            type_name: doc.type_name.clone(),
            area: doc.area.clone(),
            paths: doc.paths.clone(),
            doc_html: asciidoc::to_html(&doc.doc.text),
            metadata: MetadataView::from_doc(&doc.doc),
            operations: doc.operations.iter().map(OperationView::from).collect(),
            locators: doc.locators.iter().map(LocatorView::from).collect(),
        }
    }
}
