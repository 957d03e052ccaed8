//! Documentation blocks attached to services, operations and parameters.
//!
//! The text uses a small AsciiDoc subset (paragraphs, `[source]` listings,
//! `....` literal blocks, admonitions). Authoring metadata (`author`, `date`,
//! `status`, `since`) is kept verbatim and carries no meaning for the model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::http::HttpMethod;

/// Free text plus opaque authoring metadata.
///
/// Deserializes from either a plain string or a table with `text` and
/// metadata keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "DocumentationRepr")]
pub struct Documentation {
    pub text: String,
    #[serde(default, skip_serializing_if = "Metadata::is_empty")]
    pub metadata: Metadata,
}

/// Authoring metadata, preserved but never interpreted by the model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,
    /// Free-form date such as `12 Dec 2016`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub since: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DocumentationRepr {
    Text(String),
    Full {
        #[serde(default)]
        text: String,
        #[serde(default)]
        metadata: Metadata,
    },
}

impl From<DocumentationRepr> for Documentation {
    fn from(repr: DocumentationRepr) -> Self {
        match repr {
            DocumentationRepr::Text(text) => Self {
                text,
                metadata: Metadata::default(),
            },
            DocumentationRepr::Full { text, metadata } => Self { text, metadata },
        }
    }
}

/// A `METHOD /path` line found inside a listing block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleRequest {
    pub method: HttpMethod,
    /// Path as written, including any query string.
    pub path: String,
}

impl Documentation {
    /// Documentation with text and no metadata.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            metadata: Metadata::default(),
        }
    }

    #[must_use]
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty() && self.metadata.is_empty()
    }

    /// First paragraph of the text, joined onto one line.
    #[must_use]
    pub fn summary(&self) -> String {
        self.text
            .trim()
            .lines()
            .map(str::trim)
            .take_while(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Request lines (`POST /ovirt-engine/api/hosts`) appearing inside
    /// `----` listing or `....` literal blocks.
    #[must_use]
    pub fn example_requests(&self) -> Vec<ExampleRequest> {
        let mut requests = Vec::new();
        let mut open_delimiter: Option<&str> = None;
        for line in self.text.lines().map(str::trim) {
            if line == "----" || line == "...." {
                open_delimiter = match open_delimiter {
                    Some(open) if open == line => None,
                    Some(open) => Some(open),
                    None => Some(line),
                };
                continue;
            }
            if open_delimiter.is_none() {
                continue;
            }
            let Some((method, rest)) = line.split_once(' ') else {
                continue;
            };
            let Ok(method) = method.parse::<HttpMethod>() else {
                continue;
            };
            let path = rest.trim();
            if path.starts_with('/') && !path.contains(char::is_whitespace) {
                requests.push(ExampleRequest {
                    method,
                    path: path.to_owned(),
                });
            }
        }
        requests
    }
}

impl Metadata {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.authors.is_empty()
            && self.date.is_none()
            && self.status.is_none()
            && self.since.is_none()
    }

    /// Interpret `date` as `%d %b %Y` (`12 Dec 2016`).
    ///
    /// Returns `None` when absent or written in another format.
    #[must_use]
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        let date = self.date.as_deref()?;
        NaiveDate::parse_from_str(date.trim(), "%d %b %Y").ok()
    }
}
