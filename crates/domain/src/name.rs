//! Word-based identifiers.
//!
//! A [`Name`] is stored as a sequence of lower-case words so the same
//! identifier can be rendered as `snake_case` (REST parameters, paths),
//! `camelCase` or `PascalCase` (type names) without re-parsing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier of a service, operation, parameter or locator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Name(Vec<String>);

/// Why a string could not be turned into a [`Name`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NameError {
    #[error("name must not be empty")]
    Empty,

    #[error("invalid character `{ch}` in name `{input}`")]
    InvalidCharacter { input: String, ch: char },

    #[error("name `{0}` must start with a letter")]
    LeadingDigit(String),
}

impl Name {
    /// Build a name from a single, already lower-case word.
    pub(crate) fn word(word: &str) -> Self {
        Self(vec![word.to_owned()])
    }

    /// The lower-case words making up this name.
    #[must_use]
    pub fn words(&self) -> &[String] {
        &self.0
    }

    /// `deploy_hosted_engine`
    #[must_use]
    pub fn to_snake_case(&self) -> String {
        self.0.join("_")
    }

    /// `deployHostedEngine`
    #[must_use]
    pub fn to_camel_case(&self) -> String {
        let mut out = String::new();
        for (i, word) in self.0.iter().enumerate() {
            if i == 0 {
                out.push_str(word);
            } else {
                push_capitalized(&mut out, word);
            }
        }
        out
    }

    /// `DeployHostedEngine`
    #[must_use]
    pub fn to_pascal_case(&self) -> String {
        let mut out = String::new();
        for word in &self.0 {
            push_capitalized(&mut out, word);
        }
        out
    }
}

fn push_capitalized(out: &mut String, word: &str) {
    let mut chars = word.chars();
    if let Some(first) = chars.next() {
        out.push(first.to_ascii_uppercase());
        out.push_str(chars.as_str());
    }
}

/// Split one `_`-free chunk on case humps: `rootPassword` → `root`, `password`;
/// `HTTPProxy` → `http`, `proxy`.
fn split_humps(chunk: &str, words: &mut Vec<String>) {
    let chars: Vec<char> = chunk.chars().collect();
    let mut current = String::new();
    for (i, &ch) in chars.iter().enumerate() {
        if ch.is_ascii_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(char::is_ascii_lowercase);
            if prev.is_ascii_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_ascii_uppercase() && next_is_lower)
            {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(ch.to_ascii_lowercase());
    }
    if !current.is_empty() {
        words.push(current);
    }
}

impl FromStr for Name {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(ch) = s.chars().find(|c| !(c.is_ascii_alphanumeric() || *c == '_')) {
            return Err(NameError::InvalidCharacter {
                input: s.to_owned(),
                ch,
            });
        }
        let mut words = Vec::new();
        for chunk in s.split('_').filter(|chunk| !chunk.is_empty()) {
            split_humps(chunk, &mut words);
        }
        match words.first() {
            None => Err(NameError::Empty),
            Some(first) if first.starts_with(|c: char| c.is_ascii_digit()) => {
                Err(NameError::LeadingDigit(s.to_owned()))
            }
            Some(_) => Ok(Self(words)),
        }
    }
}

impl TryFrom<String> for Name {
    type Error = NameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Name> for String {
    fn from(name: Name) -> Self {
        name.to_snake_case()
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_snake_case())
    }
}
