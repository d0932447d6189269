//! Validation issues reported by the schema.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One step of an issue path: an object key or an array index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => f.write_str(key),
            Self::Index(index) => write!(f, "{index}"),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    /// Value missing or not a string.
    InvalidType,
    /// String failed a format check (email, includes, pattern).
    InvalidString,
    /// String shorter than the configured minimum.
    TooSmall,
    Custom,
}

/// A single failure from validating input against a schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub code: IssueCode,
    pub path: Vec<PathSegment>,
    pub message: String,
}

impl ValidationIssue {
    #[must_use]
    pub fn new<P, S>(code: IssueCode, path: P, message: impl Into<String>) -> Self
    where
        P: IntoIterator<Item = S>,
        S: Into<PathSegment>,
    {
        Self {
            code,
            path: path.into_iter().map(Into::into).collect(),
            message: message.into(),
        }
    }

    /// Issue located at a top-level field.
    #[must_use]
    pub fn at_field(code: IssueCode, field: &str, message: impl Into<String>) -> Self {
        Self::new(code, [field], message)
    }

    /// Field key this issue belongs to, `None` when the path is empty.
    #[must_use]
    pub fn field(&self) -> Option<String> {
        self.path.first().map(ToString::to_string)
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = self
            .path
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(".");
        write!(f, "{path}: {}", self.message)
    }
}
