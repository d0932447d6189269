//! Reduce validation issues to one displayable error per field.

use crate::form::issue::ValidationIssue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub message: String,
}

/// Field name to its single error message, as consumed by a form renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrorMap(BTreeMap<String, FieldError>);

impl FieldErrorMap {
    /// Key for issues that carry no path (form-level errors).
    ///
    /// A field literally named `root` shares this key, so first-wins applies
    /// across both: whichever issue comes first is the one kept.
    pub const ROOT: &'static str = "root";

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `message` for `field` unless the field already has one.
    /// Returns `true` when the entry was inserted.
    pub fn insert_first(&mut self, field: String, message: &str) -> bool {
        if self.0.contains_key(&field) {
            return false;
        }
        self.0.insert(
            field,
            FieldError {
                message: message.to_string(),
            },
        );
        true
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&FieldError> {
        self.0.get(field)
    }

    #[must_use]
    pub fn message(&self, field: &str) -> Option<&str> {
        self.get(field).map(|error| error.message.as_str())
    }

    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldError)> {
        self.0.iter().map(|(field, error)| (field.as_str(), error))
    }
}

impl<'a> FromIterator<&'a ValidationIssue> for FieldErrorMap {
    fn from_iter<I: IntoIterator<Item = &'a ValidationIssue>>(issues: I) -> Self {
        first_error_per_field(issues)
    }
}

/// Keep the earliest issue for every field, in input order.
///
/// The field is the first path segment; issues without a path are filed
/// under [`FieldErrorMap::ROOT`]. Later issues for an already reported field
/// are discarded.
pub fn first_error_per_field<'a, I>(issues: I) -> FieldErrorMap
where
    I: IntoIterator<Item = &'a ValidationIssue>,
{
    issues.into_iter().fold(FieldErrorMap::new(), |mut acc, issue| {
        let field = issue
            .field()
            .unwrap_or_else(|| FieldErrorMap::ROOT.to_string());
        acc.insert_first(field, &issue.message);
        acc
    })
}
