//! # formguard
//!
//! Server-side validation for a sign-up form (`email` + `password`).
//!
//! A submission is checked against a declarative [`FormSchema`]. Every failed
//! rule becomes a [`ValidationIssue`] carrying a path and a message. The issue
//! list is then reduced to a [`FieldErrorMap`] holding one message per field,
//! the first one reported for that field, which is what a form renderer shows
//! next to each input.
//!
//! The form action ([`form::submit_signup`]) returns either the field errors or
//! the validated payload with a confirmation message, serialized as
//! `{ "errors": ..., "data": ... }`.
//!
//! Issues without a path are form-level and land under
//! [`FieldErrorMap::ROOT`].

pub mod cli;
pub mod error;
pub mod form;

pub use error::{Error, Result};
pub use form::{FieldErrorMap, FormData, FormSchema, ValidationIssue, first_error_per_field};

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};
