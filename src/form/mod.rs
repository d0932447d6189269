//! Form validation: schema, issues, field error mapping and the form action.

pub mod action;
pub mod data;
pub mod field_errors;
pub mod issue;
pub mod schema;

pub use action::{ActionData, FormPayload, SignupPayload, Success, submit, submit_signup};
pub use data::FormData;
pub use field_errors::{FieldError, FieldErrorMap, first_error_per_field};
pub use issue::{IssueCode, PathSegment, ValidationIssue};
pub use schema::{FieldSchema, FormSchema, ParsedForm, Rule};
