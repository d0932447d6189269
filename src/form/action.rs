//! The form action: validate a submission and shape the response.

use crate::form::{
    data::FormData,
    field_errors::{FieldErrorMap, first_error_per_field},
    issue::{IssueCode, ValidationIssue},
    schema::{FormSchema, MSG_REQUIRED, ParsedForm},
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Serialize, Serializer};
use tracing::{debug, info, info_span};
use ulid::Ulid;

pub const MSG_SUCCESS: &str = "Payload sent successfully!";

/// Typed view over a validated submission.
pub trait FormPayload: Sized + Serialize {
    /// # Errors
    /// Returns issues for fields the payload needs but the parsed form lacks.
    fn from_parsed(parsed: ParsedForm) -> Result<Self, Vec<ValidationIssue>>;
}

impl FormPayload for ParsedForm {
    fn from_parsed(parsed: ParsedForm) -> Result<Self, Vec<ValidationIssue>> {
        Ok(parsed)
    }
}

/// Validated sign-up fields. The password stays wrapped until serialized.
#[derive(Debug, Clone, Serialize)]
pub struct SignupPayload {
    pub email: String,
    #[serde(serialize_with = "serialize_secret")]
    pub password: SecretString,
}

fn serialize_secret<S: Serializer>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}

impl FormPayload for SignupPayload {
    fn from_parsed(parsed: ParsedForm) -> Result<Self, Vec<ValidationIssue>> {
        let required = |name: &str| {
            parsed
                .get(name)
                .map(str::to_string)
                .ok_or_else(|| ValidationIssue::at_field(IssueCode::InvalidType, name, MSG_REQUIRED))
        };

        match (required("email"), required("password")) {
            (Ok(email), Ok(password)) => Ok(Self {
                email,
                password: SecretString::from(password),
            }),
            (email, password) => Err([email.err(), password.err()].into_iter().flatten().collect()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Success<P> {
    pub payload: P,
    pub message: String,
}

/// Result of a form action: exactly one of `errors` and `data` is set.
#[derive(Debug, Clone, Serialize)]
pub struct ActionData<P> {
    pub errors: Option<FieldErrorMap>,
    pub data: Option<Success<P>>,
}

impl<P> ActionData<P> {
    #[must_use]
    pub fn rejected(errors: FieldErrorMap) -> Self {
        Self {
            errors: Some(errors),
            data: None,
        }
    }

    #[must_use]
    pub fn accepted(payload: P) -> Self {
        Self {
            errors: None,
            data: Some(Success {
                payload,
                message: MSG_SUCCESS.to_string(),
            }),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.errors.is_none()
    }
}

/// Validate `form` against `schema`, mapping any failure to one error per field.
pub fn submit<P: FormPayload>(schema: &FormSchema, form: &FormData) -> ActionData<P> {
    let submission_id = Ulid::new();
    let span = info_span!("form.submit", submission_id = %submission_id, fields = form.len());
    let _guard = span.enter();

    let issues = match schema.safe_parse(form).and_then(P::from_parsed) {
        Ok(payload) => {
            info!("submission accepted");
            return ActionData::accepted(payload);
        }
        Err(issues) => issues,
    };

    for issue in &issues {
        debug!(code = ?issue.code, "{issue}");
    }

    let errors = first_error_per_field(&issues);
    info!(
        issues = issues.len(),
        fields = errors.len(),
        "submission rejected"
    );

    ActionData::rejected(errors)
}

/// The sign-up form action.
pub fn submit_signup(form: &FormData) -> ActionData<SignupPayload> {
    submit(&FormSchema::signup(), form)
}
