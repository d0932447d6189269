//! Declarative validation schema for string form fields.
//!
//! A [`FormSchema`] is an ordered list of [`FieldSchema`]s, each with an
//! ordered list of [`Rule`]s. Validation never stops at the first failure:
//! every rule of every present field is checked and each failure becomes one
//! [`ValidationIssue`], ordered by field then by rule. Reducing that list to
//! one message per field is left to
//! [`first_error_per_field`](crate::form::field_errors::first_error_per_field).

use crate::{
    error::Result,
    form::{
        data::FormData,
        issue::{IssueCode, ValidationIssue},
    },
};
use regex::Regex;
use serde::{Serialize, Serializer, ser::SerializeMap};
use std::{fmt, sync::OnceLock};
use tracing::{debug, instrument};

pub const MSG_REQUIRED: &str = "Required";
pub const MSG_UNKNOWN_FIELD: &str = "Unknown field";

pub const MSG_INVALID_EMAIL: &str = "Formato de email inválido.";
pub const MSG_TOO_SHORT: &str = "Muito curto.";
pub const MSG_MISSING_SPACE: &str = "Inclua pelo menos 1 espaço.";
pub const PASSWORD_MIN_LENGTH: usize = 4;

// ASCII-only, case-insensitive; leading dot and `..` are rejected before matching.
const EMAIL_PATTERN: &str =
    r"^(?i-u)([A-Z0-9_'+\-.]*)[A-Z0-9_+\-]@([A-Z0-9][A-Z0-9\-]*\.)+[A-Z]{2,}$";

static EMAIL_REGEX: OnceLock<Option<Regex>> = OnceLock::new();

/// Email format check: ASCII local part, dotted domain, TLD of two letters or more.
#[must_use]
pub fn valid_email(email: &str) -> bool {
    if email.starts_with('.') || email.contains("..") {
        return false;
    }

    EMAIL_REGEX
        .get_or_init(|| Regex::new(EMAIL_PATTERN).ok())
        .as_ref()
        .is_some_and(|re| re.is_match(email))
}

/// A single check applied to a string value.
#[derive(Debug, Clone)]
pub enum Rule {
    Email { message: String },
    /// Minimum length in UTF-16 code units, as browsers count `string.length`.
    MinLength { min: usize, message: String },
    Includes { needle: String, message: String },
    Pattern { regex: Regex, message: String },
}

impl Rule {
    #[must_use]
    pub fn email(message: impl Into<String>) -> Self {
        Self::Email {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn min_length(min: usize, message: impl Into<String>) -> Self {
        Self::MinLength {
            min,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn includes(needle: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Includes {
            needle: needle.into(),
            message: message.into(),
        }
    }

    /// # Errors
    /// Returns an error if `expr` is not a valid regular expression.
    pub fn pattern(expr: &str, message: impl Into<String>) -> Result<Self> {
        Ok(Self::Pattern {
            regex: Regex::new(expr)?,
            message: message.into(),
        })
    }

    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Email { message }
            | Self::MinLength { message, .. }
            | Self::Includes { message, .. }
            | Self::Pattern { message, .. } => message,
        }
    }

    /// Issue code when `value` fails this rule, `None` when it passes.
    #[must_use]
    pub fn check(&self, value: &str) -> Option<IssueCode> {
        let passed = match self {
            Self::Email { .. } => valid_email(value),
            Self::MinLength { min, .. } => value.encode_utf16().count() >= *min,
            Self::Includes { needle, .. } => value.contains(needle.as_str()),
            Self::Pattern { regex, .. } => regex.is_match(value),
        };

        if passed {
            None
        } else if matches!(self, Self::MinLength { .. }) {
            Some(IssueCode::TooSmall)
        } else {
            Some(IssueCode::InvalidString)
        }
    }
}

#[derive(Debug, Clone)]
pub struct FieldSchema {
    name: String,
    rules: Vec<Rule>,
}

impl FieldSchema {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rules: Vec::new(),
        }
    }

    #[must_use]
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Issues for a present value, one per failed rule.
    #[must_use]
    pub fn validate(&self, value: &str) -> Vec<ValidationIssue> {
        self.rules
            .iter()
            .filter_map(|rule| {
                rule.check(value)
                    .map(|code| ValidationIssue::at_field(code, &self.name, rule.message()))
            })
            .collect()
    }

    fn missing(&self) -> ValidationIssue {
        ValidationIssue::at_field(IssueCode::InvalidType, &self.name, MSG_REQUIRED)
    }
}

#[derive(Debug, Clone, Default)]
pub struct FormSchema {
    fields: Vec<FieldSchema>,
}

impl FormSchema {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn field(mut self, field: FieldSchema) -> Self {
        self.fields.push(field);
        self
    }

    /// Schema of the sign-up form: an email and a password of at least
    /// four characters containing a space.
    #[must_use]
    pub fn signup() -> Self {
        Self::new()
            .field(FieldSchema::new("email").rule(Rule::email(MSG_INVALID_EMAIL)))
            .field(
                FieldSchema::new("password")
                    .rule(Rule::min_length(PASSWORD_MIN_LENGTH, MSG_TOO_SHORT))
                    .rule(Rule::includes(" ", MSG_MISSING_SPACE)),
            )
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(FieldSchema::name)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Validate a whole submission.
    ///
    /// Returns only the declared fields on success. On failure every issue
    /// found is returned, in field declaration order.
    ///
    /// # Errors
    /// Returns the validation issues when any field is missing or invalid.
    #[instrument(skip(self))]
    pub fn safe_parse(&self, form: &FormData) -> Result<ParsedForm, Vec<ValidationIssue>> {
        let mut issues = Vec::new();
        let mut parsed = FormData::new();

        for field in &self.fields {
            match form.get(&field.name) {
                Some(value) => {
                    issues.extend(field.validate(value));
                    parsed.append(field.name.as_str(), value);
                }
                None => issues.push(field.missing()),
            }
        }

        if issues.is_empty() {
            Ok(ParsedForm(parsed))
        } else {
            debug!(issues = issues.len(), "form rejected");
            Err(issues)
        }
    }

    /// Validate one field in isolation, as a form does while the user types.
    #[must_use]
    pub fn validate_field(&self, name: &str, value: &str) -> Vec<ValidationIssue> {
        match self.get(name) {
            Some(field) => field.validate(value),
            None => vec![ValidationIssue::at_field(
                IssueCode::Custom,
                name,
                MSG_UNKNOWN_FIELD,
            )],
        }
    }
}

/// Declared fields of a submission that passed validation.
#[derive(Clone, PartialEq, Eq)]
pub struct ParsedForm(FormData);

impl ParsedForm {
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name)
    }

    #[must_use]
    pub fn into_inner(self) -> FormData {
        self.0
    }
}

impl fmt::Debug for ParsedForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl Serialize for ParsedForm {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for name in self.0.names() {
            map.serialize_entry(name, &self.0.get(name))?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::field_errors::first_error_per_field;

    fn signup_form(email: &str, password: &str) -> FormData {
        FormData::from_pairs([("email", email), ("password", password)])
    }

    #[test]
    fn valid_email_accepts_simple() {
        assert!(valid_email("user@example.com"));
        assert!(valid_email("name.surname@example.co"));
    }

    #[test]
    fn valid_email_rejects_missing_parts() {
        assert!(!valid_email("user.example.com"));
        assert!(!valid_email("missing-domain@"));
        assert!(!valid_email("a b@example.com"));
        assert!(!valid_email(""));
    }

    #[test]
    fn valid_email_is_case_insensitive() {
        assert!(valid_email("User.Name+tag@Example.COM"));
        assert!(valid_email("o'brien@sub.example.org"));
    }

    #[test]
    fn valid_email_rejects_short_tld() {
        assert!(!valid_email("a@b.c"));
        assert!(!valid_email("a@b.c1"));
    }

    #[test]
    fn valid_email_rejects_dot_placement() {
        assert!(!valid_email(".a@b.co"));
        assert!(!valid_email("a..b@c.co"));
        assert!(!valid_email("a.@b.co"));
        assert!(!valid_email("a@b..co"));
        assert!(!valid_email("a@-b.co"));
    }

    #[test]
    fn valid_email_rejects_non_ascii() {
        assert!(!valid_email("ção@x.co"));
        assert!(!valid_email("a@exämple.co"));
    }

    #[test]
    fn signup_rejects_short_tld() {
        let issues = FormSchema::signup().validate_field("email", "a@b.c");
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].message, MSG_INVALID_EMAIL);
    }

    #[test]
    fn min_length_counts_utf16_units() {
        let rule = Rule::min_length(4, MSG_TOO_SHORT);
        assert_eq!(rule.check("ção "), None);
        assert_eq!(rule.check("abc"), Some(IssueCode::TooSmall));
        // Each emoji is a surrogate pair: two units.
        assert_eq!(rule.check("😀😀"), None);
        assert_eq!(rule.check("😀a"), Some(IssueCode::TooSmall));
    }

    #[test]
    fn signup_password_with_astral_characters() {
        let issues = FormSchema::signup().validate_field("password", "😀 😀");
        assert!(issues.is_empty());
    }

    #[test]
    fn includes_reports_invalid_string() {
        let rule = Rule::includes(" ", MSG_MISSING_SPACE);
        assert_eq!(rule.check("a b"), None);
        assert_eq!(rule.check("ab"), Some(IssueCode::InvalidString));
    }

    #[test]
    fn pattern_rule_matches() -> anyhow::Result<()> {
        let rule = Rule::pattern(r"^\d+$", "digits only")?;
        assert_eq!(rule.check("123"), None);
        assert_eq!(rule.check("12a"), Some(IssueCode::InvalidString));
        assert_eq!(rule.message(), "digits only");
        Ok(())
    }

    #[test]
    fn pattern_rule_rejects_bad_expression() {
        assert!(matches!(
            Rule::pattern("(", "never"),
            Err(crate::Error::InvalidPattern(_))
        ));
    }

    #[test]
    fn signup_accepts_valid_submission() {
        let schema = FormSchema::signup();
        let parsed = schema.safe_parse(&signup_form("user@example.com", "ab cd"));
        let Ok(parsed) = parsed else {
            panic!("expected valid submission");
        };
        assert_eq!(parsed.get("email"), Some("user@example.com"));
        assert_eq!(parsed.get("password"), Some("ab cd"));
    }

    #[test]
    fn signup_strips_unknown_fields() -> anyhow::Result<()> {
        let schema = FormSchema::signup();
        let mut form = signup_form("user@example.com", "ab cd");
        form.append("admin", "true");
        let parsed = schema
            .safe_parse(&form)
            .map_err(|issues| anyhow::anyhow!("unexpected issues: {issues:?}"))?;
        assert_eq!(parsed.get("admin"), None);
        assert_eq!(
            serde_json::to_value(&parsed)?,
            serde_json::json!({ "email": "user@example.com", "password": "ab cd" })
        );
        Ok(())
    }

    #[test]
    fn short_password_without_space_reports_both_in_order() {
        let schema = FormSchema::signup();
        let Err(issues) = schema.safe_parse(&signup_form("user@example.com", "abc")) else {
            panic!("expected issues");
        };
        let messages: Vec<&str> = issues.iter().map(|i| i.message.as_str()).collect();
        assert_eq!(messages, vec![MSG_TOO_SHORT, MSG_MISSING_SPACE]);
        assert_eq!(issues[0].code, IssueCode::TooSmall);

        let errors = first_error_per_field(&issues);
        assert_eq!(errors.message("password"), Some(MSG_TOO_SHORT));
    }

    #[test]
    fn issues_follow_field_order() {
        let schema = FormSchema::signup();
        let Err(issues) = schema.safe_parse(&signup_form("nope", "abcd")) else {
            panic!("expected issues");
        };
        let fields: Vec<Option<String>> = issues.iter().map(ValidationIssue::field).collect();
        assert_eq!(
            fields,
            vec![Some("email".to_string()), Some("password".to_string())]
        );
        assert_eq!(issues[0].message, MSG_INVALID_EMAIL);
        assert_eq!(issues[1].message, MSG_MISSING_SPACE);
    }

    #[test]
    fn missing_fields_are_required() {
        let schema = FormSchema::signup();
        let Err(issues) = schema.safe_parse(&FormData::new()) else {
            panic!("expected issues");
        };
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(|i| i.code == IssueCode::InvalidType));
        assert!(issues.iter().all(|i| i.message == MSG_REQUIRED));
    }

    #[test]
    fn empty_strings_fail_rules_not_required() {
        let schema = FormSchema::signup();
        let Err(issues) = schema.safe_parse(&signup_form("", "")) else {
            panic!("expected issues");
        };
        let errors = first_error_per_field(&issues);
        assert_eq!(errors.message("email"), Some(MSG_INVALID_EMAIL));
        assert_eq!(errors.message("password"), Some(MSG_TOO_SHORT));
    }

    #[test]
    fn validate_field_checks_single_field() {
        let schema = FormSchema::signup();
        assert!(schema.validate_field("email", "user@example.com").is_empty());

        let issues = schema.validate_field("password", "a b");
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].message, MSG_TOO_SHORT);
    }

    #[test]
    fn validate_field_rejects_unknown_field() {
        let schema = FormSchema::signup();
        let issues = schema.validate_field("nickname", "bob");
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, IssueCode::Custom);
        assert_eq!(issues[0].message, MSG_UNKNOWN_FIELD);
        assert_eq!(issues[0].field().as_deref(), Some("nickname"));
    }

    #[test]
    fn field_names_keep_declaration_order() {
        let schema = FormSchema::signup();
        assert_eq!(
            schema.field_names().collect::<Vec<_>>(),
            vec!["email", "password"]
        );
    }

    #[test]
    fn parsed_form_debug_redacts_password() -> anyhow::Result<()> {
        let schema = FormSchema::signup();
        let parsed = schema
            .safe_parse(&signup_form("user@example.com", "top secret"))
            .map_err(|issues| anyhow::anyhow!("unexpected issues: {issues:?}"))?;
        assert!(!format!("{parsed:?}").contains("top secret"));
        Ok(())
    }
}
