use crate::{
    cli::{actions::Outcome, output},
    form::{FormSchema, first_error_per_field},
};
use anyhow::{Context, Result};
use secrecy::{ExposeSecret, SecretString};
use std::io::{self, Write};
use tracing::{debug, instrument};

#[derive(Debug)]
pub struct Args {
    pub field: String,
    pub value: SecretString,
    pub pretty: bool,
}

/// Execute the single-field check against stdout.
/// # Errors
/// Returns an error if the result cannot be written.
pub fn execute(args: Args) -> Result<Outcome> {
    let stdout = io::stdout();
    run(&args, stdout.lock())
}

#[instrument(skip(out))]
pub(crate) fn run<W: Write>(args: &Args, mut out: W) -> Result<Outcome> {
    let issues = FormSchema::signup().validate_field(&args.field, args.value.expose_secret());
    debug!(issues = issues.len(), "field checked");

    let errors = first_error_per_field(&issues);
    output::write_json(&mut out, &errors, args.pretty).context("failed to write field errors")?;

    Ok(if errors.is_empty() {
        Outcome::Accepted
    } else {
        Outcome::Rejected
    })
}
