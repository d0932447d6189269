use crate::{
    cli::{actions::Outcome, commands::submit::Input, output},
    form::{FormData, submit_signup},
};
use anyhow::{Context, Result};
use secrecy::ExposeSecret;
use std::io::{self, Read, Write};
use tracing::{debug, instrument};

#[derive(Debug)]
pub struct Args {
    pub input: Input,
    pub pretty: bool,
}

/// Execute the submit action against stdin/stdout.
/// # Errors
/// Returns an error if the body cannot be read or the result cannot be written.
pub fn execute(args: Args) -> Result<Outcome> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run(args, stdin.lock(), stdout.lock())
}

#[instrument(skip_all, fields(pretty = args.pretty))]
pub(crate) fn run<R: Read, W: Write>(args: Args, stdin: R, mut out: W) -> Result<Outcome> {
    let form = read_form(args.input, stdin)?;
    debug!(fields = form.len(), "form data read");

    let result = submit_signup(&form);
    output::write_json(&mut out, &result, args.pretty).context("failed to write action result")?;

    Ok(if result.is_success() {
        Outcome::Accepted
    } else {
        Outcome::Rejected
    })
}

fn read_form<R: Read>(input: Input, mut stdin: R) -> Result<FormData> {
    match input {
        Input::Fields { email, password } => {
            let mut form = FormData::new();
            if let Some(email) = email {
                form.append("email", email);
            }
            if let Some(password) = password {
                form.append("password", password.expose_secret());
            }
            Ok(form)
        }
        Input::Body(body) => Ok(FormData::from_urlencoded(&body)),
        Input::Stdin => {
            let mut body = String::new();
            stdin
                .read_to_string(&mut body)
                .context("failed to read form body from stdin")?;
            Ok(FormData::from_urlencoded(&body))
        }
    }
}
