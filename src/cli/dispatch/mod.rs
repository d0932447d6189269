//! Map validated CLI arguments to the action to run.

use crate::cli::{
    actions::{Action, check, submit},
    commands::{self, ARG_PRETTY},
};
use anyhow::{Result, anyhow};

/// Map validated CLI matches to an action.
///
/// # Errors
/// Returns an error if the subcommand is missing or its arguments are inconsistent.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    match matches.subcommand() {
        Some((commands::submit::NAME, sub_m)) => {
            let options = commands::submit::Options::parse(sub_m)?;
            Ok(Action::Submit(submit::Args {
                input: options.input,
                pretty: sub_m.get_flag(ARG_PRETTY),
            }))
        }
        Some((commands::check::NAME, sub_m)) => {
            let options = commands::check::Options::parse(sub_m)?;
            Ok(Action::Check(check::Args {
                field: options.field,
                value: options.value,
                pretty: sub_m.get_flag(ARG_PRETTY),
            }))
        }
        Some((name, _)) => Err(anyhow!("unknown subcommand: {name}")),
        None => Err(anyhow!("missing subcommand")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::submit::Input;

    fn unset_env<R>(f: impl FnOnce() -> R) -> R {
        temp_env::with_vars_unset(
            [
                "FORMGUARD_EMAIL",
                "FORMGUARD_PASSWORD",
                "FORMGUARD_BODY",
                "FORMGUARD_PRETTY",
                "FORMGUARD_LOG_LEVEL",
            ],
            f,
        )
    }

    #[test]
    fn submit_with_fields() -> Result<()> {
        unset_env(|| {
            let matches = commands::new().try_get_matches_from(vec![
                "formguard",
                "submit",
                "--email",
                "user@example.com",
                "--password",
                "ab cd",
            ])?;
            let Action::Submit(args) = handler(&matches)? else {
                return Err(anyhow!("expected submit action"));
            };
            assert!(!args.pretty);
            assert!(matches!(args.input, Input::Fields { email: Some(_), password: Some(_) }));
            Ok(())
        })
    }

    #[test]
    fn check_with_pretty() -> Result<()> {
        unset_env(|| {
            let matches = commands::new().try_get_matches_from(vec![
                "formguard",
                "--pretty",
                "check",
                "--field",
                "email",
                "--value",
                "nope",
            ])?;
            let Action::Check(args) = handler(&matches)? else {
                return Err(anyhow!("expected check action"));
            };
            assert!(args.pretty);
            assert_eq!(args.field, "email");
            Ok(())
        })
    }

    #[test]
    fn submit_with_blank_body_fails() {
        unset_env(|| {
            let matches = commands::new().get_matches_from(vec!["formguard", "submit", "--body", " "]);
            let result = handler(&matches);
            assert!(result.is_err());
            if let Err(err) = result {
                assert!(err.to_string().contains("--body"));
            }
        });
    }
}
