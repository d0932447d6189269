use crate::cli::actions::{Action, Outcome, check, submit};
use anyhow::Result;

/// Execute the provided action.
// Single dispatch point for all CLI actions.
/// # Errors
/// Returns an error if the action fails.
pub fn execute(action: Action) -> Result<Outcome> {
    match action {
        Action::Submit(args) => submit::execute(args),
        Action::Check(args) => check::execute(args),
    }
}
