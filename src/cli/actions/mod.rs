pub mod check;
pub mod submit;

// Internal "interpreter" for `Action`.
mod run;

use std::process::ExitCode;

#[derive(Debug)]
pub enum Action {
    Submit(submit::Args),
    Check(check::Args),
}

impl Action {
    /// Execute the action.
    /// # Errors
    /// Returns an error if the input cannot be read or the result cannot be written.
    pub fn execute(self) -> anyhow::Result<Outcome> {
        run::execute(self)
    }
}

/// How validation went, independent of any operational error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Accepted,
    Rejected,
}

impl Outcome {
    #[must_use]
    pub fn exit_code(self) -> ExitCode {
        match self {
            Self::Accepted => ExitCode::SUCCESS,
            Self::Rejected => ExitCode::from(3),
        }
    }
}
