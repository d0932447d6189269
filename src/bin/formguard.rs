use anyhow::Result;
use formguard::cli;
use std::process::ExitCode;

fn main() -> Result<ExitCode> {
    let action = cli::start()?;

    let outcome = action.execute()?;

    Ok(outcome.exit_code())
}
