use clap::{Arg, ArgAction, ArgMatches, Command};
use secrecy::SecretString;

pub const NAME: &str = "submit";
pub const ARG_EMAIL: &str = "email";
pub const ARG_PASSWORD: &str = "password";
pub const ARG_BODY: &str = "body";
pub const ARG_STDIN: &str = "stdin";

/// Where the submission comes from.
#[derive(Debug, Clone)]
pub enum Input {
    /// Individual fields; a field that was not given stays absent.
    Fields {
        email: Option<String>,
        password: Option<SecretString>,
    },
    /// An urlencoded body.
    Body(String),
    /// An urlencoded body read from standard input.
    Stdin,
}

#[derive(Debug, Clone)]
pub struct Options {
    pub input: Input,
}

impl Options {
    /// Parse submission arguments from the `submit` matches.
    ///
    /// # Errors
    /// Returns an error if the body argument is present but blank.
    pub fn parse(matches: &ArgMatches) -> anyhow::Result<Self> {
        if matches.get_flag(ARG_STDIN) {
            return Ok(Self {
                input: Input::Stdin,
            });
        }

        if let Some(body) = matches.get_one::<String>(ARG_BODY) {
            if body.trim().is_empty() {
                anyhow::bail!("empty value for argument: --{ARG_BODY}");
            }
            return Ok(Self {
                input: Input::Body(body.clone()),
            });
        }

        Ok(Self {
            input: Input::Fields {
                email: matches.get_one::<String>(ARG_EMAIL).cloned(),
                password: matches
                    .get_one::<String>(ARG_PASSWORD)
                    .map(|password| SecretString::from(password.clone())),
            },
        })
    }
}

#[must_use]
pub fn command() -> Command {
    Command::new(NAME)
        .about("Run the sign-up form action and print its result as JSON")
        .arg(
            Arg::new(ARG_EMAIL)
                .short('e')
                .long("email")
                .help("Email field")
                .env("FORMGUARD_EMAIL"),
        )
        .arg(
            Arg::new(ARG_PASSWORD)
                .long("password")
                .help("Password field")
                .env("FORMGUARD_PASSWORD")
                .hide_env_values(true),
        )
        .arg(
            Arg::new(ARG_BODY)
                .short('b')
                .long("body")
                .help("Urlencoded form body, example: email=a%40b.co&password=ab+cd")
                .env("FORMGUARD_BODY")
                .hide_env_values(true)
                .conflicts_with_all([ARG_EMAIL, ARG_PASSWORD, ARG_STDIN]),
        )
        .arg(
            Arg::new(ARG_STDIN)
                .long("stdin")
                .help("Read an urlencoded form body from standard input")
                .action(ArgAction::SetTrue)
                .conflicts_with_all([ARG_EMAIL, ARG_PASSWORD]),
        )
}
