use clap::{Arg, ArgMatches, Command};
use secrecy::SecretString;

pub const NAME: &str = "check";
pub const ARG_FIELD: &str = "field";
pub const ARG_VALUE: &str = "value";

#[derive(Debug, Clone)]
pub struct Options {
    pub field: String,
    pub value: SecretString,
}

impl Options {
    /// Parse single-field arguments from the `check` matches.
    ///
    /// # Errors
    /// Returns an error if the field name is missing or blank.
    pub fn parse(matches: &ArgMatches) -> anyhow::Result<Self> {
        let field = matches
            .get_one::<String>(ARG_FIELD)
            .map(|field| field.trim().to_string())
            .filter(|field| !field.is_empty())
            .ok_or_else(|| anyhow::anyhow!("missing required argument: --{ARG_FIELD}"))?;

        // An empty value is still a value to validate.
        let value = matches
            .get_one::<String>(ARG_VALUE)
            .cloned()
            .unwrap_or_default();

        Ok(Self {
            field,
            value: SecretString::from(value),
        })
    }
}

#[must_use]
pub fn command() -> Command {
    Command::new(NAME)
        .about("Validate a single field and print its error, if any")
        .arg(
            Arg::new(ARG_FIELD)
                .short('f')
                .long("field")
                .help("Field name, example: email")
                .required(true),
        )
        .arg(
            Arg::new(ARG_VALUE)
                .long("value")
                .help("Field value")
                .allow_hyphen_values(true)
                .default_value(""),
        )
}
