use clap::{Arg, ArgAction, ArgMatches, Command};

pub const ARG_PASSWORD_MIN_LENGTH: &str = "password-min-length";
pub const ARG_PASSWORD_MAX_LENGTH: &str = "password-max-length";
pub const ARG_SECURE_COOKIES: &str = "secure-cookies";

#[derive(Debug, Clone)]
pub struct Options {
    pub password_min_length: usize,
    pub password_max_length: usize,
    pub secure_cookies: bool,
}

impl Options {
    /// Parse signup arguments from matches.
    ///
    /// # Errors
    /// Returns an error if a length argument is missing.
    pub fn parse(matches: &ArgMatches) -> anyhow::Result<Self> {
        let read_length = |id: &str| -> anyhow::Result<usize> {
            matches
                .get_one::<usize>(id)
                .copied()
                .ok_or_else(|| anyhow::anyhow!("missing required argument: --{id}"))
        };

        Ok(Self {
            password_min_length: read_length(ARG_PASSWORD_MIN_LENGTH)?,
            password_max_length: read_length(ARG_PASSWORD_MAX_LENGTH)?,
            secure_cookies: matches.get_flag(ARG_SECURE_COOKIES),
        })
    }
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_PASSWORD_MIN_LENGTH)
                .long(ARG_PASSWORD_MIN_LENGTH)
                .help("Minimum password length in characters")
                .env("TYPOREPORTER_PASSWORD_MIN_LENGTH")
                .default_value("8")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new(ARG_PASSWORD_MAX_LENGTH)
                .long(ARG_PASSWORD_MAX_LENGTH)
                .help("Maximum password length in characters")
                .env("TYPOREPORTER_PASSWORD_MAX_LENGTH")
                .default_value("64")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new(ARG_SECURE_COOKIES)
                .long(ARG_SECURE_COOKIES)
                .help("Mark the CSRF cookie Secure (serve over HTTPS)")
                .env("TYPOREPORTER_SECURE_COOKIES")
                .action(ArgAction::SetTrue),
        )
}
