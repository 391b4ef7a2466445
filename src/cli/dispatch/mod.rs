//! Map validated CLI arguments to the action the binary runs.

use crate::api::handlers::signup::{PasswordPolicy, SignupConfig};
use crate::cli::actions::{Action, server::Args};
use crate::cli::commands::signup;
use anyhow::{Context, Result, anyhow};
use url::Url;

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>("port").copied().unwrap_or(8080);
    let dsn = matches
        .get_one::<String>("dsn")
        .cloned()
        .context("missing required argument: --dsn")?;

    let parsed = Url::parse(&dsn).context("invalid TYPOREPORTER_DSN")?;
    if !matches!(parsed.scheme(), "postgres" | "postgresql") {
        return Err(anyhow!(
            "invalid TYPOREPORTER_DSN: unsupported scheme '{}'",
            parsed.scheme()
        ));
    }

    let signup_opts = signup::Options::parse(matches)?;
    let policy = PasswordPolicy::new(
        signup_opts.password_min_length,
        signup_opts.password_max_length,
    )
    .ok_or_else(|| {
        anyhow!(
            "invalid password length bounds: min {} max {}",
            signup_opts.password_min_length,
            signup_opts.password_max_length
        )
    })?;

    let signup_config = SignupConfig::new()
        .with_password_policy(policy)
        .with_secure_cookies(signup_opts.secure_cookies);

    Ok(Action::Server(Args {
        port,
        dsn,
        signup_config,
    }))
}
