use crate::api::{self, handlers::signup::SignupConfig};
use anyhow::Result;
use tracing::debug;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub dsn: String,
    pub signup_config: SignupConfig,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the database is unreachable or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    debug!(port = args.port, config = ?args.signup_config, "Starting server");
    api::new(args.port, args.dsn, args.signup_config).await
}
