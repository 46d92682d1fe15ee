//! Auth command implementation

use super::{report_error, ConnectionArgs};
use crate::config::CafetchConfig;
use clap::Args;

/// Arguments for the auth command
#[derive(Args, Debug, Default)]
pub struct AuthArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,
}

impl AuthArgs {
    /// Log in once and report the result
    pub async fn execute(&self, config: &CafetchConfig) -> anyhow::Result<i32> {
        let client = match self.connection.connect(config) {
            Ok(client) => client,
            Err(e) => return Ok(report_error("Failed to set up CollectiveAccess client", &e)),
        };

        match client.verify_credentials().await {
            Ok(()) => {
                let credentials = client.credentials();
                println!(
                    "Authenticated as {} at {}",
                    credentials.username(),
                    credentials.base_url()
                );
                Ok(0)
            }
            Err(e) => Ok(report_error("Authentication failed", &e)),
        }
    }
}
