//! Count command implementation

use super::{report_error, ConnectionArgs, QueryArgs};
use crate::adapters::collectiveaccess::SearchSource;
use crate::config::CafetchConfig;
use clap::Args;

/// Arguments for the count command
#[derive(Args, Debug, Default)]
pub struct CountArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(flatten)]
    pub query: QueryArgs,
}

impl CountArgs {
    /// Print the number of matching objects on stdout
    pub async fn execute(&self, config: &CafetchConfig) -> anyhow::Result<i32> {
        let client = match self.connection.connect(config) {
            Ok(client) => client,
            Err(e) => return Ok(report_error("Failed to set up CollectiveAccess client", &e)),
        };

        let (search, bundles) = self.query.resolve(&config.fetch);
        tracing::info!(base_url = client.base_url(), search = %search, "Counting objects");

        match client.count(&search, &bundles).await {
            Ok(count) => {
                println!("{count}");
                Ok(0)
            }
            Err(e) => Ok(report_error("Failed to get count", &e)),
        }
    }
}
