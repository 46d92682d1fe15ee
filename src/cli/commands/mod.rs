//! CLI command implementations
//!
//! Every command returns the process exit code:
//!
//! | code | meaning |
//! |---|---|
//! | 0 | success, including a partial fetch in lenient mode |
//! | 1 | partial fetch with `--strict` |
//! | 2 | configuration error |
//! | 3 | authentication error |
//! | 4 | request or protocol error before paging |
//! | 5 | any other fatal error |

pub mod auth;
pub mod count;
pub mod fetch;

use crate::adapters::collectiveaccess::CollectiveAccessClient;
use crate::config::resolve::process_env;
use crate::config::{resolve_credentials, CafetchConfig, CredentialArgs, FetchConfig};
use crate::domain::record::parse_bundle_list;
use crate::domain::{CafetchError, Result};
use clap::Args;

/// Connection arguments shared by all commands
#[derive(Args, Debug, Clone, Default)]
pub struct ConnectionArgs {
    /// CollectiveAccess base URL [env: CA_BASE_URL or CA_SERVER]
    #[arg(value_name = "BASE_URL")]
    pub base_url: Option<String>,

    /// API username [env: CA_USERNAME]
    #[arg(long)]
    pub username: Option<String>,

    /// API password [env: CA_PASSWORD]
    #[arg(long)]
    pub password: Option<String>,
}

impl ConnectionArgs {
    fn credential_args(&self) -> CredentialArgs {
        CredentialArgs {
            base_url: self.base_url.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }

    /// Resolve credentials and build a client
    pub fn connect(&self, config: &CafetchConfig) -> Result<CollectiveAccessClient> {
        let credentials =
            resolve_credentials(&self.credential_args(), &config.collectiveaccess, &process_env)?;
        CollectiveAccessClient::new(credentials, &config.collectiveaccess)
    }
}

/// Search arguments shared by `fetch` and `count`
#[derive(Args, Debug, Clone, Default)]
pub struct QueryArgs {
    /// Search expression [default: *]
    #[arg(long)]
    pub search: Option<String>,

    /// Comma-separated bundle list [default: built-in object bundles]
    #[arg(long)]
    pub bundles: Option<String>,
}

impl QueryArgs {
    /// Search expression and bundle list, arguments over configuration
    pub fn resolve(&self, config: &FetchConfig) -> (String, Vec<String>) {
        let search = self
            .search
            .clone()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| config.search.clone());

        let bundles = match self.bundles.as_deref() {
            Some(raw) => parse_bundle_list(raw),
            None => parse_bundle_list(&config.bundles.join(",")),
        };

        (search, bundles)
    }
}

/// Print an error for the operator and return its exit code
pub(crate) fn report_error(context: &str, error: &CafetchError) -> i32 {
    crate::log_error_with_context!(error, context);
    eprintln!("{context}: {error}");
    error.exit_code()
}
