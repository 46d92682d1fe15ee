//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for cafetch using clap.

pub mod commands;

use crate::config::{load_config_or_default, CafetchConfig};
use crate::domain::Result;
use clap::{Parser, Subcommand};

/// Configuration file read when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = "cafetch.toml";

/// cafetch - CollectiveAccess objects to JSONL
#[derive(Parser, Debug)]
#[command(name = "cafetch")]
#[command(version, about, long_about = None)]
#[command(author = "Cafetch Contributors")]
pub struct Cli {
    /// Path to configuration file [default: cafetch.toml, optional]
    #[arg(short, long, env = "CAFETCH_CONFIG")]
    pub config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "CAFETCH_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Path of the configuration file in effect
    pub fn config_path(&self) -> &str {
        self.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH)
    }

    /// Load the configuration file
    ///
    /// A missing default file yields defaults; a missing file named with
    /// `--config` or `CAFETCH_CONFIG` is an error.
    pub fn load_config(&self) -> Result<CafetchConfig> {
        load_config_or_default(self.config_path(), self.config.is_some())
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch objects and append them to a JSONL file
    Fetch(commands::fetch::FetchArgs),

    /// Print the number of objects matching a search
    Count(commands::count::CountArgs),

    /// Check that the credentials are accepted
    Auth(commands::auth::AuthArgs),
}
