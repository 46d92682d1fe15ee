// cafetch - CollectiveAccess GraphQL to JSONL fetcher
// Copyright (c) 2025 Cafetch Contributors
// Licensed under the MIT License

//! # cafetch - CollectiveAccess objects to JSONL
//!
//! cafetch logs in to a CollectiveAccess instance through its GraphQL
//! services, pages through an object search and appends each result, flattened
//! to a single-level JSON object, to a line-delimited output file.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Fetch loop, record flattening and output sinks
//! - [`adapters`] - CollectiveAccess GraphQL client and token cache
//! - [`domain`] - Credentials, records, search types and errors
//! - [`config`] - Configuration file and credential resolution
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cafetch::adapters::collectiveaccess::CollectiveAccessClient;
//! use cafetch::config::{load_config_or_default, resolve::process_env, resolve_credentials, CredentialArgs};
//! use cafetch::core::fetch::{FetchParams, PaginatedFetcher};
//! use cafetch::core::output::JsonlWriter;
//! use cafetch::domain::record::default_bundles;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config_or_default("cafetch.toml", false)?;
//!     let credentials = resolve_credentials(
//!         &CredentialArgs::default(),
//!         &config.collectiveaccess,
//!         &process_env,
//!     )?;
//!     let client = CollectiveAccessClient::new(credentials, &config.collectiveaccess)?;
//!
//!     let params = FetchParams {
//!         search: "*".to_string(),
//!         bundles: default_bundles(),
//!         page_size: 100,
//!         max: 0,
//!     };
//!     let summary = PaginatedFetcher::new(&client)
//!         .run(&params, || JsonlWriter::open("var/ca_objects.jsonl"))
//!         .await?;
//!
//!     println!("Wrote {} records ({})", summary.fetched, summary.outcome);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every fallible operation returns [`domain::CafetchError`]. Request and
//! protocol errors while paging end the run early but keep the records already
//! written; authentication, configuration and output errors abort it.
//!
//! ## Logging
//!
//! cafetch uses structured logging with the `tracing` crate. Each fetch runs
//! in a span carrying a random session id.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
