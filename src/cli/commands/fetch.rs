//! Fetch command implementation
//!
//! Counts the matching objects, then pages through them and appends one
//! flattened record per line to the output file.

use super::{report_error, ConnectionArgs, QueryArgs};
use crate::adapters::collectiveaccess::SearchSource;
use crate::config::CafetchConfig;
use crate::core::fetch::{FetchOutcome, FetchParams, FetchSummary, PaginatedFetcher};
use crate::core::output::JsonlWriter;
use crate::domain::{CafetchError, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};

/// Arguments for the fetch command
#[derive(Args, Debug, Default)]
pub struct FetchArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Output JSONL file [default: var/ca_objects.jsonl]
    #[arg(value_name = "OUTPUT")]
    pub output: Option<String>,

    /// Records per request [default: 100]
    #[arg(long)]
    pub limit: Option<u64>,

    /// Maximum records to fetch, 0 for all [default: 0]
    #[arg(long)]
    pub max: Option<u64>,

    #[command(flatten)]
    pub query: QueryArgs,

    /// Exit with code 1 when paging stops on an error
    #[arg(long)]
    pub strict: bool,
}

impl FetchArgs {
    /// Execute the fetch command
    pub async fn execute(&self, config: &CafetchConfig) -> anyhow::Result<i32> {
        tracing::info!("Starting fetch command");

        let params = match self.fetch_params(config) {
            Ok(params) => params,
            Err(e) => return Ok(report_error("Invalid fetch options", &e)),
        };
        let output = self.output_path(config);
        let strict = self.strict || config.fetch.strict;

        let client = match self.connection.connect(config) {
            Ok(client) => client,
            Err(e) => return Ok(report_error("Failed to set up CollectiveAccess client", &e)),
        };

        println!("Fetching objects from {}", client.base_url());

        let result = PaginatedFetcher::new(&client)
            .with_progress(progress_bar())
            .run(&params, || JsonlWriter::open(&output))
            .await;

        match result {
            Ok(summary) => {
                print_summary(&summary, &output);
                Ok(exit_code(&summary, strict))
            }
            Err(e) => Ok(report_error("Fetch failed", &e)),
        }
    }

    /// Page size, cap, search and bundles with arguments over configuration
    pub fn fetch_params(&self, config: &CafetchConfig) -> Result<FetchParams> {
        let page_size = self.limit.unwrap_or(config.fetch.page_size);
        if page_size == 0 {
            return Err(CafetchError::Configuration(
                "--limit must be greater than 0".to_string(),
            ));
        }

        let (search, bundles) = self.query.resolve(&config.fetch);

        Ok(FetchParams {
            search,
            bundles,
            page_size,
            max: self.max.unwrap_or(config.fetch.max),
        })
    }

    pub fn output_path(&self, config: &CafetchConfig) -> String {
        self.output
            .clone()
            .filter(|o| !o.is_empty())
            .unwrap_or_else(|| config.fetch.output.clone())
    }
}

/// Exit code for a finished run
pub fn exit_code(summary: &FetchSummary, strict: bool) -> i32 {
    if strict && !summary.is_complete() {
        1
    } else {
        0
    }
}

fn progress_bar() -> ProgressBar {
    let style = ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec}) {msg}",
    )
    .map(|style| style.progress_chars("#>-"))
    .unwrap_or_else(|_| ProgressStyle::default_bar());

    let progress = ProgressBar::new(0);
    progress.set_style(style);
    progress
}

fn print_summary(summary: &FetchSummary, output: &str) {
    println!();
    match &summary.outcome {
        FetchOutcome::Empty => {
            println!("No objects found");
            return;
        }
        FetchOutcome::Completed => {}
        FetchOutcome::Exhausted { offset } => {
            println!("Server returned no more records at offset {offset}");
        }
        FetchOutcome::Failed { offset, reason } => {
            eprintln!("Request failed at offset {offset}: {reason}");
        }
    }

    println!("Found {} objects", summary.total_count);
    println!(
        "Wrote {} of {} records to {} in {:.2}s",
        summary.fetched,
        summary.target,
        output,
        summary.duration.as_secs_f64()
    );
}
