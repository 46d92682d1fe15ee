//! Paginated fetch loop
//!
//! One run goes through these states:
//!
//! 1. **Counting**: a single-record probe reads the total match count. Any
//!    error here aborts the run.
//! 2. **Fetching**: pages of at most `page_size` records are requested in
//!    order, flattened and written. The next page is only requested after the
//!    previous one is fully written.
//! 3. The run ends as `Completed` once `target` records are written,
//!    `Exhausted` when a page comes back empty, or `Failed` when a page
//!    request fails with a request or protocol error. Records written before
//!    the failure stay in the output.
//!
//! Authentication failures and output errors are fatal in every state. The
//! output is only opened once the count is known to be non-zero, and it is
//! closed on every path after that.

use super::summary::{FetchOutcome, FetchSummary};
use crate::adapters::collectiveaccess::SearchSource;
use crate::core::output::RecordSink;
use crate::core::transform::flatten_record;
use crate::domain::search::{SearchRequest, SearchResponse};
use crate::domain::{CafetchError, Result};
use indicatif::ProgressBar;
use std::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

/// Parameters of one fetch run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchParams {
    /// Search expression
    pub search: String,

    /// Bundles requested for every record
    pub bundles: Vec<String>,

    /// Records per page, must be positive
    pub page_size: u64,

    /// Upper bound on records written, 0 for no bound
    pub max: u64,
}

impl FetchParams {
    /// Number of records a run sets out to write for `total_count` matches
    pub fn target(&self, total_count: u64) -> u64 {
        if self.max > 0 {
            total_count.min(self.max)
        } else {
            total_count
        }
    }
}

/// Drives a [`SearchSource`] page by page into a [`RecordSink`]
pub struct PaginatedFetcher<'a, S: SearchSource> {
    source: &'a S,
    progress: ProgressBar,
}

impl<'a, S: SearchSource> PaginatedFetcher<'a, S> {
    /// Create a fetcher with a hidden progress bar
    pub fn new(source: &'a S) -> Self {
        Self {
            source,
            progress: ProgressBar::hidden(),
        }
    }

    /// Report progress on `progress`; its length is set to the target
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// Run a fetch
    ///
    /// `open_sink` is called at most once, after a non-zero count.
    ///
    /// # Errors
    ///
    /// - `Configuration` when `page_size` is zero
    /// - any error from the count probe
    /// - `Authentication` errors while paging
    /// - errors opening, writing or closing the sink
    ///
    /// Request and protocol errors while paging are not returned; they end
    /// the run with [`FetchOutcome::Failed`].
    pub async fn run<W, F>(&self, params: &FetchParams, open_sink: F) -> Result<FetchSummary>
    where
        W: RecordSink,
        F: FnOnce() -> Result<W>,
    {
        let session_id = Uuid::new_v4();
        let span = tracing::info_span!("fetch", session_id = %session_id);

        self.run_session(session_id, params, open_sink)
            .instrument(span)
            .await
    }

    async fn run_session<W, F>(
        &self,
        session_id: Uuid,
        params: &FetchParams,
        open_sink: F,
    ) -> Result<FetchSummary>
    where
        W: RecordSink,
        F: FnOnce() -> Result<W>,
    {
        let started = Instant::now();

        if params.page_size == 0 {
            return Err(CafetchError::Configuration(
                "page size must be greater than zero".to_string(),
            ));
        }

        tracing::info!(base_url = self.source.base_url(), "Fetching object count");
        let total_count = self.source.count(&params.search, &params.bundles).await?;

        if total_count == 0 {
            tracing::warn!(search = %params.search, "No objects found");
            let summary = FetchSummary::empty(session_id, started.elapsed());
            summary.log_summary();
            return Ok(summary);
        }

        let target = params.target(total_count);
        tracing::info!(total_count, target, "Found objects");
        crate::log_fetch_start!(self.source.base_url(), params.search, target);

        self.progress.set_length(target);
        self.progress.set_position(0);

        let mut sink = open_sink()?;
        let paged = self.fetch_pages(&mut sink, params, target).await;
        let closed = sink.close();

        if paged.is_err() {
            self.progress.abandon();
        } else {
            self.progress.finish();
        }

        let (fetched, pages, outcome) = paged?;
        closed?;

        let summary = FetchSummary {
            session_id,
            total_count,
            target,
            fetched,
            pages,
            outcome,
            duration: started.elapsed(),
        };
        summary.log_summary();
        Ok(summary)
    }

    /// The fetching state; returns records written, pages used and outcome
    async fn fetch_pages<W: RecordSink>(
        &self,
        sink: &mut W,
        params: &FetchParams,
        target: u64,
    ) -> Result<(u64, u64, FetchOutcome)> {
        let mut fetched = 0u64;
        let mut pages = 0u64;
        let mut start = 0u64;

        while fetched < target {
            let batch_limit = params.page_size.min(target - fetched);
            let request =
                SearchRequest::new(params.search.clone(), params.bundles.clone(), start, batch_limit)?;

            let records = match self
                .source
                .search(&request)
                .await
                .and_then(SearchResponse::into_records)
            {
                Ok(records) => records,
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    tracing::warn!(offset = start, error = %e, "Page request failed, stopping");
                    return Ok((
                        fetched,
                        pages,
                        FetchOutcome::Failed {
                            offset: start,
                            reason: e.to_string(),
                        },
                    ));
                }
            };

            if records.is_empty() {
                tracing::info!(offset = start, fetched, target, "Empty page, stopping");
                return Ok((fetched, pages, FetchOutcome::Exhausted { offset: start }));
            }

            pages += 1;
            let received = records.len();

            for raw in &records {
                sink.write(&flatten_record(raw))?;
                fetched += 1;
                self.progress.inc(1);

                if fetched >= target {
                    break;
                }
            }

            crate::log_page_fetched!(start, received, fetched, target);
            start += batch_limit;
        }

        Ok((fetched, pages, FetchOutcome::Completed))
    }
}
