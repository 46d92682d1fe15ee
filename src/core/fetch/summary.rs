//! Fetch summary and reporting

use std::fmt;
use std::time::Duration;
use uuid::Uuid;

/// How a fetch ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The search matched nothing; no output was opened
    Empty,

    /// `target` records were written
    Completed,

    /// The server returned an empty page at `offset` before `target` was reached
    Exhausted { offset: u64 },

    /// A page request failed at `offset`; earlier records were kept
    Failed { offset: u64, reason: String },
}

impl fmt::Display for FetchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchOutcome::Empty => write!(f, "empty"),
            FetchOutcome::Completed => write!(f, "completed"),
            FetchOutcome::Exhausted { offset } => write!(f, "exhausted at offset {offset}"),
            FetchOutcome::Failed { offset, reason } => {
                write!(f, "failed at offset {offset}: {reason}")
            }
        }
    }
}

/// Summary of a fetch run
#[derive(Debug, Clone)]
pub struct FetchSummary {
    /// Identifier of the run, also attached to its log span
    pub session_id: Uuid,

    /// Matches reported by the count probe
    pub total_count: u64,

    /// Records the run set out to write
    pub target: u64,

    /// Records actually written
    pub fetched: u64,

    /// Page requests that returned records
    pub pages: u64,

    pub outcome: FetchOutcome,

    pub duration: Duration,
}

impl FetchSummary {
    /// Summary of a run that matched nothing
    pub fn empty(session_id: Uuid, duration: Duration) -> Self {
        Self {
            session_id,
            total_count: 0,
            target: 0,
            fetched: 0,
            pages: 0,
            outcome: FetchOutcome::Empty,
            duration,
        }
    }

    /// Whether the run ended without a page failure
    ///
    /// An exhausted result set counts as complete.
    pub fn is_complete(&self) -> bool {
        !matches!(self.outcome, FetchOutcome::Failed { .. })
    }

    /// Log the summary
    pub fn log_summary(&self) {
        crate::log_fetch_complete!(self.fetched, self.duration);

        match &self.outcome {
            FetchOutcome::Failed { offset, reason } => {
                tracing::warn!(
                    offset = offset,
                    fetched = self.fetched,
                    target = self.target,
                    reason = %reason,
                    "Fetch stopped early after a failed page"
                );
            }
            FetchOutcome::Exhausted { offset } => {
                tracing::info!(
                    offset = offset,
                    fetched = self.fetched,
                    target = self.target,
                    "Server returned no more records"
                );
            }
            FetchOutcome::Empty | FetchOutcome::Completed => {
                tracing::info!(
                    total_count = self.total_count,
                    target = self.target,
                    fetched = self.fetched,
                    pages = self.pages,
                    outcome = %self.outcome,
                    "Fetch summary"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(outcome: FetchOutcome) -> FetchSummary {
        FetchSummary {
            session_id: Uuid::new_v4(),
            total_count: 10,
            target: 10,
            fetched: 4,
            pages: 2,
            outcome,
            duration: Duration::from_millis(20),
        }
    }

    #[test]
    fn test_is_complete() {
        assert!(summary(FetchOutcome::Completed).is_complete());
        assert!(summary(FetchOutcome::Exhausted { offset: 4 }).is_complete());
        assert!(FetchSummary::empty(Uuid::new_v4(), Duration::ZERO).is_complete());
        assert!(!summary(FetchOutcome::Failed {
            offset: 4,
            reason: "timeout".to_string()
        })
        .is_complete());
    }

    #[test]
    fn test_outcome_display() {
        let failed = FetchOutcome::Failed {
            offset: 100,
            reason: "Request error: connection reset".to_string(),
        };
        assert_eq!(
            failed.to_string(),
            "failed at offset 100: Request error: connection reset"
        );
        assert_eq!(
            FetchOutcome::Exhausted { offset: 200 }.to_string(),
            "exhausted at offset 200"
        );
    }

    #[test]
    fn test_log_summary_without_subscriber() {
        summary(FetchOutcome::Completed).log_summary();
    }
}
