use std::fmt;
use std::path::Path;

use crate::export::job::JobOutcome;

/// The only externally visible outcome of a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchStatus {
    /// No jobs were created (empty source or empty selection)
    NothingSubmitted,
    AllSucceeded,
    Partial,
    AllFailed,
}

impl BatchStatus {
    pub fn classify(total: usize, failed: usize) -> Self {
        if total == 0 {
            BatchStatus::NothingSubmitted
        } else if failed == 0 {
            BatchStatus::AllSucceeded
        } else if failed >= total {
            BatchStatus::AllFailed
        } else {
            BatchStatus::Partial
        }
    }
}

impl fmt::Display for BatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            BatchStatus::NothingSubmitted => "Nothing to save",
            BatchStatus::AllSucceeded => "All filtered files saved",
            BatchStatus::Partial => "Some files could not be saved",
            BatchStatus::AllFailed => "None of the selected files could be saved",
        };
        f.write_str(message)
    }
}

/// Aggregate of every job in a finished batch
#[derive(Debug)]
pub struct BatchReport {
    pub total: usize,
    pub failed: usize,
    /// One outcome per job, sorted by index
    pub outcomes: Vec<JobOutcome>,
}

impl BatchReport {
    pub(crate) fn from_outcomes(mut outcomes: Vec<JobOutcome>) -> Self {
        outcomes.sort_by_key(|outcome| outcome.index);
        let failed = outcomes.iter().filter(|outcome| !outcome.succeeded()).count();
        Self {
            total: outcomes.len(),
            failed,
            outcomes,
        }
    }

    pub fn status(&self) -> BatchStatus {
        BatchStatus::classify(self.total, self.failed)
    }

    pub fn succeeded(&self) -> usize {
        self.total - self.failed
    }

    pub fn failures(&self) -> impl Iterator<Item = &JobOutcome> {
        self.outcomes.iter().filter(|outcome| !outcome.succeeded())
    }

    /// Paths of artifacts actually written
    pub fn saved_paths(&self) -> impl Iterator<Item = &Path> {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.succeeded())
            .map(|outcome| outcome.destination.as_path())
    }
}
