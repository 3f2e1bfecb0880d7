//! # Batch Export
//!
//! Fans one captured source out into one artifact per selected filter.
//! Jobs run concurrently on tokio's blocking pool and are awaited together;
//! the caller only learns the aggregate [`BatchStatus`].

pub mod engine;
pub mod job;
pub mod report;
pub mod transcoder;

// Re-exports for convenience
pub use engine::{BatchHandle, ExportEngine, ExportSource, PlannedJob};
pub use job::{ExportJob, JobOutcome, JobPayload};
pub use report::{BatchReport, BatchStatus};
pub use transcoder::{FfmpegTranscoder, VideoTranscoder};
