use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::{
    config::Config,
    error::{ExportError, JobError, Result},
    export::{
        job::{ExportJob, JobOutcome},
        report::BatchReport,
        transcoder::{FfmpegTranscoder, VideoTranscoder},
    },
    filters::{video_expression, FilterId, FilterRegistry, FilterSelection},
    naming::{output_file_name, slug, BatchStamp, MediaKind},
    raster::Raster,
};

/// What a batch is exported from
#[derive(Debug, Clone, Copy)]
pub enum ExportSource<'a> {
    /// A captured still, shared read-only by the planning step
    Image(&'a Raster),

    /// A recorded video file on disk
    Video(&'a Path),
}

impl ExportSource<'_> {
    pub fn kind(&self) -> MediaKind {
        match self {
            ExportSource::Image(_) => MediaKind::Image,
            ExportSource::Video(_) => MediaKind::Video,
        }
    }

    /// Nothing to export from: a zero-sized raster or a missing video
    pub fn is_empty(&self) -> bool {
        match self {
            ExportSource::Image(raster) => raster.is_empty(),
            ExportSource::Video(path) => path.as_os_str().is_empty() || !path.is_file(),
        }
    }
}

/// A job as it was planned, before it ran
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedJob {
    pub index: usize,
    pub filter: FilterId,
    pub destination: PathBuf,
}

/// Handle to a submitted batch
///
/// Jobs are already running when the handle is returned. Dropping the handle
/// does not stop them; it only discards their results.
#[derive(Debug)]
pub struct BatchHandle {
    stamp: BatchStamp,
    planned: Vec<PlannedJob>,
    tasks: Vec<JoinHandle<JobOutcome>>,
}

impl BatchHandle {
    fn empty(stamp: BatchStamp) -> Self {
        Self {
            stamp,
            planned: Vec::new(),
            tasks: Vec::new(),
        }
    }

    pub fn stamp(&self) -> BatchStamp {
        self.stamp
    }

    pub fn jobs(&self) -> &[PlannedJob] {
        &self.planned
    }

    pub fn len(&self) -> usize {
        self.planned.len()
    }

    /// True when nothing was submitted
    pub fn is_empty(&self) -> bool {
        self.planned.is_empty()
    }

    /// Wait for every job, then aggregate
    ///
    /// A job that panicked is counted as a failure.
    pub async fn wait(self) -> BatchReport {
        let mut outcomes = Vec::with_capacity(self.planned.len());

        for (job, task) in self.planned.into_iter().zip(self.tasks) {
            let outcome = match task.await {
                Ok(outcome) => outcome,
                Err(e) => {
                    warn!("Export job {} ({}) aborted: {}", job.index, job.filter, e);
                    JobOutcome {
                        index: job.index,
                        filter: job.filter,
                        destination: job.destination,
                        result: Err(JobError::Aborted { reason: e.to_string() }),
                    }
                }
            };
            outcomes.push(outcome);
        }

        let report = BatchReport::from_outcomes(outcomes);
        info!(
            "Batch {} finished: {} of {} saved ({})",
            self.stamp,
            report.succeeded(),
            report.total,
            report.status()
        );
        report
    }
}

/// Turns one source plus a filter selection into concurrent export jobs
///
/// The engine holds no per-batch state, so several exports may run at once.
pub struct ExportEngine {
    registry: Arc<FilterRegistry>,
    transcoder: Arc<dyn VideoTranscoder>,
}

impl ExportEngine {
    /// Create an engine with the built-in kernels and the configured encoder
    pub fn new(config: &Config) -> Self {
        Self {
            registry: Arc::new(FilterRegistry::new()),
            transcoder: Arc::new(FfmpegTranscoder::from_config(&config.encoder)),
        }
    }

    /// Replace the video backend
    pub fn with_transcoder(mut self, transcoder: Arc<dyn VideoTranscoder>) -> Self {
        self.transcoder = transcoder;
        self
    }

    /// Replace the kernel registry
    pub fn with_registry(mut self, registry: FilterRegistry) -> Self {
        self.registry = Arc::new(registry);
        self
    }

    pub fn registry(&self) -> &FilterRegistry {
        &self.registry
    }

    /// Export `source` once per selected filter into `directory`
    ///
    /// Returns an empty handle when there is nothing to do. Fails only when
    /// the directory cannot be created or no tokio runtime is running;
    /// individual job failures show up in the [`BatchReport`].
    pub async fn export(
        &self,
        source: ExportSource<'_>,
        selection: &FilterSelection,
        directory: &Path,
    ) -> Result<BatchHandle> {
        self.export_with_stamp(source, selection, directory, BatchStamp::now())
            .await
    }

    /// Same as [`export`](Self::export) with an explicit batch timestamp
    pub async fn export_with_stamp(
        &self,
        source: ExportSource<'_>,
        selection: &FilterSelection,
        directory: &Path,
        stamp: BatchStamp,
    ) -> Result<BatchHandle> {
        if source.is_empty() || selection.is_empty() {
            info!("Nothing to export");
            return Ok(BatchHandle::empty(stamp));
        }

        let runtime = Handle::try_current().map_err(|e| ExportError::RuntimeUnavailable {
            reason: e.to_string(),
        })?;

        tokio::fs::create_dir_all(directory)
            .await
            .map_err(|source| ExportError::DestinationUnavailable {
                path: directory.display().to_string(),
                source,
            })?;

        let jobs = self.plan(source, selection, directory, &stamp);
        info!(
            "Exporting {} {:?} job(s) to {:?} (batch {})",
            jobs.len(),
            source.kind(),
            directory,
            stamp
        );

        let mut planned = Vec::with_capacity(jobs.len());
        let mut tasks = Vec::with_capacity(jobs.len());
        for job in jobs {
            planned.push(PlannedJob {
                index: job.index,
                filter: job.filter.clone(),
                destination: job.destination.clone(),
            });
            let transcoder = Arc::clone(&self.transcoder);
            tasks.push(runtime.spawn_blocking(move || job.run(transcoder.as_ref())));
        }

        Ok(BatchHandle {
            stamp,
            planned,
            tasks,
        })
    }

    /// Build every job of a batch synchronously
    ///
    /// Image kernels run here, on the caller's thread, so the concurrent jobs
    /// only do I/O. Video jobs only carry strings; encoding happens in the job.
    fn plan(
        &self,
        source: ExportSource<'_>,
        selection: &FilterSelection,
        directory: &Path,
        stamp: &BatchStamp,
    ) -> Vec<ExportJob> {
        let kind = source.kind();
        let encoder_ready = match source {
            ExportSource::Video(_) => {
                let available = self.transcoder.is_available();
                if !available {
                    warn!("Video encoder unavailable; videos will be copied unfiltered");
                }
                available
            }
            ExportSource::Image(_) => false,
        };

        selection
            .iter()
            .enumerate()
            .map(|(index, filter)| {
                let name = output_file_name(stamp, index, &slug(filter), kind);
                let destination = directory.join(name);
                debug!("Planned job {:02}: {} -> {:?}", index, filter, destination);

                match source {
                    ExportSource::Image(raster) => ExportJob::image(
                        index,
                        filter.clone(),
                        destination,
                        self.registry.apply(filter, raster),
                    ),
                    ExportSource::Video(path) => ExportJob::video(
                        index,
                        filter.clone(),
                        destination,
                        Arc::from(path),
                        video_expression(filter).filter(|_| encoder_ready),
                    ),
                }
            })
            .collect()
    }
}
