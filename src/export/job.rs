use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::JobError;
use crate::export::transcoder::VideoTranscoder;
use crate::filters::FilterId;
use crate::raster::Raster;

/// What a job writes
#[derive(Debug, Clone)]
pub enum JobPayload {
    /// An already-filtered raster; the job only serializes it
    Image(Raster),

    /// A source video plus the encoder expression to run it through.
    /// No expression means a plain byte copy.
    Video {
        source: Arc<Path>,
        expression: Option<&'static str>,
    },
}

/// One filter-and-write unit of a batch
///
/// Immutable once planned; consumed when it runs.
#[derive(Debug, Clone)]
pub struct ExportJob {
    pub index: usize,
    pub filter: FilterId,
    pub destination: PathBuf,
    pub payload: JobPayload,
}

/// Result of one job
#[derive(Debug)]
pub struct JobOutcome {
    pub index: usize,
    pub filter: FilterId,
    pub destination: PathBuf,
    pub result: Result<(), JobError>,
}

impl JobOutcome {
    pub fn succeeded(&self) -> bool {
        self.result.is_ok()
    }
}

impl ExportJob {
    pub fn image(index: usize, filter: FilterId, destination: PathBuf, raster: Raster) -> Self {
        Self {
            index,
            filter,
            destination,
            payload: JobPayload::Image(raster),
        }
    }

    pub fn video(
        index: usize,
        filter: FilterId,
        destination: PathBuf,
        source: Arc<Path>,
        expression: Option<&'static str>,
    ) -> Self {
        Self {
            index,
            filter,
            destination,
            payload: JobPayload::Video { source, expression },
        }
    }

    /// Execute the job on the current (blocking) thread
    pub fn run(self, transcoder: &dyn VideoTranscoder) -> JobOutcome {
        let result = self.execute(transcoder);

        match &result {
            Ok(()) => debug!("Saved {} -> {:?}", self.filter, self.destination),
            Err(e) => warn!("Could not save {} -> {:?}: {}", self.filter, self.destination, e),
        }

        JobOutcome {
            index: self.index,
            filter: self.filter,
            destination: self.destination,
            result,
        }
    }

    fn execute(&self, transcoder: &dyn VideoTranscoder) -> Result<(), JobError> {
        clear_destination(&self.destination)?;

        match &self.payload {
            JobPayload::Image(raster) => {
                raster
                    .save_png(&self.destination)
                    .map_err(|source| JobError::WriteImage {
                        path: self.destination.clone(),
                        source,
                    })
            }
            JobPayload::Video { source, expression: None } => {
                std::fs::copy(source, &self.destination)
                    .map(|_| ())
                    .map_err(|e| JobError::CopyVideo {
                        path: self.destination.clone(),
                        source: e,
                    })
            }
            JobPayload::Video { source, expression: Some(expr) } => {
                transcoder.transcode(expr, source, &self.destination)?;
                if !self.destination.exists() {
                    return Err(JobError::MissingOutput {
                        path: self.destination.clone(),
                    });
                }
                Ok(())
            }
        }
    }
}

/// Remove whatever sits at `path` so the job never writes over an old file
fn clear_destination(path: &Path) -> Result<(), JobError> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(source) => Err(JobError::ClearDestination {
            path: path.to_path_buf(),
            source,
        }),
    }
}
