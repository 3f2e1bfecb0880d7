//! # Snapfilter
//!
//! Apply named filters to captured photos and recorded videos, then export
//! one file per filter concurrently.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use snapfilter::{
//!     config::Config,
//!     export::{ExportEngine, ExportSource},
//!     filters::FilterSelection,
//!     raster::Raster,
//! };
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let config = Config::default();
//! let engine = ExportEngine::new(&config);
//!
//! let photo = Raster::open("capture.jpg")?;
//! let selection: FilterSelection = "sepia,vintage,bw".parse()?;
//!
//! let batch = engine
//!     .export(ExportSource::Image(&photo), &selection, Path::new("exports"))
//!     .await?;
//! println!("{}", batch.wait().await.status());
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`raster`] - In-memory 8-bit images
//! - [`filters`] - Pixel kernels, filter identifiers and their registry
//! - [`naming`] - Batch timestamps and output file names
//! - [`export`] - Concurrent batch export and video transcoding
//! - [`preview`] - Scaled single-filter previews
//! - [`config`] - Configuration management
//!
//! ## Custom Kernels
//!
//! Register your own kernel under a new identifier by implementing the
//! [`Kernel`](filters::Kernel) trait:
//!
//! ```rust
//! use snapfilter::filters::{FilterId, FilterRegistry, Kernel};
//! use snapfilter::raster::Raster;
//!
//! struct Identity;
//!
//! impl Kernel for Identity {
//!     fn name(&self) -> &str {
//!         "identity"
//!     }
//!
//!     fn description(&self) -> &str {
//!         "Returns the source untouched"
//!     }
//!
//!     fn apply(&self, source: &Raster) -> Raster {
//!         source.clone()
//!     }
//! }
//!
//! let mut registry = FilterRegistry::new();
//! registry.register(FilterId::parse("identity"), Identity);
//! assert!(registry.has_kernel(&FilterId::parse("identity")));
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod filters;
pub mod naming;
pub mod preview;
pub mod raster;

// Re-export commonly used types for convenience
pub use crate::{
    config::Config,
    error::{Result, SnapfilterError},
    export::{BatchStatus, ExportEngine, ExportSource},
    filters::{FilterId, FilterRegistry, FilterSelection, Kernel},
    raster::Raster,
};
