//! # Filter Engine
//!
//! Pure pixel kernels plus the dispatch from filter identifiers to them.
//! Every kernel reads a source [`Raster`](crate::raster::Raster) and returns
//! a freshly allocated one; no kernel touches the filesystem or spawns work.
//!
//! ## Built-in Filters
//!
//! - **grayscale**: Rec.601 luma, single intensity channel
//! - **sepia**: classic brown channel mix
//! - **negative**: `255 - c` per channel
//! - **posterize**: 12-level LUT, optional Floyd–Steinberg dither
//! - **solarize**: hard inversion above luma 128
//! - **cold** / **warm**: color temperature push
//! - **vintage**: desaturation, tone, contrast, vignette and grain
//!
//! ## Usage
//!
//! ```rust
//! use snapfilter::filters::{FilterId, FilterRegistry};
//! use snapfilter::raster::Raster;
//!
//! let registry = FilterRegistry::new();
//! let source = Raster::filled(4, 4, [200, 120, 40, 255]);
//! let sepia = registry.apply(&FilterId::parse("sepia"), &source);
//! assert_eq!(sepia.width(), 4);
//! ```

pub mod id;
pub mod pixel;
pub mod registry;
pub mod traits;
pub mod video;

// Kernel implementations
pub mod posterize;
pub mod solarize;
pub mod temperature;
pub mod tone;
pub mod vintage;

pub use id::{FilterId, FilterSelection};
pub use registry::{FilterRegistry, KernelSettings};
pub use traits::{Kernel, KernelMetadata};
pub use video::video_expression;

pub use posterize::{posterize, quantization_lut, Posterize};
pub use solarize::{solarize, Solarize};
pub use temperature::{cold, warm, Cold, Warm};
pub use tone::{grayscale, negative, sepia, Grayscale, Negative, Sepia};
pub use vintage::{vintage, Vintage};
