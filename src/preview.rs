//! Still preview of a single filter.

use image::imageops::FilterType;
use tracing::debug;

use crate::config::PreviewConfig;
use crate::filters::{FilterId, FilterRegistry};
use crate::raster::Raster;

/// Largest size with the same aspect ratio that fits inside the bounds
///
/// Sizes already inside the bounds are returned unchanged.
pub fn fit_within(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    let (max_width, max_height) = (max_width.max(1), max_height.max(1));
    if width <= max_width && height <= max_height {
        return (width, height);
    }

    let scale = f64::min(
        max_width as f64 / width as f64,
        max_height as f64 / height as f64,
    );
    let fitted_width = ((width as f64 * scale).round() as u32).clamp(1, max_width);
    let fitted_height = ((height as f64 * scale).round() as u32).clamp(1, max_height);
    (fitted_width, fitted_height)
}

/// Apply `filter` to `source` and shrink the result for display
pub fn preview(
    registry: &FilterRegistry,
    source: &Raster,
    filter: &FilterId,
    max_width: u32,
    max_height: u32,
) -> Raster {
    let filtered = registry.apply(filter, source);
    if filtered.is_empty() {
        return filtered;
    }

    let (width, height) = fit_within(filtered.width(), filtered.height(), max_width, max_height);
    if (width, height) == (filtered.width(), filtered.height()) {
        return filtered;
    }

    debug!(
        "Scaling {} preview {}x{} -> {}x{}",
        filter,
        filtered.width(),
        filtered.height(),
        width,
        height
    );
    // Lanczos3 keeps edges crisp when shrinking
    let scaled = filtered
        .to_dynamic()
        .resize_exact(width, height, FilterType::Lanczos3);
    Raster::from_dynamic(scaled)
}

/// [`preview`] bounded by the configured size
pub fn preview_with_config(
    registry: &FilterRegistry,
    source: &Raster,
    filter: &FilterId,
    config: &PreviewConfig,
) -> Raster {
    preview(registry, source, filter, config.max_width, config.max_height)
}
