//! Fixed channel remaps: grayscale, negative and sepia.

use image::{GrayAlphaImage, LumaA};

use super::pixel::{luma, map_rgb, to_channel};
use super::traits::Kernel;
use crate::raster::Raster;

const SEPIA_MATRIX: [[f32; 3]; 3] = [
    [0.393, 0.769, 0.189],
    [0.349, 0.686, 0.168],
    [0.272, 0.534, 0.131],
];

/// Convert to single-intensity luma, keeping alpha
pub fn grayscale(source: &Raster) -> Raster {
    if source.is_empty() {
        return source.clone();
    }

    let rgba = source.rgba();
    let output = GrayAlphaImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        LumaA([to_channel(luma(r as f32, g as f32, b as f32)), a])
    });
    Raster::from_gray_alpha(output)
}

/// Invert every color channel, keeping alpha
pub fn negative(source: &Raster) -> Raster {
    if source.is_empty() {
        return source.clone();
    }
    map_rgb(source, |_, _, [r, g, b]| [255.0 - r, 255.0 - g, 255.0 - b])
}

/// Classic sepia channel mix
pub fn sepia(source: &Raster) -> Raster {
    if source.is_empty() {
        return source.clone();
    }
    map_rgb(source, |_, _, rgb| {
        let mix = |row: [f32; 3]| row[0] * rgb[0] + row[1] * rgb[1] + row[2] * rgb[2];
        [
            mix(SEPIA_MATRIX[0]),
            mix(SEPIA_MATRIX[1]),
            mix(SEPIA_MATRIX[2]),
        ]
    })
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Grayscale;

impl Kernel for Grayscale {
    fn name(&self) -> &str {
        "grayscale"
    }

    fn description(&self) -> &str {
        "Black and white luma conversion"
    }

    fn apply(&self, source: &Raster) -> Raster {
        grayscale(source)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Negative;

impl Kernel for Negative {
    fn name(&self) -> &str {
        "negative"
    }

    fn description(&self) -> &str {
        "Photographic negative"
    }

    fn apply(&self, source: &Raster) -> Raster {
        negative(source)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Sepia;

impl Kernel for Sepia {
    fn name(&self) -> &str {
        "sepia"
    }

    fn description(&self) -> &str {
        "Brown-toned sepia channel mix"
    }

    fn apply(&self, source: &Raster) -> Raster {
        sepia(source)
    }
}
