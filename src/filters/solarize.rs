//! Hard solarization above a luma threshold.

use super::pixel::{luma, map_rgb, to_channel};
use super::traits::{Kernel, KernelMetadata};
use crate::raster::Raster;

pub const DEFAULT_THRESHOLD: u8 = 128;

/// Replace every channel of pixels brighter than `threshold` with
/// `255 - 3 * channel`
///
/// Luma is compared as an 8-bit value. The result is only clamped at the
/// output stage, so bright pixels collapse hard toward black. Pixels at or
/// below the threshold are copied as is.
pub fn solarize(source: &Raster, threshold: u8) -> Raster {
    if source.is_empty() {
        return source.clone();
    }

    map_rgb(source, |_, _, [r, g, b]| {
        if to_channel(luma(r, g, b)) > threshold {
            [255.0 - 3.0 * r, 255.0 - 3.0 * g, 255.0 - 3.0 * b]
        } else {
            [r, g, b]
        }
    })
}

#[derive(Debug, Clone, Copy)]
pub struct Solarize {
    pub threshold: u8,
}

impl Default for Solarize {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl Kernel for Solarize {
    fn name(&self) -> &str {
        "solarize"
    }

    fn description(&self) -> &str {
        "Hard inversion of the highlights"
    }

    fn apply(&self, source: &Raster) -> Raster {
        solarize(source, self.threshold)
    }

    fn metadata(&self) -> KernelMetadata {
        KernelMetadata {
            parameters: vec![(
                "threshold".to_string(),
                "Luma above which pixels are inverted (0-255)".to_string(),
            )],
            ..KernelMetadata::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Left half dark, right half bright
    fn split_image() -> Raster {
        Raster::from_fn(8, 4, |x, y| {
            if x < 4 {
                [20 + y as u8, 128, 60, 255]
            } else {
                [220, 200 + y as u8, 180, 128]
            }
        })
    }

    #[test]
    fn test_dark_half_untouched() {
        let source = split_image();
        let output = solarize(&source, DEFAULT_THRESHOLD);

        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(output.pixel(x, y), source.pixel(x, y));
            }
        }
    }

    #[test]
    fn test_bright_half_collapses_to_black() {
        let output = solarize(&split_image(), DEFAULT_THRESHOLD);

        for y in 0..4 {
            for x in 4..8 {
                assert_eq!(output.pixel(x, y), [0, 0, 0, 128]);
            }
        }
    }

    #[test]
    fn test_negative_intermediate_values_floor_at_zero() {
        // luma = 44.85 + 117.4 + 6.84 = 169.09, above threshold
        let output = solarize(&Raster::filled(1, 1, [150, 200, 60, 255]), DEFAULT_THRESHOLD);
        assert_eq!(output.pixel(0, 0), [0, 0, 75, 255]);
    }

    #[test]
    fn test_pixel_at_threshold_untouched() {
        let source = Raster::filled(1, 1, [128, 128, 128, 255]);
        assert_eq!(solarize(&source, 128), source);
    }
}
