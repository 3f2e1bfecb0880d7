//! Warm and cold color-temperature shifts.

use super::pixel::{map_rgb, push_channel};
use super::traits::{Kernel, KernelMetadata};
use crate::raster::Raster;

pub const DEFAULT_INTENSITY: f32 = 0.6;

/// Per-channel push at full intensity: positive toward 255, negative toward 0
const WARM_SHIFT: [f32; 3] = [0.45, 0.20, -0.25];
const COLD_SHIFT: [f32; 3] = [-0.30, 0.12, 0.45];

fn shift(source: &Raster, amounts: [f32; 3], intensity: f32) -> Raster {
    if source.is_empty() || intensity <= 0.0 || intensity.is_nan() {
        return source.clone();
    }

    let intensity = intensity.min(1.0);
    map_rgb(source, |_, _, [r, g, b]| {
        [
            push_channel(r, amounts[0] * intensity),
            push_channel(g, amounts[1] * intensity),
            push_channel(b, amounts[2] * intensity),
        ]
    })
}

/// Push red and green up, pull blue down
pub fn warm(source: &Raster, intensity: f32) -> Raster {
    shift(source, WARM_SHIFT, intensity)
}

/// Push blue and green up, pull red down
pub fn cold(source: &Raster, intensity: f32) -> Raster {
    shift(source, COLD_SHIFT, intensity)
}

#[derive(Debug, Clone, Copy)]
pub struct Warm {
    pub intensity: f32,
}

impl Default for Warm {
    fn default() -> Self {
        Self {
            intensity: DEFAULT_INTENSITY,
        }
    }
}

impl Kernel for Warm {
    fn name(&self) -> &str {
        "warm"
    }

    fn description(&self) -> &str {
        "Warm, red-leaning color temperature"
    }

    fn apply(&self, source: &Raster) -> Raster {
        warm(source, self.intensity)
    }

    fn metadata(&self) -> KernelMetadata {
        KernelMetadata {
            parameters: vec![("intensity".to_string(), "Shift strength (0.0-1.0)".to_string())],
            ..KernelMetadata::default()
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Cold {
    pub intensity: f32,
}

impl Default for Cold {
    fn default() -> Self {
        Self {
            intensity: DEFAULT_INTENSITY,
        }
    }
}

impl Kernel for Cold {
    fn name(&self) -> &str {
        "cold"
    }

    fn description(&self) -> &str {
        "Cold, blue-leaning color temperature"
    }

    fn apply(&self, source: &Raster) -> Raster {
        cold(source, self.intensity)
    }

    fn metadata(&self) -> KernelMetadata {
        KernelMetadata {
            parameters: vec![("intensity".to_string(), "Shift strength (0.0-1.0)".to_string())],
            ..KernelMetadata::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warm_on_black_and_white() {
        let black = warm(&Raster::filled(2, 2, [0, 0, 0, 255]), DEFAULT_INTENSITY);
        let white = warm(&Raster::filled(2, 2, [255, 255, 255, 255]), DEFAULT_INTENSITY);

        // 255 * 0.27 = 68.85, 255 * 0.12 = 30.6, 255 * 0.85 = 216.75
        assert_eq!(black.pixel(0, 0), [69, 31, 0, 255]);
        assert_eq!(white.pixel(1, 1), [255, 255, 217, 255]);
    }

    #[test]
    fn test_cold_on_black_and_white() {
        let black = cold(&Raster::filled(2, 2, [0, 0, 0, 255]), DEFAULT_INTENSITY);
        let white = cold(&Raster::filled(2, 2, [255, 255, 255, 255]), DEFAULT_INTENSITY);

        // 255 * 0.072 = 18.36, 255 * 0.27 = 68.85, 255 * 0.82 = 209.1
        assert_eq!(black.pixel(0, 0), [0, 18, 69, 255]);
        assert_eq!(white.pixel(1, 1), [209, 255, 255, 255]);
    }

    #[test]
    fn test_intensity_is_clamped_to_one() {
        let source = Raster::from_fn(4, 4, |x, y| [x as u8 * 60, y as u8 * 60, 128, 255]);

        assert_eq!(warm(&source, 7.5), warm(&source, 1.0));
        assert_eq!(cold(&source, 3.0), cold(&source, 1.0));
    }

    #[test]
    fn test_zero_intensity_returns_source() {
        let source = Raster::filled(3, 3, [10, 20, 30, 40]);

        assert_eq!(warm(&source, 0.0), source);
        assert_eq!(cold(&source, -1.0), source);
    }

    #[test]
    fn test_gray_input_becomes_rgba() {
        let gray = crate::filters::grayscale(&Raster::filled(1, 1, [90, 90, 90, 255]));
        let warmed = warm(&gray, 1.0);

        assert!(!warmed.is_grayscale());
        assert!(warmed.pixel(0, 0)[0] > warmed.pixel(0, 0)[2]);
    }
}
