//! Posterization with an optional Floyd–Steinberg dither.

use image::{Rgba, RgbaImage};

use super::pixel::to_channel;
use super::traits::{Kernel, KernelMetadata};
use crate::raster::Raster;

pub const DEFAULT_LEVELS: u32 = 12;

/// (dx, dy, weight) of the Floyd–Steinberg error kernel
const DIFFUSION: [(i64, i64, f32); 4] = [
    (1, 0, 7.0 / 16.0),
    (-1, 1, 3.0 / 16.0),
    (0, 1, 5.0 / 16.0),
    (1, 1, 1.0 / 16.0),
];

/// Build the 256-entry quantization table for `levels` output levels
///
/// Fewer than two levels is treated as two.
pub fn quantization_lut(levels: u32) -> [u8; 256] {
    let steps = (levels.max(2) - 1) as f32;
    let mut lut = [0u8; 256];
    for (value, slot) in lut.iter_mut().enumerate() {
        let index = (value as f32 * steps / 255.0).round();
        *slot = to_channel(index * 255.0 / steps);
    }
    lut
}

/// Quantize every color channel to `levels` evenly spaced values
pub fn posterize(source: &Raster, levels: u32, dither: bool) -> Raster {
    if source.is_empty() {
        return source.clone();
    }

    let lut = quantization_lut(levels);
    if dither {
        return diffuse(source, &lut);
    }

    let rgba = source.rgba();
    let output = RgbaImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        Rgba([lut[r as usize], lut[g as usize], lut[b as usize], a])
    });
    Raster::new(output)
}

/// Error diffusion over a float copy of the source, strictly row-major
fn diffuse(source: &Raster, lut: &[u8; 256]) -> Raster {
    let rgba = source.rgba();
    let (width, height) = rgba.dimensions();
    let (w, h) = (width as i64, height as i64);

    let mut buffer: Vec<[f32; 3]> = rgba
        .pixels()
        .map(|p| [p[0] as f32, p[1] as f32, p[2] as f32])
        .collect();
    let mut output = RgbaImage::new(width, height);

    for y in 0..h {
        for x in 0..w {
            let current = buffer[(y * w + x) as usize];
            let mut quantized = [0u8; 3];
            let mut error = [0f32; 3];

            for c in 0..3 {
                let old = to_channel(current[c]);
                quantized[c] = lut[old as usize];
                error[c] = old as f32 - quantized[c] as f32;
            }

            let alpha = rgba.get_pixel(x as u32, y as u32)[3];
            output.put_pixel(
                x as u32,
                y as u32,
                Rgba([quantized[0], quantized[1], quantized[2], alpha]),
            );

            for &(dx, dy, weight) in DIFFUSION.iter() {
                let (nx, ny) = (x + dx, y + dy);
                if nx < 0 || nx >= w || ny >= h {
                    continue;
                }
                let neighbor = &mut buffer[(ny * w + nx) as usize];
                for c in 0..3 {
                    neighbor[c] += error[c] * weight;
                }
            }
        }
    }

    Raster::new(output)
}

/// Posterize kernel with its internal defaults
#[derive(Debug, Clone, Copy)]
pub struct Posterize {
    pub levels: u32,
    pub dither: bool,
}

impl Default for Posterize {
    fn default() -> Self {
        Self {
            levels: DEFAULT_LEVELS,
            dither: false,
        }
    }
}

impl Kernel for Posterize {
    fn name(&self) -> &str {
        "posterize"
    }

    fn description(&self) -> &str {
        "Flat color bands from a reduced number of levels per channel"
    }

    fn apply(&self, source: &Raster) -> Raster {
        posterize(source, self.levels, self.dither)
    }

    fn metadata(&self) -> KernelMetadata {
        KernelMetadata {
            deterministic: true,
            performance_impact: if self.dither { 0.4 } else { 0.1 },
            parameters: vec![
                ("levels".to_string(), "Output levels per channel (>= 2)".to_string()),
                ("dither".to_string(), "Floyd-Steinberg error diffusion".to_string()),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn codomain(levels: u32) -> BTreeSet<u8> {
        quantization_lut(levels).iter().copied().collect()
    }

    fn channel_values(raster: &Raster) -> BTreeSet<u8> {
        raster
            .rgba()
            .pixels()
            .flat_map(|p| [p[0], p[1], p[2]])
            .collect()
    }

    /// Horizontal ramp over the full 0..=255 range
    fn ramp() -> Raster {
        Raster::from_fn(256, 6, |x, y| [x as u8, 255 - x as u8, (x as u8).wrapping_add(y as u8 * 40), 255])
    }

    #[test]
    fn test_lut_has_exact_levels() {
        let values = codomain(12);

        assert_eq!(values.len(), 12);
        assert_eq!(values.first(), Some(&0));
        assert_eq!(values.last(), Some(&255));
    }

    #[test]
    fn test_lut_is_evenly_spaced() {
        let values: Vec<u8> = codomain(4).into_iter().collect();
        assert_eq!(values, vec![0, 85, 170, 255]);
    }

    #[test]
    fn test_levels_below_two_behave_as_two() {
        assert_eq!(quantization_lut(0), quantization_lut(2));
        assert_eq!(quantization_lut(1), quantization_lut(2));
        assert_eq!(codomain(1).into_iter().collect::<Vec<_>>(), vec![0, 255]);
    }

    #[test]
    fn test_plain_output_stays_in_codomain() {
        let output = posterize(&ramp(), DEFAULT_LEVELS, false);
        let allowed = codomain(DEFAULT_LEVELS);

        assert!(channel_values(&output).is_subset(&allowed));
        assert_eq!(channel_values(&output), allowed);
    }

    #[test]
    fn test_dithered_output_stays_in_codomain() {
        let output = posterize(&ramp(), DEFAULT_LEVELS, true);

        assert!(channel_values(&output).is_subset(&codomain(DEFAULT_LEVELS)));
    }

    #[test]
    fn test_dither_changes_spatial_distribution() {
        let source = ramp();
        let plain = posterize(&source, 2, false);
        let dithered = posterize(&source, 2, true);

        assert_ne!(plain, dithered);
        assert!(channel_values(&dithered).is_subset(&codomain(2)));
    }

    #[test]
    fn test_dither_is_deterministic() {
        let source = ramp();
        assert_eq!(posterize(&source, 5, true), posterize(&source, 5, true));
    }

    #[test]
    fn test_alpha_preserved_by_both_variants() {
        let source = Raster::filled(5, 5, [120, 30, 200, 17]);

        for dither in [false, true] {
            let output = posterize(&source, 3, dither);
            assert!(output.rgba().pixels().all(|p| p[3] == 17));
        }
    }
}
