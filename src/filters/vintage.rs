//! Vintage look: desaturation, warm tone, contrast, vignette and grain.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::pixel::{luma, map_rgb, push_channel};
use super::traits::{Kernel, KernelMetadata};
use crate::raster::Raster;

// Vintage-specific parameter names
pub const INTENSITY: &str = "intensity";
pub const VIGNETTE: &str = "vignette";
pub const GRAIN: &str = "grain";
pub const CONTRAST: &str = "contrast";
pub const SEED: &str = "seed";

/// Tone push at full tone amount, same convention as the temperature kernels
const TONE_SHIFT: [f32; 3] = [0.30, 0.12, -0.20];

/// Vintage kernel parameters
///
/// With `seed: None` every call draws fresh grain, so two runs over the same
/// input differ. A fixed seed makes the output reproducible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vintage {
    pub intensity: f32,
    pub vignette: f32,
    pub grain: f32,
    pub contrast: f32,
    pub seed: Option<u64>,
}

impl Default for Vintage {
    fn default() -> Self {
        Self {
            intensity: 0.8,
            vignette: 0.6,
            grain: 0.04,
            contrast: 0.15,
            seed: None,
        }
    }
}

impl Vintage {
    /// Same parameters, reproducible grain
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    fn is_noop(&self) -> bool {
        self.intensity <= 0.0
            && self.vignette <= 0.0
            && self.grain <= 0.0
            && self.contrast.abs() < 1e-6
    }
}

pub fn vintage(source: &Raster, params: &Vintage) -> Raster {
    if source.is_empty() || params.is_noop() {
        return source.clone();
    }

    let mut rng = match params.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };

    let cx = source.width() as f32 * 0.5;
    let cy = source.height() as f32 * 0.5;
    let max_dist = (cx * cx + cy * cy).sqrt();

    let desaturate = 0.25 * params.intensity;
    let tone = 0.25 * params.intensity;
    let contrast = 1.0 + params.contrast * 0.6;
    let vignette = params.vignette * params.intensity;
    let grain = params.grain * 255.0;

    map_rgb(source, |x, y, rgb| {
        let lum = luma(rgb[0], rgb[1], rgb[2]);
        let mut out = [0f32; 3];

        for c in 0..3 {
            let v = rgb[c] * (1.0 - desaturate) + lum * desaturate;
            let v = push_channel(v, TONE_SHIFT[c] * tone);
            out[c] = (v - 128.0) * contrast + 128.0;
        }

        if vignette > 0.0 {
            let dx = x as f32 - cx;
            let dy = y as f32 - cy;
            let t = (dx * dx + dy * dy).sqrt() / max_dist;
            let falloff = (1.0 - vignette * t * t).max(0.0);
            out.iter_mut().for_each(|v| *v *= falloff);
        }

        if grain > 0.0 {
            let noise = rng.gen_range(-1.0f32..1.0) * grain;
            out.iter_mut().for_each(|v| *v += noise);
        }

        out
    })
}

impl Kernel for Vintage {
    fn name(&self) -> &str {
        "vintage"
    }

    fn description(&self) -> &str {
        "Faded warm print with vignette and film grain"
    }

    fn apply(&self, source: &Raster) -> Raster {
        vintage(source, self)
    }

    fn metadata(&self) -> KernelMetadata {
        KernelMetadata {
            deterministic: self.seed.is_some(),
            performance_impact: 0.4,
            parameters: vec![
                (INTENSITY.to_string(), "Overall strength (0.0-1.0)".to_string()),
                (VIGNETTE.to_string(), "Corner darkening (0.0-1.0)".to_string()),
                (GRAIN.to_string(), "Grain amplitude as a fraction of 255".to_string()),
                (CONTRAST.to_string(), "Contrast boost around mid gray".to_string()),
                (SEED.to_string(), "Fixed grain seed; random when unset".to_string()),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photo() -> Raster {
        Raster::from_fn(32, 24, |x, y| [(x * 8) as u8, (y * 10) as u8, 128, 200])
    }

    #[test]
    fn test_output_in_range_and_alpha_kept() {
        for source in [
            Raster::filled(16, 16, [0, 0, 0, 255]),
            Raster::filled(16, 16, [255, 255, 255, 31]),
            photo(),
        ] {
            let output = vintage(&source, &Vintage::default());
            assert_eq!(output.width(), source.width());
            assert_eq!(output.height(), source.height());
            for (out, src) in output.rgba().pixels().zip(source.rgba().pixels()) {
                assert_eq!(out[3], src[3]);
            }
        }
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let params = Vintage::default().with_seed(42);
        let source = photo();

        assert_eq!(vintage(&source, &params), vintage(&source, &params));
    }

    #[test]
    fn test_different_seeds_differ() {
        let source = photo();
        let a = vintage(&source, &Vintage::default().with_seed(1));
        let b = vintage(&source, &Vintage::default().with_seed(2));

        assert_ne!(a, b);
    }

    #[test]
    fn test_all_zero_strength_is_identity() {
        let params = Vintage {
            intensity: 0.0,
            vignette: 0.0,
            grain: 0.0,
            contrast: 0.0,
            seed: None,
        };
        let source = photo();

        assert_eq!(vintage(&source, &params), source);
    }

    #[test]
    fn test_vignette_darkens_corners() {
        let params = Vintage {
            intensity: 1.0,
            vignette: 1.0,
            grain: 0.0,
            contrast: 0.0,
            seed: None,
        };
        let output = vintage(&Raster::filled(41, 41, [200, 200, 200, 255]), &params);

        let center = output.pixel(20, 20);
        let corner = output.pixel(0, 0);
        assert!(corner[0] < center[0]);
        assert!(corner[1] < center[1]);
        assert!(corner[2] < center[2]);
    }

    #[test]
    fn test_metadata_tracks_seed() {
        assert!(!Vintage::default().metadata().deterministic);
        assert!(Vintage::default().with_seed(7).metadata().deterministic);
    }
}
