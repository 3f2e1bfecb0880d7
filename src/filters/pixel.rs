//! Shared per-pixel helpers for the kernels.

use image::{Rgba, RgbaImage};

use crate::raster::Raster;

/// Round to nearest, then clamp into an 8-bit channel
#[inline]
pub fn to_channel(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Rec.601 luma of an RGB triple
#[inline]
pub fn luma(r: f32, g: f32, b: f32) -> f32 {
    0.299 * r + 0.587 * g + 0.114 * b
}

/// Move a channel a fraction of the way toward 255 (positive `amount`)
/// or toward 0 (negative `amount`)
#[inline]
pub fn push_channel(value: f32, amount: f32) -> f32 {
    if amount >= 0.0 {
        value + (255.0 - value) * amount
    } else {
        value * (1.0 + amount)
    }
}

/// Build a new RGBA raster by mapping the color channels of every source
/// pixel in row-major order. Alpha is copied through untouched.
pub(crate) fn map_rgb<F>(source: &Raster, mut f: F) -> Raster
where
    F: FnMut(u32, u32, [f32; 3]) -> [f32; 3],
{
    let rgba = source.rgba();
    let output = RgbaImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        let [nr, ng, nb] = f(x, y, [r as f32, g as f32, b as f32]);
        Rgba([to_channel(nr), to_channel(ng), to_channel(nb), a])
    });
    Raster::new(output)
}
