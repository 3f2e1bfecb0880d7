use std::borrow::Cow;
use std::path::Path;

use image::{DynamicImage, GrayAlphaImage, ImageBuffer, ImageFormat, Rgba, RgbaImage};

use crate::error::Result;

/// An 8-bit raster, either RGBA or gray with alpha
///
/// Kernels take a `&Raster` and always return a new one, so a single capture
/// can be shared read-only by every job of a batch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    pixels: Pixels,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Pixels {
    Rgba(RgbaImage),
    GrayAlpha(GrayAlphaImage),
}

impl Raster {
    /// Create a raster from an RGBA buffer
    pub fn new(buffer: RgbaImage) -> Self {
        Self {
            pixels: Pixels::Rgba(buffer),
        }
    }

    /// Create a single-intensity raster from a gray+alpha buffer
    pub fn from_gray_alpha(buffer: GrayAlphaImage) -> Self {
        Self {
            pixels: Pixels::GrayAlpha(buffer),
        }
    }

    /// Create a raster with every pixel set to `color`
    pub fn filled(width: u32, height: u32, color: [u8; 4]) -> Self {
        Self::new(ImageBuffer::from_pixel(width, height, Rgba(color)))
    }

    /// Create a raster from a per-pixel function
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Self
    where
        F: FnMut(u32, u32) -> [u8; 4],
    {
        Self::new(ImageBuffer::from_fn(width, height, |x, y| Rgba(f(x, y))))
    }

    /// Wrap any decoded image; gray sources stay single-intensity
    pub fn from_dynamic(image: DynamicImage) -> Self {
        match image {
            DynamicImage::ImageLuma8(_) | DynamicImage::ImageLumaA8(_) => {
                Self::from_gray_alpha(image.to_luma_alpha8())
            }
            DynamicImage::ImageRgba8(buffer) => Self::new(buffer),
            other => Self::new(other.to_rgba8()),
        }
    }

    /// Decode an image file from disk
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::from_dynamic(image::open(path)?))
    }

    pub fn width(&self) -> u32 {
        match &self.pixels {
            Pixels::Rgba(buffer) => buffer.width(),
            Pixels::GrayAlpha(buffer) => buffer.width(),
        }
    }

    pub fn height(&self) -> u32 {
        match &self.pixels {
            Pixels::Rgba(buffer) => buffer.height(),
            Pixels::GrayAlpha(buffer) => buffer.height(),
        }
    }

    /// A raster with no pixels at all
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    pub fn is_grayscale(&self) -> bool {
        matches!(self.pixels, Pixels::GrayAlpha(_))
    }

    /// Get a pixel as RGBA; gray pixels are expanded
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        match &self.pixels {
            Pixels::Rgba(buffer) => buffer.get_pixel(x, y).0,
            Pixels::GrayAlpha(buffer) => {
                let [l, a] = buffer.get_pixel(x, y).0;
                [l, l, l, a]
            }
        }
    }

    /// Borrow the RGBA view, converting gray rasters on the fly
    pub fn rgba(&self) -> Cow<'_, RgbaImage> {
        match &self.pixels {
            Pixels::Rgba(buffer) => Cow::Borrowed(buffer),
            Pixels::GrayAlpha(buffer) => {
                Cow::Owned(DynamicImage::ImageLumaA8(buffer.clone()).to_rgba8())
            }
        }
    }

    pub fn to_rgba8(&self) -> RgbaImage {
        self.rgba().into_owned()
    }

    /// Get the underlying image as a `DynamicImage`
    pub fn to_dynamic(&self) -> DynamicImage {
        match &self.pixels {
            Pixels::Rgba(buffer) => DynamicImage::ImageRgba8(buffer.clone()),
            Pixels::GrayAlpha(buffer) => DynamicImage::ImageLumaA8(buffer.clone()),
        }
    }

    /// Save the raster as an RGBA PNG file
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> std::result::Result<(), image::ImageError> {
        self.rgba().save_with_format(path, ImageFormat::Png)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::LumaA;
    use tempfile::tempdir;

    #[test]
    fn test_gray_pixels_expand_to_rgba() {
        let raster = Raster::from_gray_alpha(ImageBuffer::from_pixel(2, 2, LumaA([90, 200])));

        assert!(raster.is_grayscale());
        assert_eq!(raster.pixel(1, 1), [90, 90, 90, 200]);
        assert_eq!(raster.rgba().get_pixel(0, 0).0, [90, 90, 90, 200]);
    }

    #[test]
    fn test_zero_sized_raster_is_empty() {
        assert!(Raster::filled(0, 10, [0, 0, 0, 255]).is_empty());
        assert!(Raster::filled(10, 0, [0, 0, 0, 255]).is_empty());
        assert!(!Raster::filled(1, 1, [0, 0, 0, 255]).is_empty());
    }

    #[test]
    fn test_png_roundtrip_keeps_alpha() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("frame.png");
        let raster = Raster::from_fn(4, 3, |x, y| [x as u8 * 60, y as u8 * 80, 10, 128]);

        raster.save_png(&path).unwrap();
        let loaded = Raster::open(&path).unwrap();

        assert_eq!(loaded, raster);
    }
}
