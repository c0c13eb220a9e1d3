//! Palette-indexed image codec
//!
//! Textures embedded in ROI blobs are stored as a small RGB color table
//! followed by one palette index per pixel. Pixels are row-major with
//! addressing `x + y * width`; that convention carries through to the raster
//! conversion unchanged, otherwise images come out transposed.

use image::RgbImage;

use crate::error::{Result, WdbError};
use crate::reader::Cursor;

/// One palette entry, a byte per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RgbColor {
    /// Red channel
    pub red: u8,
    /// Green channel
    pub green: u8,
    /// Blue channel
    pub blue: u8,
}

/// A decoded palette-indexed image
///
/// Invariants, checked at parse time: `pixels.len() == width * height` and
/// every pixel index is `< palette.len()`.
#[derive(Debug, Clone, PartialEq)]
pub struct LegoImage {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// The color table
    pub palette: Vec<RgbColor>,
    /// Flat row-major palette indices, `x + y * width`
    pub pixels: Vec<u8>,
}

impl LegoImage {
    /// Decode an image from the cursor's current position
    pub fn parse(cursor: &mut Cursor<'_>) -> Result<Self> {
        let width = cursor.read_u32_le().map_err(|e| e.with_context("Width"))?;
        let height = cursor.read_u32_le().map_err(|e| e.with_context("Height"))?;
        let color_count = cursor
            .read_u32_le()
            .map_err(|e| e.with_context("ColorCount"))?;

        let mut palette = Vec::new();
        for _ in 0..color_count {
            let red = cursor.read_u8().map_err(|e| e.with_context("Palette"))?;
            let green = cursor.read_u8().map_err(|e| e.with_context("Palette"))?;
            let blue = cursor.read_u8().map_err(|e| e.with_context("Palette"))?;
            palette.push(RgbColor { red, green, blue });
        }

        let pixel_count = width as usize * height as usize;
        let pixels = cursor
            .read_bytes(pixel_count)
            .map_err(|e| e.with_context("Pixels"))?;

        for &index in &pixels {
            if index as usize >= palette.len() {
                return Err(WdbError::PaletteIndexOutOfRange {
                    index,
                    color_count: palette.len(),
                });
            }
        }

        Ok(Self {
            width,
            height,
            palette,
            pixels,
        })
    }

    /// Number of colors in the palette
    pub fn color_count(&self) -> usize {
        self.palette.len()
    }

    /// Convert the image into an RGB raster by expanding every index
    /// through the palette
    pub fn to_rgb_image(&self) -> Result<RgbImage> {
        let expected = self.width as usize * self.height as usize;
        if self.pixels.len() != expected {
            return Err(WdbError::PixelCountMismatch {
                expected,
                actual: self.pixels.len(),
            });
        }

        let mut raw = Vec::with_capacity(expected * 3);
        for y in 0..self.height {
            for x in 0..self.width {
                let index = self.pixels[(x + y * self.width) as usize];
                let color = self.palette.get(index as usize).ok_or(
                    WdbError::PaletteIndexOutOfRange {
                        index,
                        color_count: self.palette.len(),
                    },
                )?;
                raw.extend_from_slice(&[color.red, color.green, color.blue]);
            }
        }

        RgbImage::from_raw(self.width, self.height, raw).ok_or(WdbError::PixelCountMismatch {
            expected,
            actual: self.pixels.len(),
        })
    }

    /// Serialize the image back into its wire layout
    ///
    /// Round-trip companion to [`LegoImage::parse`]; re-encoding is not part
    /// of the export pipeline.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let expected = self.width as usize * self.height as usize;
        if self.pixels.len() != expected {
            return Err(WdbError::PixelCountMismatch {
                expected,
                actual: self.pixels.len(),
            });
        }

        let mut out = Vec::with_capacity(12 + self.palette.len() * 3 + self.pixels.len());
        out.extend_from_slice(&self.width.to_le_bytes());
        out.extend_from_slice(&self.height.to_le_bytes());
        out.extend_from_slice(&(self.palette.len() as u32).to_le_bytes());
        for color in &self.palette {
            out.extend_from_slice(&[color.red, color.green, color.blue]);
        }
        out.extend_from_slice(&self.pixels);
        Ok(out)
    }
}
