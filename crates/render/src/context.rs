//! Per-render drawing surface
//!
//! A [`RenderContext`] owns the pixel buffer for exactly one figure. Drawing
//! happens through [`RenderContext::draw`], and [`RenderContext::finish`]
//! encodes the result as PNG. The buffer is released when the context drops,
//! whether or not the render succeeded.

use base64::{engine::general_purpose, Engine as _};
use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder};
use plotters::coord::Shift;
use plotters::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::backend::FontSafeBackend;
use crate::error::{RenderError, Result};

/// Largest edge accepted for a figure, in pixels
const MAX_EDGE: u32 = 16_384;

/// Drawing area handed to drawing code
pub type Surface<'a> = DrawingArea<FontSafeBackend<BitMapBackend<'a>>, Shift>;

/// Figure dimensions in inches
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FigureSize {
    pub width_in: f64,
    pub height_in: f64,
}

impl FigureSize {
    pub fn new(width_in: f64, height_in: f64) -> Self {
        Self {
            width_in,
            height_in,
        }
    }

    /// Pixel dimensions at `dpi`
    pub fn pixels(&self, dpi: u32) -> (u32, u32) {
        let px = |inches: f64| (inches * dpi as f64).round().max(0.0) as u32;
        (px(self.width_in), px(self.height_in))
    }
}

/// An encoded figure
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedImage {
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub dpi: u32,
}

impl RenderedImage {
    /// Standard base64 (with padding) of the PNG bytes
    pub fn to_base64(&self) -> String {
        general_purpose::STANDARD.encode(&self.png)
    }
}

pub struct RenderContext {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
    dpi: u32,
}

impl RenderContext {
    /// Allocate a white canvas of `width` x `height` pixels
    pub fn acquire(width: u32, height: u32, dpi: u32) -> Result<Self> {
        if width == 0 || height == 0 || width > MAX_EDGE || height > MAX_EDGE {
            return Err(RenderError::InvalidSize { width, height });
        }
        debug!(width, height, dpi, "render context acquired");
        Ok(Self {
            pixels: vec![255; width as usize * height as usize * 3],
            width,
            height,
            dpi,
        })
    }

    /// Allocate a canvas for a figure measured in inches
    pub fn for_figure(size: FigureSize, dpi: u32) -> Result<Self> {
        let (width, height) = size.pixels(dpi);
        Self::acquire(width, height, dpi)
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn dpi(&self) -> u32 {
        self.dpi
    }

    /// Run drawing code against the canvas and flush it into the buffer
    pub fn draw<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&Surface<'_>) -> Result<()>,
    {
        let backend = BitMapBackend::with_buffer(&mut self.pixels, (self.width, self.height));
        let area = FontSafeBackend::new(backend).into_drawing_area();
        f(&area)?;
        area.present()?;
        Ok(())
    }

    /// Encode the canvas as PNG
    pub fn finish(self) -> Result<RenderedImage> {
        let mut png = Vec::new();
        PngEncoder::new(&mut png)
            .write_image(&self.pixels, self.width, self.height, ColorType::Rgb8)
            .map_err(|e| RenderError::Encoding(e.to_string()))?;
        Ok(RenderedImage {
            png,
            width: self.width,
            height: self.height,
            dpi: self.dpi,
        })
    }
}

impl std::fmt::Debug for RenderContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderContext")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("dpi", &self.dpi)
            .finish_non_exhaustive()
    }
}

impl Drop for RenderContext {
    fn drop(&mut self) {
        debug!(width = self.width, height = self.height, "render context released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_figure_pixels() {
        assert_eq!(FigureSize::new(12.0, 8.0).pixels(100), (1200, 800));
        assert_eq!(FigureSize::new(12.0, 6.0).pixels(50), (600, 300));
    }

    #[test]
    fn test_rejects_bad_sizes() {
        assert_matches!(
            RenderContext::acquire(0, 10, 100),
            Err(RenderError::InvalidSize { .. })
        );
        assert_matches!(
            RenderContext::acquire(10, MAX_EDGE + 1, 100),
            Err(RenderError::InvalidSize { .. })
        );
    }

    #[test]
    fn test_debug_omits_pixels() {
        let ctx = RenderContext::acquire(4, 2, 72).unwrap();
        assert_eq!(
            format!("{:?}", ctx),
            "RenderContext { width: 4, height: 2, dpi: 72, .. }"
        );
    }

    #[test]
    fn test_draw_and_encode() {
        let mut ctx = RenderContext::acquire(64, 32, 100).unwrap();
        ctx.draw(|area| {
            area.fill(&BLUE)?;
            area.draw(&Text::new("Cs-137", (4, 4), ("sans-serif", 12)))?;
            Ok(())
        })
        .unwrap();
        let image = ctx.finish().unwrap();

        assert_eq!((image.width, image.height, image.dpi), (64, 32, 100));
        assert_eq!(&image.png[..8], &PNG_SIGNATURE);
        let decoded = general_purpose::STANDARD.decode(image.to_base64()).unwrap();
        assert_eq!(decoded, image.png);
    }

    #[test]
    fn test_drawing_error_still_releases() {
        let mut ctx = RenderContext::acquire(16, 16, 100).unwrap();
        let err = ctx
            .draw(|_| Err(RenderError::drawing("boom")))
            .unwrap_err();
        assert_eq!(err, RenderError::Drawing("boom".into()));
        drop(ctx);
    }

    #[test]
    fn test_identical_draws_are_identical() {
        let render = || {
            let mut ctx = RenderContext::acquire(40, 40, 100).unwrap();
            ctx.draw(|area| {
                area.fill(&WHITE)?;
                area.draw(&Circle::new((20, 20), 10, RED.filled()))?;
                Ok(())
            })
            .unwrap();
            ctx.finish().unwrap()
        };
        assert_eq!(render(), render());
    }
}
