//! Rendering primitives: fonts and measurement, text layout, paint, raster

pub mod font;
pub mod layout;
pub mod paint;
pub mod raster;

pub use font::{measure, BlockFace, Face, Font, InkBounds, TrueTypeFace};
pub use layout::{layout_lines, shorten, wrap, Align, TextLayout, TextStyle, ELLIPSIS};

use std::io::Cursor;

use image::{ImageFormat, RgbImage};

use crate::{Error, Result};

/// A finished, opaque carousel slide.
#[derive(Debug, Clone)]
pub struct Slide {
    image: RgbImage,
}

impl Slide {
    pub fn new(image: RgbImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }

    /// Encode as PNG.
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        let mut buf = Cursor::new(Vec::new());
        self.image
            .write_to(&mut buf, ImageFormat::Png)
            .map_err(|e| Error::RenderError(format!("PNG encoding failed: {}", e)))?;
        Ok(buf.into_inner())
    }
}
