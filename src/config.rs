//! Render configuration: canvas, palette, metrics and font faces.
//!
//! A [`RenderConfig`] is built once at startup and shared read-only by every
//! composition. Font loading problems do not abort startup; they are stored
//! and reported as [`Error::ConfigError`] by every render that needs fonts.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use image::Rgba;
use log::{error, info};

use crate::rendering::font::{Face, Font, TrueTypeFace};
use crate::{Error, Result};

/// Slide dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 1080,
            height: 1080,
        }
    }
}

/// Fixed slide colors
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub cover_background: Rgba<u8>,
    pub cover_title: Rgba<u8>,
    pub cover_rating: Rgba<u8>,
    /// Translucent fill of the amenity panel and footer band
    pub overlay: Rgba<u8>,
    pub amenity_text: Rgba<u8>,
    pub footer_text: Rgba<u8>,
    /// Background of a photo slide whose photo could not be fetched
    pub photo_fallback: Rgba<u8>,
    /// Background of a tile whose photo could not be resampled
    pub resample_fallback: Rgba<u8>,
    pub placeholder_label: Rgba<u8>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            cover_background: Rgba([20, 30, 40, 255]),
            cover_title: Rgba([252, 196, 60, 255]),
            cover_rating: Rgba([240, 240, 240, 255]),
            overlay: Rgba([0, 0, 0, 160]),
            amenity_text: Rgba([252, 196, 60, 255]),
            footer_text: Rgba([255, 255, 255, 255]),
            photo_fallback: Rgba([220, 220, 220, 255]),
            resample_fallback: Rgba([210, 210, 210, 255]),
            placeholder_label: Rgba([100, 100, 100, 255]),
        }
    }
}

/// Sizes, spacings and limits used by the slide layouts (pixels unless noted)
#[derive(Debug, Clone, PartialEq)]
pub struct Metrics {
    pub title_px: f32,
    pub cover_rating_px: f32,
    pub cover_star: f32,
    pub amenity_px: f32,
    pub footer_name_px: f32,
    pub footer_rating_px: f32,
    pub footer_star: f32,
    pub padding: f32,
    pub line_spacing: f32,
    pub section_spacing: f32,
    /// Minimum distance between the amenity block and the top edge
    pub amenity_top_margin: f32,
    pub footer_height: f32,
    pub footer_padding: f32,
    /// Gap between a rating label and its star
    pub star_gap: f32,
    pub panel_padding_x: f32,
    pub panel_padding_y: f32,
    pub panel_radius: f32,
    pub placeholder_px: f32,
    pub tile_placeholder_px: f32,
    /// Wrap widths and footer limit, in characters
    pub title_wrap: usize,
    pub amenity_wrap: usize,
    pub footer_name_chars: usize,
    pub max_photo_slides: usize,
    pub fetch_timeout: Duration,
}

impl Default for Metrics {
    fn default() -> Self {
        Self {
            title_px: 120.0,
            cover_rating_px: 50.0,
            cover_star: 40.0,
            amenity_px: 80.0,
            footer_name_px: 35.0,
            footer_rating_px: 35.0,
            footer_star: 30.0,
            padding: 70.0,
            line_spacing: 15.0,
            section_spacing: 40.0,
            amenity_top_margin: 50.0,
            footer_height: 100.0,
            footer_padding: 30.0,
            star_gap: 10.0,
            panel_padding_x: 40.0,
            panel_padding_y: 25.0,
            panel_radius: 30.0,
            placeholder_px: 50.0,
            tile_placeholder_px: 40.0,
            title_wrap: 18,
            amenity_wrap: 16,
            footer_name_chars: 35,
            max_photo_slides: 5,
            fetch_timeout: Duration::from_secs(20),
        }
    }
}

/// Locations of the three font roles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontPaths {
    pub display: PathBuf,
    pub bold: PathBuf,
    pub regular: PathBuf,
}

impl FontPaths {
    /// Default file names inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            display: dir.join("Shrikhand-Regular.ttf"),
            bold: dir.join("Roboto-Bold.ttf"),
            regular: dir.join("Roboto-Regular.ttf"),
        }
    }
}

impl Default for FontPaths {
    fn default() -> Self {
        Self::in_dir("fonts")
    }
}

/// Loaded faces for the display, bold and regular roles
#[derive(Debug, Clone)]
pub struct FontSet {
    pub display: Arc<dyn Face>,
    pub bold: Arc<dyn Face>,
    pub regular: Arc<dyn Face>,
}

impl FontSet {
    pub fn load(paths: &FontPaths) -> Result<Self> {
        Ok(Self {
            display: Arc::new(TrueTypeFace::from_file(&paths.display)?),
            bold: Arc::new(TrueTypeFace::from_file(&paths.bold)?),
            regular: Arc::new(TrueTypeFace::from_file(&paths.regular)?),
        })
    }

    /// Use the same face for every role.
    pub fn uniform(face: Arc<dyn Face>) -> Self {
        Self {
            display: face.clone(),
            bold: face.clone(),
            regular: face,
        }
    }

    pub fn display(&self, px: f32) -> Font {
        Font::new(self.display.clone(), px)
    }

    pub fn bold(&self, px: f32) -> Font {
        Font::new(self.bold.clone(), px)
    }

    pub fn regular(&self, px: f32) -> Font {
        Font::new(self.regular.clone(), px)
    }
}

/// Process-wide, read-only rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub canvas: Canvas,
    pub palette: Palette,
    pub metrics: Metrics,
    fonts: std::result::Result<FontSet, String>,
}

impl RenderConfig {
    pub fn with_fonts(fonts: FontSet) -> Self {
        Self {
            canvas: Canvas::default(),
            palette: Palette::default(),
            metrics: Metrics::default(),
            fonts: Ok(fonts),
        }
    }

    /// Load fonts, keeping any failure for later renders to report.
    pub fn load(paths: &FontPaths) -> Self {
        match Self::try_load(paths) {
            Ok(cfg) => cfg,
            Err(e) => {
                error!("Fonts could not be loaded, every render will fail: {}", e);
                Self {
                    canvas: Canvas::default(),
                    palette: Palette::default(),
                    metrics: Metrics::default(),
                    fonts: Err(e.to_string()),
                }
            }
        }
    }

    pub fn try_load(paths: &FontPaths) -> Result<Self> {
        let fonts = FontSet::load(paths)?;
        info!("Fonts loaded from {}", paths.display.parent().unwrap_or(Path::new(".")).display());
        Ok(Self::with_fonts(fonts))
    }

    /// Loaded fonts, or the startup failure as [`Error::ConfigError`].
    pub fn fonts(&self) -> Result<&FontSet> {
        self.fonts
            .as_ref()
            .map_err(|e| Error::ConfigError(format!("fonts unavailable: {}", e)))
    }
}
