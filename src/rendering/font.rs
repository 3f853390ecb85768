//! Font faces and text measurement.
//!
//! A [`Face`] knows two things about a string at a pixel size: the union of
//! its glyph ink boxes, and how to rasterize it as per-pixel coverage. Both
//! are expressed relative to the *line origin*: `x` is the left edge of the
//! pen and `y` is the top of the line (the ascender), the same anchor that is
//! used when drawing. Measurements come from ink boxes, not line height, so
//! "Typography" measures taller than "TYPOGRAPHY".

use std::path::Path;
use std::sync::Arc;

use rusttype::{point, Scale};

use crate::{Error, Result};

/// Pixel-aligned ink box of a run of glyphs, relative to the line origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InkBounds {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl InkBounds {
    pub fn width(&self) -> u32 {
        (self.max_x - self.min_x).max(0) as u32
    }

    pub fn height(&self) -> u32 {
        (self.max_y - self.min_y).max(0) as u32
    }

    fn union(self, other: InkBounds) -> InkBounds {
        InkBounds {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }
}

/// A typeface that can measure and rasterize single-line text.
pub trait Face: Send + Sync + std::fmt::Debug {
    /// Ink box of `text` at `px`, or `None` when nothing would be painted.
    fn ink_bounds(&self, text: &str, px: f32) -> Option<InkBounds>;

    /// Rasterize `text` with its line origin at (`x`, `y`), calling `plot`
    /// with absolute pixel coordinates and a coverage value in `0.0..=1.0`.
    fn rasterize(&self, text: &str, px: f32, x: f32, y: f32, plot: &mut dyn FnMut(i32, i32, f32));
}

/// TrueType/OpenType face backed by `rusttype`.
pub struct TrueTypeFace {
    font: rusttype::Font<'static>,
}

impl TrueTypeFace {
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let font = rusttype::Font::try_from_vec(data)
            .ok_or_else(|| Error::ConfigError("font data is not a valid TrueType/OpenType face".into()))?;
        Ok(Self { font })
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)
            .map_err(|e| Error::ConfigError(format!("Failed to read font {}: {}", path.display(), e)))?;
        Self::from_bytes(data)
            .map_err(|e| Error::ConfigError(format!("{} ({})", e, path.display())))
    }
}

impl std::fmt::Debug for TrueTypeFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrueTypeFace")
            .field("glyph_count", &self.font.glyph_count())
            .finish()
    }
}

impl Face for TrueTypeFace {
    fn ink_bounds(&self, text: &str, px: f32) -> Option<InkBounds> {
        let scale = Scale::uniform(px);
        let ascent = self.font.v_metrics(scale).ascent;
        self.font
            .layout(text, scale, point(0.0, ascent))
            .filter_map(|g| g.pixel_bounding_box())
            .map(|bb| InkBounds {
                min_x: bb.min.x,
                min_y: bb.min.y,
                max_x: bb.max.x,
                max_y: bb.max.y,
            })
            .reduce(InkBounds::union)
    }

    fn rasterize(&self, text: &str, px: f32, x: f32, y: f32, plot: &mut dyn FnMut(i32, i32, f32)) {
        let scale = Scale::uniform(px);
        let ascent = self.font.v_metrics(scale).ascent;
        for glyph in self.font.layout(text, scale, point(x, y + ascent)) {
            if let Some(bb) = glyph.pixel_bounding_box() {
                glyph.draw(|gx, gy, v| plot(gx as i32 + bb.min.x, gy as i32 + bb.min.y, v));
            }
        }
    }
}

/// Monospaced face that paints every glyph as a solid box.
///
/// Geometry is fixed and font-file free, which makes layouts reproducible
/// across machines: capitals and digits span the cap height, lowercase
/// letters the x-height (ascenders reach the cap height), and `g j p q y`
/// drop below the baseline.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockFace;

impl BlockFace {
    /// Horizontal advance per character, in ems.
    pub const ADVANCE: f32 = 0.6;

    /// (left, top, right, bottom) in ems relative to the glyph cell.
    fn glyph_box(ch: char) -> Option<(f32, f32, f32, f32)> {
        if ch.is_whitespace() {
            return None;
        }
        let (top, bottom) = match ch {
            'g' | 'j' | 'p' | 'q' | 'y' => (0.35, 1.0),
            'b' | 'd' | 'f' | 'h' | 'k' | 'l' | 't' | 'i' => (0.1, 0.8),
            'a'..='z' => (0.35, 0.8),
            '.' | ',' => (0.65, 0.8),
            ':' | ';' | '-' | '+' | '=' => (0.35, 0.8),
            _ => (0.1, 0.8),
        };
        Some((0.05, top, 0.55, bottom))
    }

    fn boxes(text: &str, px: f32, x: f32, y: f32) -> impl Iterator<Item = InkBounds> + '_ {
        text.chars().enumerate().filter_map(move |(i, ch)| {
            let (l, t, r, b) = Self::glyph_box(ch)?;
            let cell = x + i as f32 * Self::ADVANCE * px;
            Some(InkBounds {
                min_x: (cell + l * px).floor() as i32,
                min_y: (y + t * px).floor() as i32,
                max_x: (cell + r * px).ceil() as i32,
                max_y: (y + b * px).ceil() as i32,
            })
        })
    }
}

impl Face for BlockFace {
    fn ink_bounds(&self, text: &str, px: f32) -> Option<InkBounds> {
        Self::boxes(text, px, 0.0, 0.0).reduce(InkBounds::union)
    }

    fn rasterize(&self, text: &str, px: f32, x: f32, y: f32, plot: &mut dyn FnMut(i32, i32, f32)) {
        for b in Self::boxes(text, px, x, y) {
            for py in b.min_y..b.max_y {
                for px_ in b.min_x..b.max_x {
                    plot(px_, py, 1.0);
                }
            }
        }
    }
}

/// A face at a concrete pixel size.
#[derive(Debug, Clone)]
pub struct Font {
    face: Arc<dyn Face>,
    px: f32,
}

impl Font {
    pub fn new(face: Arc<dyn Face>, px: f32) -> Self {
        Self { face, px }
    }

    pub fn px(&self) -> f32 {
        self.px
    }

    pub fn face(&self) -> &dyn Face {
        self.face.as_ref()
    }

    pub fn ink_bounds(&self, text: &str) -> Option<InkBounds> {
        self.face.ink_bounds(text, self.px)
    }

    /// Rendered (width, height) of `text`. See [`measure`].
    pub fn measure(&self, text: &str) -> (u32, u32) {
        measure(text, self)
    }
}

/// Rendered (width, height) of `text` in `font`, taken from the glyph ink
/// box. Empty or whitespace-only strings measure `(0, 0)`.
pub fn measure(text: &str, font: &Font) -> (u32, u32) {
    if text.trim().is_empty() {
        return (0, 0);
    }
    font.ink_bounds(text)
        .map(|b| (b.width(), b.height()))
        .unwrap_or((0, 0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(px: f32) -> Font {
        Font::new(Arc::new(BlockFace), px)
    }

    #[test]
    fn blank_text_measures_zero() {
        let f = block(40.0);
        assert_eq!(measure("", &f), (0, 0));
        assert_eq!(measure("   \t", &f), (0, 0));
    }

    #[test]
    fn descenders_measure_taller_than_caps() {
        let f = block(100.0);
        let (_, caps) = measure("HOTEL", &f);
        let (_, mixed) = measure("Happy", &f);
        assert_eq!(caps, 70);
        assert!(mixed > caps);
    }

    #[test]
    fn measurement_is_stable() {
        let f = block(35.0);
        assert_eq!(measure("Grand Hotel", &f), measure("Grand Hotel", &f));
    }

    #[test]
    fn width_grows_with_characters() {
        let f = block(10.0);
        let (one, _) = measure("A", &f);
        let (three, _) = measure("AAA", &f);
        assert!(one > 0);
        assert!(three > 2 * one);
    }

    #[test]
    fn rasterize_plots_inside_ink_bounds() {
        let f = block(20.0);
        let bounds = f.ink_bounds("Ab").unwrap();
        let mut count = 0;
        f.face().rasterize("Ab", f.px(), 0.0, 0.0, &mut |x, y, _| {
            assert!(x >= bounds.min_x && x < bounds.max_x);
            assert!(y >= bounds.min_y && y < bounds.max_y);
            count += 1;
        });
        assert!(count > 0);
    }

    #[test]
    fn invalid_font_bytes_are_a_config_error() {
        let err = TrueTypeFace::from_bytes(vec![0, 1, 2, 3]).unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));
    }
}
