//! Photo acquisition: fetch, decode, and normalize to the slide canvas.
//!
//! Failures here are expected. [`acquire`] logs and returns `None` instead
//! of an error, and [`normalize_to_square`] falls back to a placeholder tile,
//! so a broken photo never stops a carousel.

use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgba, RgbaImage};
use log::{debug, warn};

use crate::rendering::font::Font;
use crate::rendering::raster::draw_label_centered;
use crate::Result;

#[cfg(feature = "http")]
use crate::Error;

/// Label painted on placeholder tiles
pub const UNAVAILABLE_LABEL: &str = "Image unavailable";

/// Source of raw photo bytes
pub trait Fetch {
    fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

impl<F> Fetch for F
where
    F: Fn(&str) -> Result<Vec<u8>>,
{
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        self(url)
    }
}

/// Blocking HTTP fetcher with a bounded timeout
#[cfg(feature = "http")]
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
    timeout: std::time::Duration,
}

#[cfg(feature = "http")]
impl HttpFetcher {
    pub const USER_AGENT: &'static str = concat!("hotel-carousel/", env!("CARGO_PKG_VERSION"));

    pub fn new(timeout: std::time::Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(Self::USER_AGENT)
            .build()
            .map_err(|e| Error::ConfigError(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client, timeout })
    }
}

#[cfg(feature = "http")]
impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let classify = |e: reqwest::Error| {
            if e.is_timeout() {
                Error::Timeout(self.timeout.as_millis() as u64)
            } else {
                Error::NetworkError(format!("Failed to fetch {}: {}", url, e))
            }
        };
        let resp = self
            .client
            .get(url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(classify)?;
        let body = resp.bytes().map_err(classify)?;
        Ok(body.to_vec())
    }
}

/// Fetch and decode a photo, or `None` after logging why not.
pub fn acquire(fetcher: &dyn Fetch, url: &str) -> Option<DynamicImage> {
    let bytes = match fetcher.fetch(url) {
        Ok(b) => b,
        Err(e) => {
            warn!("Photo download failed for {}: {}", url, e);
            return None;
        }
    };
    match image::load_from_memory(&bytes) {
        Ok(img) => {
            debug!("Decoded {} ({}x{})", url, img.width(), img.height());
            Some(img)
        }
        Err(e) => {
            warn!("Photo at {} could not be decoded: {}", url, e);
            None
        }
    }
}

/// Solid tile of `width`×`height`, labelled with [`UNAVAILABLE_LABEL`] when a
/// font is given.
pub fn placeholder_tile(
    width: u32,
    height: u32,
    background: Rgba<u8>,
    label: Option<(&Font, Rgba<u8>)>,
) -> RgbaImage {
    let mut tile = RgbaImage::from_pixel(width, height, background);
    if let Some((font, color)) = label {
        draw_label_centered(&mut tile, font, color, UNAVAILABLE_LABEL);
    }
    tile
}

/// Center-crop `img` to the target aspect ratio and resample it to exactly
/// `width`×`height` with a Lanczos filter. Images that cannot be resampled
/// (no pixels) yield a placeholder tile instead.
pub fn normalize_to_square(
    img: &DynamicImage,
    width: u32,
    height: u32,
    fallback: Rgba<u8>,
    label: Option<(&Font, Rgba<u8>)>,
) -> RgbaImage {
    let (src_w, src_h) = (img.width(), img.height());
    if src_w == 0 || src_h == 0 || width == 0 || height == 0 {
        warn!("Cannot resample a {}x{} photo to {}x{}, using placeholder", src_w, src_h, width, height);
        return placeholder_tile(width, height, fallback, label);
    }

    let target = width as f64 / height as f64;
    let (crop_w, crop_h) = if src_w as f64 / src_h as f64 > target {
        (((src_h as f64 * target).round() as u32).clamp(1, src_w), src_h)
    } else {
        (src_w, ((src_w as f64 / target).round() as u32).clamp(1, src_h))
    };
    let left = (src_w - crop_w) / 2;
    let top = (src_h - crop_h) / 2;

    let rgba = img.to_rgba8();
    let cropped = imageops::crop_imm(&rgba, left, top, crop_w, crop_h).to_image();
    imageops::resize(&cropped, width, height, FilterType::Lanczos3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering::font::BlockFace;
    use crate::Error;
    use image::{ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;
    use std::sync::Arc;

    fn png_bytes(w: u32, h: u32) -> Vec<u8> {
        let img = RgbImage::from_pixel(w, h, Rgb([10, 120, 200]));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    #[test]
    fn normalize_always_hits_requested_size() {
        for (w, h) in [(400, 300), (300, 400), (50, 50), (1, 900), (2000, 3)] {
            let img = DynamicImage::ImageRgb8(RgbImage::new(w, h));
            let out = normalize_to_square(&img, 108, 108, Rgba([210, 210, 210, 255]), None);
            assert_eq!(out.dimensions(), (108, 108));
        }
        let img = DynamicImage::ImageRgb8(RgbImage::new(640, 480));
        let out = normalize_to_square(&img, 120, 60, Rgba([0, 0, 0, 255]), None);
        assert_eq!(out.dimensions(), (120, 60));
    }

    #[test]
    fn normalize_keeps_the_center() {
        // Left and right thirds are red, the middle third is green.
        let img = RgbImage::from_fn(300, 100, |x, _| {
            if (100..200).contains(&x) { Rgb([0, 255, 0]) } else { Rgb([255, 0, 0]) }
        });
        let out = normalize_to_square(&DynamicImage::ImageRgb8(img), 50, 50, Rgba([0, 0, 0, 255]), None);
        let p = out.get_pixel(25, 25).0;
        assert!(p[1] > 200 && p[0] < 50);
    }

    #[test]
    fn empty_image_becomes_placeholder() {
        let font = Font::new(Arc::new(BlockFace), 40.0);
        let img = DynamicImage::ImageRgb8(RgbImage::new(0, 0));
        let fallback = Rgba([210, 210, 210, 255]);
        let label = Rgba([100, 100, 100, 255]);
        let out = normalize_to_square(&img, 500, 500, fallback, Some((&font, label)));
        assert_eq!(out.dimensions(), (500, 500));
        assert_eq!(*out.get_pixel(0, 0), fallback);
        assert!(out.pixels().any(|p| *p == label));
    }

    #[test]
    fn acquire_decodes_fetched_bytes() {
        let fetch = |_: &str| -> Result<Vec<u8>> { Ok(png_bytes(4, 3)) };
        let img = acquire(&fetch, "mem://photo").unwrap();
        assert_eq!((img.width(), img.height()), (4, 3));
    }

    #[test]
    fn acquire_swallows_network_errors() {
        let fetch = |url: &str| -> Result<Vec<u8>> { Err(Error::NetworkError(url.to_string())) };
        assert!(acquire(&fetch, "http://unreachable").is_none());
    }

    #[test]
    fn acquire_swallows_timeouts() {
        let fetch = |_: &str| -> Result<Vec<u8>> { Err(Error::Timeout(20_000)) };
        assert!(acquire(&fetch, "http://slow").is_none());
    }

    #[test]
    fn acquire_swallows_corrupt_bytes() {
        let fetch = |_: &str| -> Result<Vec<u8>> { Ok(b"definitely not a jpeg".to_vec()) };
        assert!(acquire(&fetch, "http://corrupt").is_none());
    }
}
