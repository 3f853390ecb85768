//! Cover slide: hotel name over a flat background, rating and star below.

use image::RgbaImage;
use log::debug;

use crate::compose::RatingUnit;
use crate::config::RenderConfig;
use crate::rendering::layout::{block_extent, layout_lines, wrap, Align, Placement, TextLayout, TextStyle};
use crate::rendering::paint::draw_star;
use crate::rendering::raster::{draw_layout, draw_text, flatten};
use crate::rendering::Slide;
use crate::{HotelRecord, Result};

/// Representative label used to size the rating band
const RATING_SAMPLE: &str = "Rated: 9.9";

#[derive(Debug, Clone, PartialEq)]
pub struct CoverLayout {
    pub name: TextLayout,
    pub rating: RatingUnit,
    /// Top of the band reserved for the rating line
    pub rating_band_top: f32,
    pub rating_band_height: f32,
}

pub fn rating_text(hotel: &HotelRecord) -> String {
    format!("Rated: {}", hotel.cover_rating())
}

/// Geometry of the cover for `hotel`.
pub fn cover_layout(config: &RenderConfig, hotel: &HotelRecord) -> Result<CoverLayout> {
    let fonts = config.fonts()?;
    let m = &config.metrics;
    let (cw, ch) = (config.canvas.width as f32, config.canvas.height as f32);
    let title_font = fonts.display(m.title_px);
    let rating_font = fonts.bold(m.cover_rating_px);

    let name_lines = wrap(&hotel.hotel_name, m.title_wrap);
    let (name_height, _) = block_extent(&name_lines, &title_font, m.line_spacing);

    let (_, sample_h) = rating_font.measure(RATING_SAMPLE);
    let band_height = (sample_h as f32).max(m.cover_star);
    let available = ch - 2.0 * m.padding - band_height - m.section_spacing;
    let name_y = (m.padding + (available - name_height) / 2.0).max(m.padding);

    let style = TextStyle::new(m.line_spacing, Align::Center)
        .container(cw)
        .right_inset(m.padding);
    let name = layout_lines(&name_lines, 0.0, name_y, &title_font, &style);

    let text = rating_text(hotel);
    let (label_w, label_h) = rating_font.measure(&text);
    let unit_w = label_w as f32 + m.star_gap + m.cover_star;
    let x = (cw - unit_w) / 2.0;
    let band_top = ch - m.padding - band_height;
    let rating = RatingUnit {
        label: Placement {
            text,
            x,
            y: band_top + (band_height - label_h as f32) / 2.0,
            width: label_w,
            height: label_h,
        },
        star_center: (
            x + label_w as f32 + m.star_gap + m.cover_star / 2.0,
            band_top + band_height / 2.0,
        ),
        star_size: m.cover_star,
    };

    debug!(
        "cover: {} name lines from y={:.1}, rating band at y={:.1}",
        name.lines.len(),
        name_y,
        band_top
    );

    Ok(CoverLayout {
        name,
        rating,
        rating_band_top: band_top,
        rating_band_height: band_height,
    })
}

/// Render the title slide for `hotel`.
pub fn compose_cover(config: &RenderConfig, hotel: &HotelRecord) -> Result<Slide> {
    let layout = cover_layout(config, hotel)?;
    let fonts = config.fonts()?;
    let (m, p) = (&config.metrics, &config.palette);

    let mut img = RgbaImage::from_pixel(config.canvas.width, config.canvas.height, p.cover_background);
    draw_layout(&mut img, &fonts.display(m.title_px), &layout.name, p.cover_title);

    let label = &layout.rating.label;
    draw_text(&mut img, &fonts.bold(m.cover_rating_px), label.x, label.y, p.cover_rating, &label.text);
    let (sx, sy) = layout.rating.star_center;
    draw_star(&mut img, sx, sy, layout.rating.star_size, p.cover_rating);

    Ok(Slide::new(flatten(&img)))
}
