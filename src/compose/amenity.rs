//! Photo slide: cropped photo, translucent amenity panel, footer band with
//! hotel name and rating.
//!
//! Everything except the photo is painted on a separate transparent overlay
//! which is composited onto the photo at the end, so the photo itself is
//! never drawn on directly.

use image::{Rgba, RgbaImage};
use log::debug;

use crate::acquire::{acquire, normalize_to_square, UNAVAILABLE_LABEL};
use crate::compose::RatingUnit;
use crate::config::{FontSet, RenderConfig};
use crate::rendering::layout::{block_extent, layout_lines, shorten, wrap, Align, Placement, TextLayout, TextStyle, ELLIPSIS};
use crate::rendering::paint::{draw_star, fill_rect, fill_rounded_rect};
use crate::rendering::raster::{alpha_composite, draw_label_centered, draw_layout, draw_text, flatten};
use crate::rendering::Slide;
use crate::{Fetch, Result};

/// Inputs for one photo slide
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhotoSlide<'a> {
    pub image_url: &'a str,
    pub hotel_name: &'a str,
    pub amenity: &'a str,
    /// Footer rating; `None` leaves the footer with the name only
    pub rating: Option<&'a str>,
}

/// Backing panel behind the amenity text, corners inclusive
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Panel {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
    pub radius: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AmenityLayout {
    pub amenity: TextLayout,
    pub panel: Option<Panel>,
    pub footer_top: f32,
    pub name: Placement,
    pub rating: Option<RatingUnit>,
}

/// Geometry of the overlay for `slide`; needs no photo.
pub fn amenity_layout(config: &RenderConfig, fonts: &FontSet, slide: &PhotoSlide<'_>) -> AmenityLayout {
    let m = &config.metrics;
    let (cw, ch) = (config.canvas.width as f32, config.canvas.height as f32);
    let footer_top = ch - m.footer_height;

    let amenity_font = fonts.bold(m.amenity_px);
    let lines = wrap(slide.amenity, m.amenity_wrap);
    let (block_h, block_w) = block_extent(&lines, &amenity_font, m.line_spacing);
    let start_y = ((ch - m.footer_height - block_h) / 2.0).max(m.amenity_top_margin);

    let panel = if lines.is_empty() {
        None
    } else {
        let x0 = (cw - block_w as f32) / 2.0 - m.panel_padding_x;
        let y0 = start_y - m.panel_padding_y;
        let x1 = x0 + block_w as f32 + 2.0 * m.panel_padding_x;
        let y1 = (start_y + block_h + m.panel_padding_y).min(footer_top - m.padding / 4.0);
        (x1 > x0 && y1 > y0).then_some(Panel { x0, y0, x1, y1, radius: m.panel_radius })
    };

    let style = TextStyle::new(m.line_spacing, Align::Center)
        .container(cw)
        .right_inset(m.padding);
    let amenity = layout_lines(&lines, 0.0, start_y, &amenity_font, &style);

    let name_font = fonts.bold(m.footer_name_px);
    let name_text = shorten(slide.hotel_name, m.footer_name_chars, ELLIPSIS);
    let (name_w, name_h) = name_font.measure(&name_text);
    let name = Placement {
        text: name_text,
        x: m.footer_padding,
        y: footer_top + (m.footer_height - name_h as f32) / 2.0,
        width: name_w,
        height: name_h,
    };

    let rating = slide.rating.filter(|r| !r.trim().is_empty()).map(|r| {
        let font = fonts.bold(m.footer_rating_px);
        let text = r.trim().to_string();
        let (w, h) = font.measure(&text);
        let x = cw - m.footer_padding - m.footer_star - m.star_gap - w as f32;
        let combined = (h as f32).max(m.footer_star);
        let base_y = footer_top + (m.footer_height - combined) / 2.0;
        RatingUnit {
            label: Placement {
                text,
                x,
                y: base_y + (combined - h as f32) / 2.0,
                width: w,
                height: h,
            },
            star_center: (x + w as f32 + m.star_gap + m.footer_star / 2.0, base_y + combined / 2.0),
            star_size: m.footer_star,
        }
    });

    AmenityLayout {
        amenity,
        panel,
        footer_top,
        name,
        rating,
    }
}

/// Photo layer: the normalized photo over the fallback background, or the
/// fallback with an "unavailable" label when the photo cannot be acquired.
fn photo_layer(config: &RenderConfig, fonts: &FontSet, fetcher: &dyn Fetch, url: &str) -> RgbaImage {
    let (m, p) = (&config.metrics, &config.palette);
    let (cw, ch) = (config.canvas.width, config.canvas.height);
    let mut base = RgbaImage::from_pixel(cw, ch, p.photo_fallback);
    match acquire(fetcher, url) {
        Some(photo) => {
            let tile_font = fonts.regular(m.tile_placeholder_px);
            let tile = normalize_to_square(&photo, cw, ch, p.resample_fallback, Some((&tile_font, p.placeholder_label)));
            alpha_composite(&mut base, &tile);
        }
        None => {
            draw_label_centered(&mut base, &fonts.regular(m.placeholder_px), p.placeholder_label, UNAVAILABLE_LABEL);
        }
    }
    base
}

fn paint_overlay(config: &RenderConfig, fonts: &FontSet, layout: &AmenityLayout) -> RgbaImage {
    let (m, p) = (&config.metrics, &config.palette);
    let (cw, ch) = (config.canvas.width, config.canvas.height);
    let mut overlay = RgbaImage::from_pixel(cw, ch, Rgba([0, 0, 0, 0]));

    if let Some(panel) = layout.panel {
        fill_rounded_rect(&mut overlay, panel.x0, panel.y0, panel.x1, panel.y1, panel.radius, p.overlay);
    }
    draw_layout(&mut overlay, &fonts.bold(m.amenity_px), &layout.amenity, p.amenity_text);

    fill_rect(&mut overlay, 0.0, layout.footer_top, cw as f32, ch as f32, p.overlay);
    let name = &layout.name;
    draw_text(&mut overlay, &fonts.bold(m.footer_name_px), name.x, name.y, p.footer_text, &name.text);

    if let Some(unit) = &layout.rating {
        let label = &unit.label;
        draw_text(&mut overlay, &fonts.bold(m.footer_rating_px), label.x, label.y, p.footer_text, &label.text);
        let (sx, sy) = unit.star_center;
        draw_star(&mut overlay, sx, sy, unit.star_size, p.footer_text);
    }
    overlay
}

/// Render one photo slide.
pub fn compose_amenity(config: &RenderConfig, fetcher: &dyn Fetch, slide: &PhotoSlide<'_>) -> Result<Slide> {
    let fonts = config.fonts()?;
    let layout = amenity_layout(config, fonts, slide);
    debug!(
        "photo slide {}: {} amenity lines, rating {}",
        slide.image_url,
        layout.amenity.lines.len(),
        if layout.rating.is_some() { "shown" } else { "omitted" }
    );

    let mut img = photo_layer(config, fonts, fetcher, slide.image_url);
    let overlay = paint_overlay(config, fonts, &layout);
    alpha_composite(&mut img, &overlay);
    Ok(Slide::new(flatten(&img)))
}
