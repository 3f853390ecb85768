/// Text rasterization and layer compositing

use image::{Rgb, RgbImage, Rgba, RgbaImage};

use crate::rendering::font::Font;
use crate::rendering::layout::{layout_lines, TextLayout, TextStyle};
use crate::rendering::paint::blend_pixel;

/// Paint `text` with its line origin (left edge, top of line) at (`x`, `y`).
pub fn draw_text(img: &mut RgbaImage, font: &Font, x: f32, y: f32, color: Rgba<u8>, text: &str) {
    let (w, h) = (img.width() as i32, img.height() as i32);
    font.face().rasterize(text, font.px(), x, y, &mut |px, py, v| {
        if px < 0 || py < 0 || px >= w || py >= h {
            return;
        }
        blend_pixel(img.get_pixel_mut(px as u32, py as u32), color, v);
    });
}

/// Paint an already laid out block.
pub fn draw_layout(img: &mut RgbaImage, font: &Font, layout: &TextLayout, color: Rgba<u8>) {
    for line in &layout.lines {
        draw_text(img, font, line.x, line.y, color, &line.text);
    }
}

/// Lay out and paint `lines`, returning the vertical cursor after the block.
pub fn draw_lines<S: AsRef<str>>(
    img: &mut RgbaImage,
    lines: &[S],
    origin_x: f32,
    origin_y: f32,
    font: &Font,
    color: Rgba<u8>,
    style: &TextStyle,
) -> f32 {
    let layout = layout_lines(lines, origin_x, origin_y, font, style);
    draw_layout(img, font, &layout, color);
    layout.end_y
}

/// Paint `text` so that its ink box is centered on the canvas.
pub fn draw_label_centered(img: &mut RgbaImage, font: &Font, color: Rgba<u8>, text: &str) {
    let Some(bounds) = font.ink_bounds(text) else {
        return;
    };
    let x = (img.width() as f32 - bounds.width() as f32) / 2.0 - bounds.min_x as f32;
    let y = (img.height() as f32 - bounds.height() as f32) / 2.0 - bounds.min_y as f32;
    draw_text(img, font, x, y, color, text);
}

/// Porter-Duff "over": composite `top` onto `bottom` in place.
pub fn alpha_composite(bottom: &mut RgbaImage, top: &RgbaImage) {
    for (dst, src) in bottom.pixels_mut().zip(top.pixels()) {
        let sa = src.0[3] as f32 / 255.0;
        if sa <= 0.0 {
            continue;
        }
        let da = dst.0[3] as f32 / 255.0;
        let out_a = sa + da * (1.0 - sa);
        for c in 0..3 {
            let v = (src.0[c] as f32 * sa + dst.0[c] as f32 * da * (1.0 - sa)) / out_a;
            dst.0[c] = v.round().clamp(0.0, 255.0) as u8;
        }
        dst.0[3] = (out_a * 255.0).round() as u8;
    }
}

/// Drop the alpha channel.
pub fn flatten(img: &RgbaImage) -> RgbImage {
    RgbImage::from_fn(img.width(), img.height(), |x, y| {
        let p = img.get_pixel(x, y).0;
        Rgb([p[0], p[1], p[2]])
    })
}
