/// Paint primitives on RGBA canvases: rectangles, rounded panels, polygons
/// and the five-pointed rating star.

use image::{Rgba, RgbaImage};

/// Inner/outer radius ratio of the rating star.
pub const STAR_INNER_RATIO: f32 = 0.382;

/// Blend every channel of `dst` toward `color` by `coverage`.
pub fn blend_pixel(dst: &mut Rgba<u8>, color: Rgba<u8>, coverage: f32) {
    let a = coverage.clamp(0.0, 1.0);
    if a <= 0.0 {
        return;
    }
    let inv = 1.0 - a;
    for c in 0..4 {
        dst.0[c] = (color.0[c] as f32 * a + dst.0[c] as f32 * inv).round() as u8;
    }
}

/// Clamp a float span to pixel indices `[lo, hi)` inside `0..limit`.
fn span(lo: f32, hi: f32, limit: u32) -> std::ops::Range<u32> {
    let lo = lo.floor().max(0.0) as u32;
    let hi = (hi.ceil().max(0.0) as u32).min(limit);
    lo.min(hi)..hi
}

/// Overwrite the pixels of the inclusive box (`x0`,`y0`)-(`x1`,`y1`).
pub fn fill_rect(img: &mut RgbaImage, x0: f32, y0: f32, x1: f32, y1: f32, color: Rgba<u8>) {
    let (w, h) = img.dimensions();
    for y in span(y0, y1 + 1.0, h) {
        for x in span(x0, x1 + 1.0, w) {
            img.put_pixel(x, y, color);
        }
    }
}

fn in_rounded_rect(px: f32, py: f32, x0: f32, y0: f32, x1: f32, y1: f32, r: f32) -> bool {
    if px < x0 || px > x1 || py < y0 || py > y1 {
        return false;
    }
    let r = r.min((x1 - x0) / 2.0).min((y1 - y0) / 2.0).max(0.0);
    let cx = px.clamp(x0 + r, x1 - r);
    let cy = py.clamp(y0 + r, y1 - r);
    let (dx, dy) = (px - cx, py - cy);
    dx * dx + dy * dy <= r * r
}

/// Blend a rounded box into `img`, weighting by the alpha of `color`.
///
/// Painting a translucent panel onto a transparent layer this way leaves
/// the layer's alpha at `a * a / 255`, which is what gets composited later.
pub fn fill_rounded_rect(
    img: &mut RgbaImage,
    x0: f32,
    y0: f32,
    x1: f32,
    y1: f32,
    radius: f32,
    color: Rgba<u8>,
) {
    let (w, h) = img.dimensions();
    let coverage = color.0[3] as f32 / 255.0;
    for y in span(y0, y1 + 1.0, h) {
        for x in span(x0, x1 + 1.0, w) {
            if in_rounded_rect(x as f32 + 0.5, y as f32 + 0.5, x0, y0, x1 + 1.0, y1 + 1.0, radius) {
                blend_pixel(img.get_pixel_mut(x, y), color, coverage);
            }
        }
    }
}

/// Even-odd point-in-polygon test.
pub fn polygon_contains(points: &[(f32, f32)], x: f32, y: f32) -> bool {
    let mut inside = false;
    let mut j = points.len().wrapping_sub(1);
    for i in 0..points.len() {
        let (xi, yi) = points[i];
        let (xj, yj) = points[j];
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Overwrite every pixel whose center lies inside the polygon.
pub fn fill_polygon(img: &mut RgbaImage, points: &[(f32, f32)], color: Rgba<u8>) {
    if points.len() < 3 {
        return;
    }
    let (w, h) = img.dimensions();
    let (mut x0, mut y0, mut x1, mut y1) = (f32::MAX, f32::MAX, f32::MIN, f32::MIN);
    for &(x, y) in points {
        x0 = x0.min(x);
        y0 = y0.min(y);
        x1 = x1.max(x);
        y1 = y1.max(y);
    }
    for y in span(y0, y1, h) {
        for x in span(x0, x1, w) {
            if polygon_contains(points, x as f32 + 0.5, y as f32 + 0.5) {
                img.put_pixel(x, y, color);
            }
        }
    }
}

/// Vertices of a five-pointed star of diameter `size` centered on
/// (`cx`, `cy`): outer and inner points alternate every 36°, starting at the
/// top.
pub fn star_points(cx: f32, cy: f32, size: f32) -> [(f32, f32); 10] {
    let outer = size / 2.0;
    let inner = outer * STAR_INNER_RATIO;
    let mut points = [(0.0, 0.0); 10];
    for (i, p) in points.iter_mut().enumerate() {
        let radius = if i % 2 == 0 { outer } else { inner };
        let angle = (i as f32 * 36.0 - 90.0).to_radians();
        *p = (cx + radius * angle.cos(), cy + radius * angle.sin());
    }
    points
}

pub fn draw_star(img: &mut RgbaImage, cx: f32, cy: f32, size: f32, color: Rgba<u8>) {
    fill_polygon(img, &star_points(cx, cy, size), color);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dist(p: (f32, f32), c: (f32, f32)) -> f32 {
        ((p.0 - c.0).powi(2) + (p.1 - c.1).powi(2)).sqrt()
    }

    #[test]
    fn star_alternates_outer_and_inner_radii() {
        for size in [1.0f32, 30.0, 40.0, 333.0] {
            let pts = star_points(50.0, 60.0, size);
            assert_eq!(pts.len(), 10);
            for (i, p) in pts.iter().enumerate() {
                let expected = if i % 2 == 0 { size / 2.0 } else { size / 2.0 * STAR_INNER_RATIO };
                assert!((dist(*p, (50.0, 60.0)) - expected).abs() < 1e-3 * size.max(1.0));
            }
        }
    }

    #[test]
    fn star_starts_at_top() {
        let pts = star_points(0.0, 0.0, 40.0);
        assert!(pts[0].0.abs() < 1e-4);
        assert!((pts[0].1 + 20.0).abs() < 1e-4);
    }

    #[test]
    fn star_is_symmetric_under_72_degree_rotation() {
        let pts = star_points(0.0, 0.0, 100.0);
        let (s, c) = 72f32.to_radians().sin_cos();
        for i in 0..10 {
            let (x, y) = pts[i];
            let rotated = (x * c - y * s, x * s + y * c);
            let target = pts[(i + 2) % 10];
            assert!(dist(rotated, target) < 1e-3);
        }
    }

    #[test]
    fn draw_star_paints_center_not_corners() {
        let mut img = RgbaImage::from_pixel(40, 40, Rgba([0, 0, 0, 0]));
        draw_star(&mut img, 20.0, 20.0, 40.0, Rgba([255, 255, 255, 255]));
        assert_eq!(img.get_pixel(20, 20).0, [255, 255, 255, 255]);
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0, 0]);
        assert_eq!(img.get_pixel(39, 39).0, [0, 0, 0, 0]);
    }

    #[test]
    fn fill_rect_is_inclusive_and_clipped() {
        let mut img = RgbaImage::from_pixel(10, 10, Rgba([0, 0, 0, 0]));
        fill_rect(&mut img, 0.0, 8.0, 10.0, 10.0, Rgba([0, 0, 0, 160]));
        assert_eq!(img.get_pixel(5, 7).0[3], 0);
        assert_eq!(img.get_pixel(5, 8).0[3], 160);
        assert_eq!(img.get_pixel(9, 9).0[3], 160);
    }

    #[test]
    fn rounded_rect_blends_and_skips_corners() {
        let mut img = RgbaImage::from_pixel(100, 100, Rgba([0, 0, 0, 0]));
        fill_rounded_rect(&mut img, 10.0, 10.0, 89.0, 89.0, 30.0, Rgba([0, 0, 0, 160]));
        assert_eq!(img.get_pixel(50, 50).0[3], 100);
        assert_eq!(img.get_pixel(11, 11).0[3], 0);
        assert_eq!(img.get_pixel(5, 50).0[3], 0);
    }

    #[test]
    fn blend_pixel_full_coverage_replaces() {
        let mut p = Rgba([10, 20, 30, 0]);
        blend_pixel(&mut p, Rgba([252, 196, 60, 255]), 1.0);
        assert_eq!(p.0, [252, 196, 60, 255]);
    }
}
