use std::fs;
use std::io::Cursor;
use std::path::PathBuf;
use std::sync::Arc;

use hotel_carousel::compose::{amenity_layout, compose_amenity, compose_cover, cover_layout, PhotoSlide};
use hotel_carousel::rendering::BlockFace;
use hotel_carousel::{Error, FontSet, HotelRecord, RenderConfig, Result, Slide};
use image::{ImageFormat, Rgb, RgbImage};
use sha2::{Digest, Sha256};

fn golden_path(name: &str) -> PathBuf {
    let mut p = PathBuf::from("tests/goldens/expected");
    p.push(name);
    p
}

fn digest(slide: &Slide) -> String {
    hex::encode(Sha256::digest(slide.image().as_raw()))
}

fn check_golden(name: &str, slide: &Slide) {
    let expected_path = golden_path(name);
    let actual = digest(slide);
    if std::env::var("UPDATE_GOLDENS").is_ok() {
        fs::create_dir_all("tests/goldens/expected").ok();
        fs::write(&expected_path, &actual).expect("write golden");
        println!("Updated golden: {:?}", expected_path);
        return;
    }

    if !expected_path.exists() {
        assert!(
            std::env::var("CI").is_err(),
            "missing golden {:?}; generate it with UPDATE_GOLDENS=1",
            expected_path
        );
        println!(
            "No golden at {:?}; run with UPDATE_GOLDENS=1 to create it. Skipping.",
            expected_path
        );
        return;
    }

    let expected = fs::read_to_string(&expected_path).expect("unable to read golden");
    assert_eq!(actual, expected.trim(), "slide {} drifted from its golden", name);
}

fn config() -> RenderConfig {
    RenderConfig::with_fonts(FontSet::uniform(Arc::new(BlockFace)))
}

fn gradient_photo(_: &str) -> Result<Vec<u8>> {
    let img = RgbImage::from_fn(160, 90, |x, y| Rgb([x as u8, y as u8, 128]));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png)?;
    Ok(buf.into_inner())
}

#[test]
fn cover_slide_matches_golden() {
    let mut hotel = HotelRecord::new("Grand Hotel Bellevue & Spa");
    hotel.rating = Some(hotel_carousel::Rating::Text("4.6".into()));
    let slide = compose_cover(&config(), &hotel).unwrap();
    check_golden("cover.sha256", &slide);
}

#[test]
fn photo_slide_matches_golden() {
    let slide = compose_amenity(
        &config(),
        &gradient_photo,
        &PhotoSlide {
            image_url: "fixture://gradient",
            hotel_name: "Grand Hotel Bellevue & Spa",
            amenity: "Rooftop infinity pool",
            rating: Some("4.6"),
        },
    )
    .unwrap();
    check_golden("photo.sha256", &slide);
}

#[test]
fn rendering_is_deterministic() {
    let hotel = HotelRecord::new("Hotel Bellevue");
    let a = compose_cover(&config(), &hotel).unwrap();
    let b = compose_cover(&config(), &hotel).unwrap();
    assert_eq!(digest(&a), digest(&b));
}

fn offline(_: &str) -> Result<Vec<u8>> {
    Err(Error::Timeout(0))
}

// Exact values below follow from the palette: a 160-alpha black overlay
// over the 220 gray fallback, and the panel blended onto a clear layer
// (alpha 160 * 160 / 255 = 100) before compositing.
#[test]
fn photo_slide_composites_overlay_layers() {
    let cfg = config();
    let slide = PhotoSlide {
        image_url: "offline://photo",
        hotel_name: "Hotel Bellevue",
        amenity: "Pool",
        rating: Some("4.6"),
    };
    let layout = amenity_layout(&cfg, cfg.fonts().unwrap(), &slide);
    let out = compose_amenity(&cfg, &offline, &slide).unwrap();
    let img = out.image();

    assert_eq!(img.get_pixel(0, 0).0, [220, 220, 220]);
    assert_eq!(img.get_pixel(0, 1079).0, [82, 82, 82]);
    assert_eq!(img.get_pixel(1079, layout.footer_top as u32 + 1).0, [82, 82, 82]);

    let panel = layout.panel.expect("panel");
    let (px, py) = ((panel.x0 + 20.0) as u32, (panel.y0 + 20.0) as u32);
    assert_eq!(img.get_pixel(px, py).0, [134, 134, 134]);
    // Just outside the panel's top edge the photo is untouched.
    assert_eq!(img.get_pixel(px, panel.y0 as u32 - 2).0, [220, 220, 220]);

    let star = layout.rating.expect("rating unit");
    let (sx, sy) = star.star_center;
    assert_eq!(img.get_pixel(sx as u32, sy as u32).0, [255, 255, 255]);

    let amenity = cfg.palette.amenity_text.0;
    assert!(img.pixels().any(|p| p.0 == [amenity[0], amenity[1], amenity[2]]));
}

#[test]
fn cover_slide_paints_star_and_background() {
    let cfg = config();
    let hotel = HotelRecord::new("Hotel Bellevue");
    let layout = cover_layout(&cfg, &hotel).unwrap();
    let out = compose_cover(&cfg, &hotel).unwrap();
    let img = out.image();

    assert_eq!(img.get_pixel(1079, 1079).0, [20, 30, 40]);
    let (sx, sy) = layout.rating.star_center;
    assert_eq!(img.get_pixel(sx as u32, sy as u32).0, [240, 240, 240]);
    // Between the star's upper arms the background shows through.
    let r = layout.rating.star_size / 2.0;
    assert_eq!(img.get_pixel(sx as u32, (sy - r * 0.9) as u32 + 1).0, [240, 240, 240]);
    assert_eq!(img.get_pixel((sx + r * 0.6) as u32, (sy - r * 0.8) as u32).0, [20, 30, 40]);
}
