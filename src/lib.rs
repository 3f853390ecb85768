//! Hotel Carousel
//!
//! Renders a fixed sequence of square social-media slides for a hotel
//! listing: one cover slide with the hotel name and rating, followed by up to
//! five photo slides annotated with an amenity label and a footer band.
//!
//! # Features
//!
//! - **Deterministic layout**: word-wrapped, centered and right-aligned text
//!   measured from glyph ink boxes, with ellipsis truncation
//! - **Graceful degradation**: unreachable or corrupt photos become
//!   placeholder tiles, failed slides are skipped without aborting the rest
//! - **Injected collaborators**: photo fetching, folder naming and slide
//!   storage are traits, so the core runs without network or disk in tests
//!
//! # Example
//!
//! ```no_run
//! use hotel_carousel::{CarouselAssembler, FontPaths, HotelRecord, HttpFetcher, RenderConfig};
//! use hotel_carousel::store::{DirectoryStore, TimestampNamer};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = RenderConfig::load(&FontPaths::in_dir("fonts"));
//! let fetcher = HttpFetcher::new(config.metrics.fetch_timeout)?;
//! let hotel = HotelRecord::from_json(r#"{"hotelName": "Hotel Bellevue", "rating": 4.6}"#)?;
//!
//! let carousel = CarouselAssembler::new(&config, &fetcher, &TimestampNamer).assemble(&hotel)?;
//! let files = carousel.persist(&DirectoryStore::new("out"))?;
//! println!("{:?}", files);
//! # Ok(())
//! # }
//! ```

use serde::Deserialize;

pub mod acquire;
pub mod carousel;
pub mod compose;
pub mod config;
pub mod error;
pub mod rendering;
pub mod store;

pub use acquire::Fetch;
#[cfg(feature = "http")]
pub use acquire::HttpFetcher;
pub use carousel::{Carousel, CarouselAssembler, CarouselSummary, SlideOutcome, SlideResult};
pub use config::{Canvas, FontPaths, FontSet, Metrics, Palette, RenderConfig};
pub use error::{Error, Result};
pub use rendering::Slide;

/// Name used when the record carries none
pub const DEFAULT_HOTEL_NAME: &str = "Unknown hotel";

/// Rating label used on the cover when the record carries none
pub const MISSING_RATING: &str = "N/A";

/// A hotel rating as supplied by the caller: a number or free text
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Rating {
    Number(serde_json::Number),
    Text(String),
}

impl Rating {
    fn is_blank(&self) -> bool {
        match self {
            Rating::Number(_) => false,
            Rating::Text(s) => s.trim().is_empty(),
        }
    }

    fn is_zero(&self) -> bool {
        matches!(self, Rating::Number(n) if n.as_f64() == Some(0.0))
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rating::Number(n) => write!(f, "{}", n),
            Rating::Text(s) => write!(f, "{}", s.trim()),
        }
    }
}

/// Input describing one hotel
///
/// # Examples
///
/// ```
/// let hotel = hotel_carousel::HotelRecord::from_json(r#"{"imageUrls": ["https://a/1.jpg"]}"#).unwrap();
/// assert_eq!(hotel.hotel_name, "Unknown hotel");
/// assert_eq!(hotel.cover_rating(), "N/A");
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelRecord {
    #[serde(default = "default_hotel_name")]
    pub hotel_name: String,
    #[serde(default)]
    pub rating: Option<Rating>,
    /// Photo URLs in slide order
    #[serde(default)]
    pub image_urls: Vec<String>,
    /// Short labels, reused cyclically across photo slides
    #[serde(default)]
    pub popular_amenities: Vec<String>,
}

fn default_hotel_name() -> String {
    DEFAULT_HOTEL_NAME.to_string()
}

impl HotelRecord {
    pub fn new(hotel_name: impl Into<String>) -> Self {
        Self {
            hotel_name: hotel_name.into(),
            rating: None,
            image_urls: Vec::new(),
            popular_amenities: Vec::new(),
        }
    }

    /// Parse a JSON object payload, rejecting anything malformed.
    pub fn from_json(payload: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(payload)
            .map_err(|e| Error::InvalidInput(format!("payload is not valid JSON: {}", e)))?;
        if !value.is_object() {
            return Err(Error::InvalidInput("payload must be a JSON object".into()));
        }
        serde_json::from_value(value).map_err(|e| Error::InvalidInput(e.to_string()))
    }

    /// The rating, unless absent or blank.
    pub fn rating_label(&self) -> Option<String> {
        self.rating
            .as_ref()
            .filter(|r| !r.is_blank())
            .map(|r| r.to_string())
    }

    /// Rating for the photo slide footer; a zero rating is left out there
    /// along with its star.
    pub fn footer_rating(&self) -> Option<String> {
        self.rating
            .as_ref()
            .filter(|r| !r.is_blank() && !r.is_zero())
            .map(|r| r.to_string())
    }

    /// Rating text for the cover, "N/A" when absent.
    pub fn cover_rating(&self) -> String {
        self.rating_label().unwrap_or_else(|| MISSING_RATING.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_record() {
        let hotel = HotelRecord::from_json(
            r#"{"hotelName": "Hotel Bellevue", "rating": 4.5,
                "imageUrls": ["a", "b"], "popularAmenities": ["Pool"]}"#,
        )
        .unwrap();
        assert_eq!(hotel.hotel_name, "Hotel Bellevue");
        assert_eq!(hotel.rating_label().as_deref(), Some("4.5"));
        assert_eq!(hotel.image_urls.len(), 2);
        assert_eq!(hotel.popular_amenities, vec!["Pool"]);
    }

    #[test]
    fn string_and_integer_ratings_display_verbatim() {
        let a = HotelRecord::from_json(r#"{"rating": "9.2/10"}"#).unwrap();
        let b = HotelRecord::from_json(r#"{"rating": 9}"#).unwrap();
        assert_eq!(a.cover_rating(), "9.2/10");
        assert_eq!(b.cover_rating(), "9");
    }

    #[test]
    fn missing_null_or_blank_rating_is_absent() {
        for payload in [r#"{}"#, r#"{"rating": null}"#, r#"{"rating": "  "}"#] {
            let hotel = HotelRecord::from_json(payload).unwrap();
            assert_eq!(hotel.rating_label(), None);
            assert_eq!(hotel.cover_rating(), "N/A");
        }
    }

    #[test]
    fn zero_rating_shows_on_cover_only() {
        for payload in [r#"{"rating": 0}"#, r#"{"rating": 0.0}"#] {
            let hotel = HotelRecord::from_json(payload).unwrap();
            assert_eq!(hotel.cover_rating(), hotel.rating_label().unwrap());
            assert!(hotel.cover_rating().starts_with('0'));
            assert_eq!(hotel.footer_rating(), None);
        }
        let hotel = HotelRecord::from_json(r#"{"rating": "0"}"#).unwrap();
        assert_eq!(hotel.footer_rating().as_deref(), Some("0"));
        let hotel = HotelRecord::from_json(r#"{"rating": 4.5}"#).unwrap();
        assert_eq!(hotel.footer_rating().as_deref(), Some("4.5"));
    }

    #[test]
    fn rejects_non_object_payloads() {
        for payload in ["[]", "\"hotel\"", "42", "not json"] {
            assert!(matches!(HotelRecord::from_json(payload), Err(Error::InvalidInput(_))));
        }
    }

    #[test]
    fn rejects_wrong_field_types() {
        let err = HotelRecord::from_json(r#"{"imageUrls": "https://a/1.jpg"}"#).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        let err = HotelRecord::from_json(r#"{"popularAmenities": [1, 2]}"#).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }
}
