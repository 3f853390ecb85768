//! Slide composers
//!
//! Each composer first computes a layout (pure geometry, testable without
//! pixels) and then paints it onto a fresh canvas.

pub mod amenity;
pub mod cover;

pub use amenity::{amenity_layout, compose_amenity, AmenityLayout, Panel, PhotoSlide};
pub use cover::{compose_cover, cover_layout, CoverLayout};

use crate::rendering::layout::Placement;

/// A rating label followed by its star, laid out as one unit.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingUnit {
    pub label: Placement,
    pub star_center: (f32, f32),
    pub star_size: f32,
}

impl RatingUnit {
    /// Horizontal extent from the label's left edge to the star's right tip.
    pub fn span(&self) -> (f32, f32) {
        (self.label.x, self.star_center.0 + self.star_size / 2.0)
    }
}
