//! Carousel assembly: one cover plus up to five photo slides, in fixed order.
//!
//! Every slide is attempted independently. A slide that fails to compose is
//! recorded as [`SlideOutcome::Skipped`] and its siblings still render; only
//! configuration problems abort the whole carousel.

use log::{info, warn};
use serde::Serialize;

use crate::compose::{compose_amenity, compose_cover, PhotoSlide};
use crate::config::RenderConfig;
use crate::rendering::Slide;
use crate::store::{FolderNamer, SlideStore};
use crate::{Fetch, HotelRecord, Result};

/// Amenity label used when the record lists none
pub const DEFAULT_AMENITY: &str = "Services & amenities";

/// What a slide is made of, decided before anything is rendered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlideKind {
    Cover,
    Photo { image_url: String, amenity: String },
}

/// One planned slide attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideJob {
    pub index: usize,
    pub file_name: String,
    pub kind: SlideKind,
}

/// File name of the slide at `index`: `00_cover.png`, `01_image.png`, ...
pub fn slide_file_name(index: usize) -> String {
    if index == 0 {
        "00_cover.png".to_string()
    } else {
        format!("{:02}_image.png", index)
    }
}

/// The ordered slide attempts for `hotel`: the cover, then one photo slide
/// per URL up to `max_photos`, with amenities reused cyclically.
pub fn plan(hotel: &HotelRecord, max_photos: usize) -> Vec<SlideJob> {
    let mut jobs = vec![SlideJob {
        index: 0,
        file_name: slide_file_name(0),
        kind: SlideKind::Cover,
    }];
    for (i, url) in hotel.image_urls.iter().take(max_photos).enumerate() {
        let amenity = if hotel.popular_amenities.is_empty() {
            DEFAULT_AMENITY.to_string()
        } else {
            hotel.popular_amenities[i % hotel.popular_amenities.len()].clone()
        };
        jobs.push(SlideJob {
            index: i + 1,
            file_name: slide_file_name(i + 1),
            kind: SlideKind::Photo {
                image_url: url.clone(),
                amenity,
            },
        });
    }
    jobs
}

#[derive(Debug, Clone)]
pub enum SlideOutcome {
    Rendered(Slide),
    Skipped(String),
}

#[derive(Debug, Clone)]
pub struct SlideResult {
    pub index: usize,
    pub file_name: String,
    pub outcome: SlideOutcome,
}

impl SlideResult {
    pub fn slide(&self) -> Option<&Slide> {
        match &self.outcome {
            SlideOutcome::Rendered(s) => Some(s),
            SlideOutcome::Skipped(_) => None,
        }
    }
}

/// A finished carousel, grouped under `folder`
#[derive(Debug, Clone)]
pub struct Carousel {
    pub folder: String,
    pub hotel_name: String,
    pub slides: Vec<SlideResult>,
}

impl Carousel {
    /// Rendered slides in order.
    pub fn rendered(&self) -> impl Iterator<Item = (&SlideResult, &Slide)> {
        self.slides.iter().filter_map(|r| r.slide().map(|s| (r, s)))
    }

    pub fn skipped(&self) -> impl Iterator<Item = &SlideResult> {
        self.slides.iter().filter(|r| r.slide().is_none())
    }

    /// Store every rendered slide, returning their references in order.
    pub fn persist(&self, store: &dyn SlideStore) -> Result<Vec<String>> {
        self.rendered()
            .map(|(r, slide)| store.persist(&self.folder, &r.file_name, slide))
            .collect()
    }
}

/// Response payload describing a persisted carousel
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarouselSummary {
    pub hotel_name: String,
    pub carousel_image_urls: Vec<String>,
    pub skipped_slides: Vec<String>,
    pub status: String,
    pub generated_files_location: String,
}

impl CarouselSummary {
    pub fn new(carousel: &Carousel, urls: Vec<String>, location: String) -> Self {
        Self {
            hotel_name: carousel.hotel_name.clone(),
            carousel_image_urls: urls,
            skipped_slides: carousel.skipped().map(|r| r.file_name.clone()).collect(),
            status: "success".to_string(),
            generated_files_location: location,
        }
    }
}

/// Builds carousels from hotel records with injected collaborators
pub struct CarouselAssembler<'a> {
    config: &'a RenderConfig,
    fetcher: &'a dyn Fetch,
    namer: &'a dyn FolderNamer,
}

impl<'a> CarouselAssembler<'a> {
    pub fn new(config: &'a RenderConfig, fetcher: &'a dyn Fetch, namer: &'a dyn FolderNamer) -> Self {
        Self { config, fetcher, namer }
    }

    fn render(&self, hotel: &HotelRecord, rating: Option<&str>, job: &SlideJob) -> Result<Slide> {
        match &job.kind {
            SlideKind::Cover => compose_cover(self.config, hotel),
            SlideKind::Photo { image_url, amenity } => compose_amenity(
                self.config,
                self.fetcher,
                &PhotoSlide {
                    image_url,
                    hotel_name: &hotel.hotel_name,
                    amenity,
                    rating,
                },
            ),
        }
    }

    /// Render every planned slide of `hotel`.
    ///
    /// Fails only when the configuration cannot render at all; individual
    /// slide failures are reported as skipped results.
    pub fn assemble(&self, hotel: &HotelRecord) -> Result<Carousel> {
        self.config.fonts()?;
        let folder = self.namer.folder_name(&hotel.hotel_name);
        let rating = hotel.footer_rating();
        let jobs = plan(hotel, self.config.metrics.max_photo_slides);
        info!("Building {} slides for {} in {}", jobs.len(), hotel.hotel_name, folder);

        let slides = jobs
            .iter()
            .map(|job| {
                let outcome = match self.render(hotel, rating.as_deref(), job) {
                    Ok(slide) => {
                        info!("Slide {} rendered", job.file_name);
                        SlideOutcome::Rendered(slide)
                    }
                    Err(e) => {
                        warn!("Slide {} for {} skipped: {}", job.file_name, hotel.hotel_name, e);
                        SlideOutcome::Skipped(e.to_string())
                    }
                };
                SlideResult {
                    index: job.index,
                    file_name: job.file_name.clone(),
                    outcome,
                }
            })
            .collect();

        Ok(Carousel {
            folder,
            hotel_name: hotel.hotel_name.clone(),
            slides,
        })
    }
}
