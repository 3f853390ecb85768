use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use log::info;

use hotel_carousel::store::{public_url, DirectoryStore, TimestampNamer};
use hotel_carousel::{CarouselAssembler, CarouselSummary, FontPaths, HotelRecord, HttpFetcher, RenderConfig};

/// Render a hotel carousel from a JSON record
#[derive(Parser, Debug)]
#[command(name = "hotel-carousel", version, about)]
struct Args {
    /// Hotel record (JSON object with hotelName, rating, imageUrls, popularAmenities)
    #[arg(short, long)]
    input: PathBuf,

    /// Directory holding the display, bold and regular font files
    #[arg(long, default_value = "fonts")]
    fonts: PathBuf,

    /// Output directory; each carousel gets its own sub-folder
    #[arg(short, long, default_value = "output_carousels")]
    out: PathBuf,

    /// Base URL used to build public slide URLs
    #[arg(long, default_value = "http://localhost:8000")]
    base_url: String,

    /// Per-photo download timeout in seconds
    #[arg(long, default_value_t = 20)]
    timeout_secs: u64,
}

fn run(args: Args) -> anyhow::Result<()> {
    let payload = std::fs::read_to_string(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let hotel = HotelRecord::from_json(&payload)?;

    let mut config = RenderConfig::load(&FontPaths::in_dir(&args.fonts));
    config.metrics.fetch_timeout = Duration::from_secs(args.timeout_secs);
    let fetcher = HttpFetcher::new(config.metrics.fetch_timeout)?;

    info!("Generating carousel for {}", hotel.hotel_name);
    let carousel = CarouselAssembler::new(&config, &fetcher, &TimestampNamer).assemble(&hotel)?;

    let store = DirectoryStore::new(&args.out);
    let references = carousel.persist(&store)?;
    let urls = references.iter().map(|r| public_url(&args.base_url, r)).collect();
    let location = store.root().join(&carousel.folder).display().to_string();

    let summary = CarouselSummary::new(&carousel, urls, location);
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run(Args::parse()) {
        eprintln!("hotel-carousel: {:#}", e);
        std::process::exit(1);
    }
}
