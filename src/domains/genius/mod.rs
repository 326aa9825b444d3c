//! Genius domain module.
//!
//! Everything that talks to Genius lives here:
//!
//! - **client**: authenticated calls to the Genius web API
//! - **lyrics**: lyrics extraction from public song pages
//! - **models**: raw API response shapes
//! - **normalize**: normalized records built from raw responses
//! - **render**: JSON and plain-text renderings of those records
//! - **service**: the operations exposed to tools and resources

pub mod client;
pub mod error;
pub mod lyrics;
pub mod models;
pub mod normalize;
pub mod render;
pub mod service;

pub use client::{ArtistSongsQuery, GeniusClient, SongSort};
pub use error::GeniusError;
pub use lyrics::{LyricsScraper, extract_lyrics};
pub use normalize::{Artist, ArtistSongsOutcome, SearchHit, SearchOutcome, Song, SongWithLyrics};
pub use render::{OutputFormat, Render};
pub use service::GeniusService;
