//! High-level Genius operations shared by tools and resources.

use tracing::{debug, info, instrument};

use super::client::{ArtistSongsQuery, GeniusClient, build_http_client};
use super::lyrics::LyricsScraper;
use super::normalize::{
    Artist, ArtistSongSummary, ArtistSongsOutcome, SearchOutcome, Song, SongWithLyrics,
};
use super::GeniusError;
use crate::core::config::GeniusConfig;

/// Fetches, validates and normalizes Genius entities.
///
/// Holds only immutable state, so one instance is shared behind an `Arc` by
/// every tool and resource.
#[derive(Debug, Clone)]
pub struct GeniusService {
    client: GeniusClient,
    scraper: LyricsScraper,
}

impl GeniusService {
    /// Build the API client and the scraper over one HTTP client.
    pub fn new(config: &GeniusConfig) -> Result<Self, GeniusError> {
        let http = build_http_client(config)?;
        Ok(Self {
            client: GeniusClient::with_http(http.clone(), config),
            scraper: LyricsScraper::new(http),
        })
    }

    pub fn client(&self) -> &GeniusClient {
        &self.client
    }

    /// Search Genius. A response without hits is an empty outcome.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<SearchOutcome, GeniusError> {
        let hits = self
            .client
            .search(query)
            .await?
            .map(|response| response.hits)
            .unwrap_or_default();

        info!("Search for {:?} returned {} hits", query, hits.len());
        Ok(SearchOutcome::new(query, hits))
    }

    /// Song details without lyrics.
    #[instrument(skip(self))]
    pub async fn song(&self, id: u64) -> Result<Song, GeniusError> {
        let raw = self
            .client
            .song(id)
            .await?
            .and_then(|response| response.song)
            .ok_or_else(|| GeniusError::not_found("song", id))?;

        Song::from_raw(raw)
    }

    /// Song details plus lyrics scraped from the song page.
    ///
    /// A page without a lyrics block, or with an empty one, yields
    /// `lyrics: None`. A page that cannot be fetched fails the whole call.
    #[instrument(skip(self))]
    pub async fn song_with_lyrics(&self, id: u64) -> Result<SongWithLyrics, GeniusError> {
        let song = self.song(id).await?;
        debug!("Scraping lyrics from {}", song.url);
        let lyrics = self
            .scraper
            .scrape(&song.url)
            .await?
            .filter(|text| !text.is_empty());

        if lyrics.is_none() {
            info!("No lyrics block found on the page of song {}", id);
        }

        Ok(SongWithLyrics { song, lyrics })
    }

    /// Artist details.
    #[instrument(skip(self))]
    pub async fn artist(&self, id: u64) -> Result<Artist, GeniusError> {
        self.client
            .artist(id)
            .await?
            .and_then(|response| response.artist)
            .map(Artist::from)
            .ok_or_else(|| GeniusError::not_found("artist", id))
    }

    /// One page of an artist's songs.
    #[instrument(skip(self))]
    pub async fn artist_songs(
        &self,
        artist_id: u64,
        query: ArtistSongsQuery,
    ) -> Result<ArtistSongsOutcome, GeniusError> {
        let songs = self
            .client
            .artist_songs(artist_id, query)
            .await?
            .map(|response| response.songs)
            .unwrap_or_default();

        Ok(ArtistSongsOutcome {
            artist_id,
            songs: songs.into_iter().map(ArtistSongSummary::from).collect(),
            sort: query.sort,
            page: query.page,
            per_page: query.per_page,
        })
    }
}
