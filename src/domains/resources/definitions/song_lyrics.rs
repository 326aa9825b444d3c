//! Song lyrics resource definition.

use async_trait::async_trait;

use crate::domains::genius::{GeniusError, GeniusService, OutputFormat};
use crate::domains::resources::handlers::ResourceHandler;

/// Song details together with the lyrics scraped from the song page.
pub struct SongLyricsResource;

#[async_trait]
impl ResourceHandler for SongLyricsResource {
    fn uri_template(&self) -> &'static str {
        "genius://songs/{id}/lyrics"
    }

    fn name(&self) -> &'static str {
        "genius-song-lyrics"
    }

    fn title(&self) -> &'static str {
        "Genius Song Lyrics"
    }

    fn description(&self) -> &'static str {
        "Details and lyrics of a song in Genius"
    }

    fn entity(&self) -> &'static str {
        "song"
    }

    async fn read(
        &self,
        genius: &GeniusService,
        id: u64,
        format: OutputFormat,
    ) -> Result<String, GeniusError> {
        let record = genius.song_with_lyrics(id).await?;
        format
            .render(&record)
            .map_err(|e| GeniusError::decode(e.to_string()))
    }
}
