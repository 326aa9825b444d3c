//! Song details resource definition.

use async_trait::async_trait;

use crate::domains::genius::{GeniusError, GeniusService, OutputFormat};
use crate::domains::resources::handlers::ResourceHandler;

/// Song details without lyrics.
pub struct SongResource;

#[async_trait]
impl ResourceHandler for SongResource {
    fn uri_template(&self) -> &'static str {
        "genius://songs/{id}"
    }

    fn name(&self) -> &'static str {
        "genius-song"
    }

    fn title(&self) -> &'static str {
        "Genius Song"
    }

    fn description(&self) -> &'static str {
        "Details of a song in Genius: artists, album, release date, credits and samples"
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
        let song = genius.song(id).await?;
        format
            .render(&song)
            .map_err(|e| GeniusError::decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_song_resource_matches() {
        assert_eq!(SongResource.id_param("genius://songs/378195"), Some("378195"));
        assert_eq!(SongResource.id_param("genius://songs/378195/lyrics"), None);
    }
}
