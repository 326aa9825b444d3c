//! Artist details resource definition.

use async_trait::async_trait;

use crate::domains::genius::{GeniusError, GeniusService, OutputFormat};
use crate::domains::resources::handlers::ResourceHandler;

/// Artist details.
pub struct ArtistResource;

#[async_trait]
impl ResourceHandler for ArtistResource {
    fn uri_template(&self) -> &'static str {
        "genius://artists/{id}"
    }

    fn name(&self) -> &'static str {
        "genius-artist"
    }

    fn title(&self) -> &'static str {
        "Genius Artist"
    }

    fn description(&self) -> &'static str {
        "Details of an artist in Genius, including the description"
    }

    fn entity(&self) -> &'static str {
        "artist"
    }

    async fn read(
        &self,
        genius: &GeniusService,
        id: u64,
        format: OutputFormat,
    ) -> Result<String, GeniusError> {
        let artist = genius.artist(id).await?;
        format
            .render(&artist)
            .map_err(|e| GeniusError::decode(e.to_string()))
    }
}
