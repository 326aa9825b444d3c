//! Resource service implementation.
//!
//! The ResourceService advertises the Genius resource templates and resolves
//! concrete URIs against them. There are no static resources: every resource
//! is read from Genius on demand.
//!
//! Resources are defined in `definitions/` and registered via `registry.rs`.
//! Adding a new resource does NOT require modifying this file.

use std::sync::Arc;

use rmcp::model::{ReadResourceResult, Resource, ResourceContents, ResourceTemplate};
use tracing::{error, info, instrument};

use super::error::ResourceError;
use super::handlers::ResourceHandler;
use super::registry::{build_template, get_all_resource_handlers};
use crate::core::config::ResourcesConfig;
use crate::domains::genius::GeniusService;

/// Service for listing and reading Genius resources.
pub struct ResourceService {
    /// Configuration for the resources domain.
    config: ResourcesConfig,

    /// Shared Genius access.
    genius: Arc<GeniusService>,

    /// Registered handlers, in lookup order.
    handlers: Vec<Box<dyn ResourceHandler>>,
}

impl ResourceService {
    /// Create a new ResourceService with the given configuration.
    pub fn new(config: ResourcesConfig, genius: Arc<GeniusService>) -> Self {
        info!(
            "Initializing ResourceService (format: {:?})",
            config.format
        );

        Self {
            config,
            genius,
            handlers: get_all_resource_handlers(),
        }
    }

    /// List all concrete resources. Genius resources are only reachable
    /// through templates, so this is empty.
    pub async fn list_resources(&self) -> Vec<Resource> {
        Vec::new()
    }

    /// List all available resource templates.
    pub async fn list_resource_templates(&self) -> Vec<ResourceTemplate> {
        self.handlers
            .iter()
            .map(|h| build_template(h.as_ref(), self.config.format))
            .collect()
    }

    /// Read a resource by URI.
    #[instrument(skip(self))]
    pub async fn read_resource(&self, uri: &str) -> Result<ReadResourceResult, ResourceError> {
        let (handler, raw_id) = self
            .handlers
            .iter()
            .find_map(|h| h.id_param(uri).map(|id| (h, id)))
            .ok_or_else(|| ResourceError::not_found(uri))?;

        let id: u64 = raw_id.parse().map_err(|_| {
            ResourceError::invalid_uri(format!("Invalid {} ID: {}", handler.entity(), raw_id))
        })?;

        info!("Reading the {} resource {}", handler.entity(), uri);

        let format = self.config.format;
        let text = handler
            .read(&self.genius, id, format)
            .await
            .map_err(|e| {
                error!("Error reading the {} resource {}: {}", handler.entity(), uri, e);
                ResourceError::upstream(handler.entity(), id, e)
            })?;

        Ok(ReadResourceResult {
            contents: vec![ResourceContents::TextResourceContents {
                uri: uri.to_string(),
                mime_type: Some(format.mime_type().to_string()),
                text,
                meta: None,
            }],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::genius::OutputFormat;
    use crate::test_utils::{StubRoute, song_body, spawn_stub, spawn_stub_with, test_genius_config};
    use serde_json::json;

    fn service(base: &str, format: OutputFormat) -> ResourceService {
        let genius = GeniusService::new(&test_genius_config(base)).unwrap();
        ResourceService::new(ResourcesConfig { format }, Arc::new(genius))
    }

    fn text_of(result: &ReadResourceResult) -> (&str, Option<&str>) {
        match &result.contents[0] {
            ResourceContents::TextResourceContents { text, mime_type, .. } => {
                (text.as_str(), mime_type.as_deref())
            }
            _ => panic!("Expected text contents"),
        }
    }

    #[tokio::test]
    async fn test_lists_templates_only() {
        let service = service("http://127.0.0.1:9", OutputFormat::Json);
        assert!(service.list_resources().await.is_empty());
        assert_eq!(service.list_resource_templates().await.len(), 3);
    }

    #[tokio::test]
    async fn test_read_song_json() {
        let base = spawn_stub_with(|base| {
            vec![StubRoute::json("/songs/5", 200, song_body(5, &format!("{base}/page")))]
        })
        .await;
        let service = service(&base, OutputFormat::Json);

        let result = service.read_resource("genius://songs/5").await.unwrap();
        let (text, mime) = text_of(&result);
        assert_eq!(mime, Some("application/json"));

        let body: serde_json::Value = serde_json::from_str(text).unwrap();
        assert_eq!(body["id"], 5);
        assert_eq!(body["album"], serde_json::Value::Null);
        assert!(body.get("lyrics").is_none());
    }

    #[tokio::test]
    async fn test_read_artist_text() {
        let base = spawn_stub(vec![StubRoute::json(
            "/artists/21964",
            200,
            json!({
                "meta": { "status": 200 },
                "response": { "artist": {
                    "id": 21964, "name": "Foo Fighters",
                    "url": "https://genius.com/artists/Foo-fighters"
                }}
            }),
        )])
        .await;
        let service = service(&base, OutputFormat::Text);

        let result = service.read_resource("genius://artists/21964").await.unwrap();
        let (text, mime) = text_of(&result);
        assert_eq!(mime, Some("text/plain"));
        assert!(text.starts_with("Name: Foo Fighters"));
        assert!(text.ends_with("Description: None"));
    }

    #[tokio::test]
    async fn test_read_failure_is_wrapped() {
        let base = spawn_stub(vec![]).await;
        let service = service(&base, OutputFormat::Json);

        let err = service.read_resource("genius://songs/404").await.unwrap_err();
        assert!(matches!(err, ResourceError::Upstream { entity: "song", id: 404, .. }));
        assert!(err.to_string().starts_with("Could not read the song resource 404: "));
    }

    #[tokio::test]
    async fn test_read_non_numeric_id() {
        let service = service("http://127.0.0.1:9", OutputFormat::Json);
        let err = service.read_resource("genius://songs/abc").await.unwrap_err();
        assert!(matches!(err, ResourceError::InvalidUri(_)));
    }

    #[tokio::test]
    async fn test_read_unknown_uri() {
        let service = service("http://127.0.0.1:9", OutputFormat::Json);
        let err = service.read_resource("genius://albums/1").await.unwrap_err();
        assert!(matches!(err, ResourceError::NotFound(_)));
    }
}
