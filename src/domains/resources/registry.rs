//! Resource Registry - central registration of all resources.
//!
//! When adding a new resource:
//! 1. Create the resource file in `definitions/`
//! 2. Export it in `definitions/mod.rs`
//! 3. Register it here in `get_all_resource_handlers()`

use rmcp::model::{AnnotateAble, RawResourceTemplate, ResourceTemplate};

use super::definitions::{ArtistResource, SongLyricsResource, SongResource};
use super::handlers::ResourceHandler;
use crate::domains::genius::OutputFormat;

/// Get all registered resource handlers.
///
/// More specific templates come first so that lookups stay unambiguous.
pub fn get_all_resource_handlers() -> Vec<Box<dyn ResourceHandler>> {
    vec![
        Box::new(SongLyricsResource),
        Box::new(SongResource),
        Box::new(ArtistResource),
    ]
}

/// Build the advertised template for a handler.
pub fn build_template(handler: &dyn ResourceHandler, format: OutputFormat) -> ResourceTemplate {
    RawResourceTemplate {
        uri_template: handler.uri_template().to_string(),
        name: handler.name().to_string(),
        title: Some(handler.title().to_string()),
        description: Some(handler.description().to_string()),
        mime_type: Some(format.mime_type().to_string()),
    }
    .no_annotation()
}

/// Get the list of all resource URI templates.
pub fn resource_uri_templates() -> Vec<&'static str> {
    get_all_resource_handlers()
        .iter()
        .map(|h| h.uri_template())
        .collect()
}
