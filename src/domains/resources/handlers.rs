//! Resource handlers module.
//!
//! Genius resources are parameterized by a numeric id embedded in the URI,
//! e.g. `genius://songs/{id}`. A handler declares its URI template and knows
//! how to render the entity behind a concrete id.

use async_trait::async_trait;

use crate::domains::genius::{GeniusError, GeniusService, OutputFormat};

/// Match `uri` against a template with a single `{param}` placeholder and
/// return the parameter value.
///
/// The value must be non-empty and may not span path segments.
pub fn match_template<'a>(template: &str, uri: &'a str) -> Option<&'a str> {
    let open = template.find('{')?;
    let close = open + template[open..].find('}')?;
    let prefix = &template[..open];
    let suffix = &template[close + 1..];

    let value = uri.strip_prefix(prefix)?.strip_suffix(suffix)?;
    if value.is_empty() || value.contains('/') {
        return None;
    }
    Some(value)
}

/// Trait for resource handlers backed by Genius.
#[async_trait]
pub trait ResourceHandler: Send + Sync {
    /// The URI template (RFC 6570) this handler serves.
    fn uri_template(&self) -> &'static str;

    /// The display name of the resource.
    fn name(&self) -> &'static str;

    /// A short title for the resource.
    fn title(&self) -> &'static str;

    /// A description of the resource.
    fn description(&self) -> &'static str;

    /// The entity word used in error messages ("song", "artist").
    fn entity(&self) -> &'static str;

    /// Extract the raw id parameter if `uri` matches this handler.
    fn id_param<'a>(&self, uri: &'a str) -> Option<&'a str> {
        match_template(self.uri_template(), uri)
    }

    /// Fetch and render the entity.
    async fn read(
        &self,
        genius: &GeniusService,
        id: u64,
        format: OutputFormat,
    ) -> Result<String, GeniusError>;
}
