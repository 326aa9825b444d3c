//! Genius song lyrics tool.
//!
//! Fetches a song's details from the API, then scrapes its lyrics from the
//! public song page.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::info;

use super::common::{error_result, render_result};
use crate::domains::genius::{GeniusService, OutputFormat};

fn default_song_id() -> u64 {
    378195
}

/// Parameters for the lyrics tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SongLyricsParams {
    #[schemars(description = "The numeric ID of the song in Genius.")]
    #[serde(default = "default_song_id")]
    pub song_id: u64,

    #[schemars(description = "Output format: 'json' (default) or 'text'")]
    #[serde(default)]
    pub format: OutputFormat,
}

/// Genius Song Lyrics Tool implementation.
#[derive(Debug, Clone)]
pub struct SongLyricsTool;

impl SongLyricsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "genius-song-lyrics";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get a song's lyrics by song id. Returns the song details (artists, album, credits, samples) together with the lyrics scraped from its Genius page.";

    /// Execute the tool logic.
    ///
    /// Any failure, including a page that cannot be fetched, produces a
    /// single error result and no song payload.
    pub async fn execute(params: &SongLyricsParams, genius: &GeniusService) -> CallToolResult {
        info!(
            "Reading the song lyrics resource genius://songs/{}/lyrics",
            params.song_id
        );

        match genius.song_with_lyrics(params.song_id).await {
            Ok(record) => render_result(&record, params.format),
            Err(e) => {
                let mut input = Map::new();
                input.insert("song_id".to_string(), Value::from(params.song_id));
                error_result(
                    &format!("Could not read the song resource {}: {e}", params.song_id),
                    input,
                )
            }
        }
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        genius: Arc<GeniusService>,
    ) -> Result<serde_json::Value, crate::domains::tools::ToolError> {
        let params: SongLyricsParams = super::common::parse_arguments(arguments)?;
        let result = Self::execute(&params, &genius).await;
        Ok(super::common::http_response(result))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<SongLyricsParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for STDIO transport.
    pub fn create_route<S>(genius: Arc<GeniusService>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let genius = genius.clone();
            async move {
                let params: SongLyricsParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params, &genius).await)
            }
            .boxed()
        })
    }
}
