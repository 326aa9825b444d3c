//! Genius artist songs tool.
//!
//! Lists one page of an artist's songs, optionally sorted.

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
use crate::domains::genius::{ArtistSongsQuery, GeniusService, OutputFormat, SongSort};

/// Largest page size Genius accepts.
pub const MAX_PER_PAGE: i64 = 50;

fn default_artist_id() -> u64 {
    21964
}

/// Parameters for the artist songs tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListArtistSongsParams {
    #[schemars(description = "The numeric ID of the artist in Genius.")]
    #[serde(default = "default_artist_id")]
    pub artist_id: u64,

    #[schemars(description = "Sorting criterion: 'title' (alphabetical) or 'popularity'.")]
    #[serde(default)]
    pub sort: Option<SongSort>,

    #[schemars(description = "Number of page for pagination (starting at 1).")]
    #[schemars(range(min = 1))]
    #[serde(default)]
    pub page: Option<i64>,

    #[schemars(description = "Number of results per page (maximum 50).")]
    #[schemars(range(min = 1, max = 50))]
    #[serde(default)]
    pub per_page: Option<i64>,

    #[schemars(description = "Output format: 'json' (default) or 'text'")]
    #[serde(default)]
    pub format: OutputFormat,
}

impl ListArtistSongsParams {
    /// Check the paging bounds and build the upstream query.
    pub fn to_query(&self) -> Result<ArtistSongsQuery, String> {
        let page = match self.page {
            Some(page) if page < 1 => {
                return Err(format!("Invalid page {page}: pages start at 1"));
            }
            Some(page) => Some(
                u32::try_from(page).map_err(|_| format!("Invalid page {page}: too large"))?,
            ),
            None => None,
        };

        let per_page = match self.per_page {
            Some(per_page) if !(1..=MAX_PER_PAGE).contains(&per_page) => {
                return Err(format!(
                    "Invalid perPage {per_page}: must be between 1 and {MAX_PER_PAGE}"
                ));
            }
            Some(per_page) => Some(per_page as u32),
            None => None,
        };

        Ok(ArtistSongsQuery {
            sort: self.sort,
            page,
            per_page,
        })
    }
}

/// Genius Artist Songs Tool implementation.
#[derive(Debug, Clone)]
pub struct ListArtistSongsTool;

impl ListArtistSongsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "genius-list-artist-songs";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "List songs of an artist in Genius by their ID. Supports sorting by title or popularity and pagination (at most 50 songs per page).";

    /// Execute the tool logic.
    ///
    /// Out-of-range paging options are rejected before any request is made.
    pub async fn execute(params: &ListArtistSongsParams, genius: &GeniusService) -> CallToolResult {
        let artist_id = params.artist_id;
        let mut input = Map::new();
        input.insert("artist_id".to_string(), Value::from(artist_id));

        let query = match params.to_query() {
            Ok(query) => query,
            Err(message) => return error_result(&message, input),
        };

        info!("Listing songs for artist {} ({:?})", artist_id, query);

        match genius.artist_songs(artist_id, query).await {
            Ok(outcome) => render_result(&outcome, params.format),
            Err(e) => error_result(
                &format!("Error listing songs for artist {artist_id}: {e}"),
                input,
            ),
        }
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        genius: Arc<GeniusService>,
    ) -> Result<serde_json::Value, crate::domains::tools::ToolError> {
        let params: ListArtistSongsParams = super::common::parse_arguments(arguments)?;
        let result = Self::execute(&params, &genius).await;
        Ok(super::common::http_response(result))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<ListArtistSongsParams>(),
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
                let params: ListArtistSongsParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params, &genius).await)
            }
            .boxed()
        })
    }
}
