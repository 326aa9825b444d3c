//! Genius search tool.
//!
//! Searches Genius for songs, artists and web pages matching a free-text
//! query.

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

fn default_query() -> String {
    "All my life".to_string()
}

/// Parameters for the search tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchSongParams {
    /// Free-text query.
    #[schemars(description = "The song name to search for")]
    #[serde(default = "default_query")]
    pub q: String,

    #[schemars(description = "Output format: 'json' (default) or 'text'")]
    #[serde(default)]
    pub format: OutputFormat,
}

/// Genius Search Tool implementation.
#[derive(Debug, Clone)]
pub struct SearchSongTool;

impl SearchSongTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "genius-search-song";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Search for songs or web pages in Genius. Returns the matching hits (songs, artists, web pages) with their Genius IDs and URLs.";

    /// Execute the tool logic.
    pub async fn execute(params: &SearchSongParams, genius: &GeniusService) -> CallToolResult {
        info!("Searching Genius for: {}", params.q);

        match genius.search(&params.q).await {
            Ok(outcome) => render_result(&outcome, params.format),
            Err(e) => {
                let mut input = Map::new();
                input.insert("query".to_string(), Value::String(params.q.clone()));
                error_result(&format!("Error executing search in Genius: {e}"), input)
            }
        }
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        genius: Arc<GeniusService>,
    ) -> Result<serde_json::Value, crate::domains::tools::ToolError> {
        let params: SearchSongParams = super::common::parse_arguments(arguments)?;
        let result = Self::execute(&params, &genius).await;
        Ok(super::common::http_response(result))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<SearchSongParams>(),
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
                let params: SearchSongParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params, &genius).await)
            }
            .boxed()
        })
    }
}
