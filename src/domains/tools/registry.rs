//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - A registry of all available tools
//! - HTTP dispatch for tool calls (when http feature is enabled)
//! - Tool metadata for listing

use std::sync::Arc;
#[cfg(feature = "http")]
use tracing::warn;

use rmcp::model::Tool;

use crate::domains::genius::GeniusService;

#[cfg(feature = "http")]
use super::ToolError;
use super::definitions::{ListArtistSongsTool, SearchSongTool, SongLyricsTool};

/// Tool registry - manages all available tools.
pub struct ToolRegistry {
    #[cfg_attr(not(feature = "http"), allow(dead_code))]
    genius: Arc<GeniusService>,
}

impl ToolRegistry {
    /// Create a new tool registry.
    pub fn new(genius: Arc<GeniusService>) -> Self {
        Self { genius }
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        vec![
            SearchSongTool::NAME,
            SongLyricsTool::NAME,
            ListArtistSongsTool::NAME,
        ]
    }

    /// Get all tools as Tool models (metadata).
    pub fn get_all_tools() -> Vec<Tool> {
        vec![
            SearchSongTool::to_tool(),
            SongLyricsTool::to_tool(),
            ListArtistSongsTool::to_tool(),
        ]
    }

    /// Dispatch an HTTP tool call to the appropriate handler.
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, ToolError> {
        let genius = self.genius.clone();
        match name {
            SearchSongTool::NAME => SearchSongTool::http_handler(arguments, genius).await,
            SongLyricsTool::NAME => SongLyricsTool::http_handler(arguments, genius).await,
            ListArtistSongsTool::NAME => {
                ListArtistSongsTool::http_handler(arguments, genius).await
            }
            _ => {
                warn!("Unknown tool requested: {}", name);
                Err(ToolError::not_found(name))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_genius_config;

    fn test_registry() -> ToolRegistry {
        let genius = GeniusService::new(&test_genius_config("http://127.0.0.1:9")).unwrap();
        ToolRegistry::new(Arc::new(genius))
    }

    #[test]
    fn test_registry_tool_names() {
        let names = test_registry().tool_names();
        assert_eq!(names, vec![
            "genius-search-song",
            "genius-song-lyrics",
            "genius-list-artist-songs",
        ]);
    }

    #[test]
    fn test_all_tools_have_descriptions() {
        for tool in ToolRegistry::get_all_tools() {
            assert!(tool.description.is_some_and(|d| !d.is_empty()));
        }
    }

    #[cfg(feature = "http")]
    #[tokio::test]
    async fn test_registry_call_rejects_bounds() {
        let result = test_registry()
            .call_tool("genius-list-artist-songs", serde_json::json!({ "perPage": 100 }))
            .await
            .unwrap();
        assert_eq!(result["isError"], true);
    }

    #[cfg(feature = "http")]
    #[tokio::test]
    async fn test_registry_call_unknown() {
        let result = test_registry()
            .call_tool("unknown", serde_json::json!({}))
            .await;
        assert!(matches!(result, Err(ToolError::NotFound(_))));
    }
}
