//! Tool Router - builds the rmcp ToolRouter from the tool definitions.
//!
//! This module builds the ToolRouter for STDIO transport by delegating
//! to the tool definitions themselves. Each tool knows how to create its own route.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

use crate::domains::genius::GeniusService;

use super::definitions::{ListArtistSongsTool, SearchSongTool, SongLyricsTool};

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(genius: Arc<GeniusService>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(SearchSongTool::create_route(genius.clone()))
        .with_route(SongLyricsTool::create_route(genius.clone()))
        .with_route(ListArtistSongsTool::create_route(genius))
}

#[cfg(test)]
mod tests {
    use super::super::registry::ToolRegistry;
    use super::*;
    use crate::test_utils::test_genius_config;

    struct TestServer {}

    fn test_genius() -> Arc<GeniusService> {
        Arc::new(GeniusService::new(&test_genius_config("http://127.0.0.1:9")).unwrap())
    }

    #[test]
    fn test_build_router() {
        let router: ToolRouter<TestServer> = build_tool_router(test_genius());
        let tools = router.list_all();
        assert_eq!(tools.len(), 3);

        let names: Vec<_> = tools.iter().map(|t| t.name.as_ref()).collect();
        assert!(names.contains(&"genius-search-song"));
        assert!(names.contains(&"genius-song-lyrics"));
        assert!(names.contains(&"genius-list-artist-songs"));
    }

    #[test]
    fn test_registry_matches_router() {
        let genius = test_genius();
        let registry = ToolRegistry::new(genius.clone());
        let registry_names = registry.tool_names();

        let router: ToolRouter<TestServer> = build_tool_router(genius);
        let router_tools = router.list_all();
        let router_names: Vec<_> = router_tools.iter().map(|t| t.name.as_ref()).collect();

        assert_eq!(registry_names.len(), router_names.len());
        for name in registry_names {
            assert!(router_names.contains(&name));
        }
    }

    #[test]
    fn test_input_schemas_use_camel_case() {
        let router: ToolRouter<TestServer> = build_tool_router(test_genius());
        let tools = router.list_all();
        let lyrics = tools
            .iter()
            .find(|t| t.name == SongLyricsTool::NAME)
            .unwrap();
        let properties = lyrics.input_schema.get("properties").unwrap();
        assert!(properties.get("songId").is_some());
        assert!(properties.get("format").is_some());
    }
}
