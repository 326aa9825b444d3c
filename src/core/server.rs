//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol by delegating to domain-specific services.
//!
//! One `GeniusService` is built at startup and shared by the tool router,
//! the resource service and (for HTTP) the tool registry.
//!
//! Tools live in `domains/tools/definitions/`, one file per tool, and are
//! routed through `domains/tools/router.rs`.

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, handler::server::tool::ToolRouter, model::*,
    service::RequestContext, tool_handler,
};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, instrument};

use super::config::Config;
use super::error::Error;
use crate::domains::{
    genius::GeniusService,
    prompts::PromptService,
    resources::{ResourceError, ResourceService},
    tools::build_tool_router,
};

#[cfg(feature = "http")]
use crate::domains::tools::ToolRegistry;

/// The main MCP server handler.
///
/// This struct implements the `ServerHandler` trait from rmcp and coordinates
/// between different domain services to handle MCP protocol messages.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Service for handling resource-related requests.
    resource_service: Arc<ResourceService>,

    /// Service for handling prompt-related requests.
    prompt_service: Arc<PromptService>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,

    /// Tool dispatch for the HTTP transport.
    #[cfg(feature = "http")]
    tool_registry: Arc<ToolRegistry>,
}

impl McpServer {
    /// Create a new MCP server with the given configuration.
    ///
    /// Fails only if the HTTP client cannot be built. A missing Genius
    /// credential is reported per call, not here.
    pub fn new(config: Config) -> Result<Self, Error> {
        let config = Arc::new(config);
        let genius = Arc::new(GeniusService::new(&config.genius)?);
        info!("Genius API at {}", genius.client().api_base());

        let resource_service = Arc::new(ResourceService::new(
            config.resources.clone(),
            genius.clone(),
        ));
        let prompt_service = Arc::new(PromptService::new(config.prompts.clone()));

        Ok(Self {
            tool_router: build_tool_router::<Self>(genius.clone()),
            #[cfg(feature = "http")]
            tool_registry: Arc::new(ToolRegistry::new(genius)),
            config,
            resource_service,
            prompt_service,
        })
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    // HTTP transport support: the same operations, as plain JSON.

    /// List all available tools.
    pub fn list_tools(&self) -> Vec<Value> {
        to_json_list(self.tool_router.list_all())
    }

    /// Call a tool by name (for HTTP transport).
    ///
    /// Genius failures come back as `isError` results; only unknown tools
    /// and malformed arguments are errors here.
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: Value,
    ) -> Result<Value, String> {
        self.tool_registry
            .call_tool(name, arguments)
            .await
            .map_err(|e| e.to_string())
    }

    /// List all concrete resources.
    pub async fn list_resources(&self) -> Vec<Value> {
        to_json_list(self.resource_service.list_resources().await)
    }

    /// Read a resource by URI.
    pub async fn read_resource(&self, uri: &str) -> Result<Value, McpError> {
        let result = self
            .resource_service
            .read_resource(uri)
            .await
            .map_err(resource_error)?;
        Ok(json!({ "contents": result.contents }))
    }

    /// List all resource templates.
    pub async fn list_resource_templates(&self) -> Vec<Value> {
        to_json_list(self.resource_service.list_resource_templates().await)
    }

    /// List all prompts.
    pub async fn list_prompts(&self) -> Vec<Value> {
        to_json_list(self.prompt_service.list_prompts().await)
    }

    /// Render a prompt. Non-string argument values are ignored.
    pub async fn get_prompt(
        &self,
        name: &str,
        arguments: Option<Value>,
    ) -> Result<Value, String> {
        let arguments = arguments
            .as_ref()
            .and_then(Value::as_object)
            .map(string_arguments);

        let result = self
            .prompt_service
            .get_prompt(name, arguments)
            .await
            .map_err(|e| e.to_string())?;
        Ok(json!({
            "description": result.description,
            "messages": result.messages
        }))
    }
}

/// Serialize rmcp models, skipping any that fail.
fn to_json_list<T: serde::Serialize>(items: Vec<T>) -> Vec<Value> {
    items
        .into_iter()
        .filter_map(|item| serde_json::to_value(item).ok())
        .collect()
}

/// Keep the string-valued prompt arguments.
fn string_arguments(map: &serde_json::Map<String, Value>) -> HashMap<String, String> {
    map.iter()
        .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
        .collect()
}

/// Map a resource failure onto the MCP error codes.
fn resource_error(err: ResourceError) -> McpError {
    match err {
        ResourceError::NotFound(_) => McpError::resource_not_found(err.to_string(), None),
        ResourceError::InvalidUri(_) => McpError::invalid_params(err.to_string(), None),
        ResourceError::Upstream { .. } => McpError::internal_error(err.to_string(), None),
    }
}

/// Usage notes sent to clients on initialization.
pub const INSTRUCTIONS: &str = "Genius music knowledge base. Use genius-search-song to find \
    songs, artists and pages, genius-song-lyrics to read a song with its lyrics, and \
    genius-list-artist-songs to page through an artist's songs. Song and artist details are \
    also available as resources under genius://songs/{id}, genius://songs/{id}/lyrics and \
    genius://artists/{id}.";

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: self.config.server.name.clone(),
                version: self.config.server.version.clone(),
                ..Default::default()
            },
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .enable_prompts()
                .build(),
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        info!("Listing resources");
        let resources = self.resource_service.list_resources().await;
        Ok(ListResourcesResult {
            resources,
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn list_resource_templates(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourceTemplatesResult, McpError> {
        info!("Listing resource templates");
        let templates = self.resource_service.list_resource_templates().await;
        Ok(ListResourceTemplatesResult {
            resource_templates: templates,
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        info!("Reading resource: {}", request.uri);
        self.resource_service
            .read_resource(&request.uri)
            .await
            .map_err(resource_error)
    }

    #[instrument(skip(self, _context))]
    async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        info!("Listing prompts");
        let prompts = self.prompt_service.list_prompts().await;
        Ok(ListPromptsResult {
            prompts,
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        info!("Getting prompt: {}", request.name);
        let arguments = request.arguments.as_ref().map(string_arguments);
        self.prompt_service
            .get_prompt(&request.name, arguments)
            .await
            .map_err(|e| McpError::invalid_params(e.to_string(), None))
    }
}
