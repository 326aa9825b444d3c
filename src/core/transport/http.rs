//! HTTP transport implementation.
//!
//! JSON-RPC over POST for clients that cannot speak STDIO, plus a `/health`
//! probe. Every request is answered statelessly except for the
//! initialization flag.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use rmcp::ErrorData as McpError;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{debug, info, instrument, warn};

use super::{TransportError, TransportResult, config::HttpConfig};
use crate::core::McpServer;
use crate::core::server::INSTRUCTIONS;

const JSONRPC_VERSION: &str = "2.0";

/// Protocol version answered when the client does not propose one.
const DEFAULT_PROTOCOL_VERSION: &str = "2024-11-05";

/// HTTP transport handler.
pub struct HttpTransport {
    config: HttpConfig,
}

/// JSON-RPC request structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

/// JSON-RPC response structure. Exactly one of `result` and `error` is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC error object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcError {
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;

    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(Self::INVALID_PARAMS, message)
    }
}

impl From<McpError> for JsonRpcError {
    fn from(err: McpError) -> Self {
        Self {
            code: err.code.0,
            message: err.message.into_owned(),
            data: err.data,
        }
    }
}

impl JsonRpcResponse {
    /// Wrap a dispatch outcome for the request with the given id.
    pub fn from_outcome(id: Option<Value>, outcome: Result<Value, JsonRpcError>) -> Self {
        let (result, error) = match outcome {
            Ok(result) => (Some(result), None),
            Err(error) => (None, Some(error)),
        };
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result,
            error,
        }
    }
}

/// Application state shared across HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// The MCP server instance.
    server: McpServer,
    /// Path of the JSON-RPC endpoint, advertised by `/`.
    rpc_path: Arc<str>,
    /// Set once a client has sent `notifications/initialized`.
    initialized: Arc<AtomicBool>,
}

impl AppState {
    fn new(server: McpServer, rpc_path: &str) -> Self {
        Self {
            server,
            rpc_path: Arc::from(rpc_path),
            initialized: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl HttpTransport {
    /// Create a new HTTP transport with the given config.
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Assemble the axum application around the server.
    fn router(&self, server: McpServer) -> Router {
        let app = Router::new()
            .route(&self.config.rpc_path, post(handle_rpc))
            .route("/health", get(health_check))
            .route("/", get(root_handler))
            .with_state(AppState::new(server, &self.config.rpc_path))
            .layer(TraceLayer::new_for_http());

        if !self.config.enable_cors {
            return app;
        }
        app.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
    }

    /// Bind and serve until the listener fails.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let addr = self.address();
        let app = self.router(server);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        info!(
            "Ready - JSON-RPC on POST http://{}{} (CORS {}), health on GET /health",
            addr,
            self.config.rpc_path,
            if self.config.enable_cors { "on" } else { "off" }
        );

        axum::serve(listener, app)
            .await
            .map_err(|e| TransportError::http(e.to_string()))
    }
}

/// Root handler - provides API info.
async fn root_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "name": state.server.name(),
        "version": state.server.version(),
        "transport": "HTTP",
        "endpoints": {
            "rpc": &*state.rpc_path,
            "health": "/health"
        },
        "protocol": "JSON-RPC 2.0",
        "documentation": format!("Send POST requests to {} with JSON-RPC messages", state.rpc_path)
    }))
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Handle JSON-RPC requests.
#[instrument(skip_all, fields(method))]
async fn handle_rpc(
    State(state): State<AppState>,
    Json(request): Json<JsonRpcRequest>,
) -> impl IntoResponse {
    tracing::Span::current().record("method", &request.method);
    info!("Received JSON-RPC request: {}", request.method);

    (StatusCode::OK, Json(process_request(&state, request).await))
}

/// Validate the envelope, dispatch, and wrap the outcome.
async fn process_request(state: &AppState, request: JsonRpcRequest) -> JsonRpcResponse {
    let JsonRpcRequest {
        jsonrpc,
        id,
        method,
        params,
    } = request;

    let outcome = if jsonrpc == JSONRPC_VERSION {
        dispatch(state, &method, params.as_ref()).await
    } else {
        Err(JsonRpcError::new(JsonRpcError::INVALID_REQUEST, "Invalid Request"))
    };

    JsonRpcResponse::from_outcome(id, outcome)
}

async fn dispatch(
    state: &AppState,
    method: &str,
    params: Option<&Value>,
) -> Result<Value, JsonRpcError> {
    let server = &state.server;

    match method {
        "initialize" => Ok(initialize(state, params)),
        "ping" => Ok(json!({})),
        "tools/list" => Ok(json!({ "tools": server.list_tools() })),
        "tools/call" => {
            let name = required_str(params, "name")?;
            let arguments = params
                .and_then(|p| p.get("arguments"))
                .cloned()
                .unwrap_or_else(|| json!({}));
            server
                .call_tool(name, arguments)
                .await
                .map_err(JsonRpcError::invalid_params)
        }
        "resources/list" => Ok(json!({ "resources": server.list_resources().await })),
        "resources/templates/list" => Ok(json!({
            "resourceTemplates": server.list_resource_templates().await
        })),
        "resources/read" => {
            let uri = required_str(params, "uri")?;
            Ok(server.read_resource(uri).await?)
        }
        "prompts/list" => Ok(json!({ "prompts": server.list_prompts().await })),
        "prompts/get" => {
            let name = required_str(params, "name")?;
            let arguments = params.and_then(|p| p.get("arguments")).cloned();
            server
                .get_prompt(name, arguments)
                .await
                .map_err(JsonRpcError::invalid_params)
        }
        // Stateless HTTP: notifications are acknowledged with a null result.
        notification if notification.starts_with("notifications/") => {
            handle_notification(state, notification);
            Ok(Value::Null)
        }
        unknown => {
            warn!("Unknown method: {}", unknown);
            Err(JsonRpcError::new(
                JsonRpcError::METHOD_NOT_FOUND,
                "Method not found",
            ))
        }
    }
}

/// A string parameter that must be present.
fn required_str<'a>(params: Option<&'a Value>, key: &str) -> Result<&'a str, JsonRpcError> {
    let params = params.ok_or_else(|| JsonRpcError::invalid_params("Missing params"))?;
    params
        .get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| JsonRpcError::invalid_params(format!("Missing {key}")))
}

/// Answer `initialize`, echoing the client's proposed protocol version.
fn initialize(state: &AppState, params: Option<&Value>) -> Value {
    let protocol_version = params
        .and_then(|p| p.get("protocolVersion"))
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_PROTOCOL_VERSION);
    state.initialized.store(false, Ordering::SeqCst);

    info!("Initializing HTTP session (protocol {})", protocol_version);

    json!({
        "protocolVersion": protocol_version,
        "capabilities": {
            "tools": {},
            "resources": {},
            "prompts": {}
        },
        "serverInfo": {
            "name": state.server.name(),
            "version": state.server.version()
        },
        "instructions": INSTRUCTIONS
    })
}

fn handle_notification(state: &AppState, method: &str) {
    if method == "notifications/initialized" {
        info!("Client sent initialized notification");
        state.initialized.store(true, Ordering::SeqCst);
    } else {
        debug!("Received notification: {}", method);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;
    use crate::test_utils::{StubRoute, song_body, spawn_stub_with, test_genius_config};
    use serde_json::json;

    fn state_for(api_base: &str) -> AppState {
        let config = Config {
            genius: test_genius_config(api_base),
            ..Config::default()
        };
        AppState::new(McpServer::new(config).unwrap(), "/mcp")
    }

    fn request(method: &str, params: serde_json::Value) -> JsonRpcRequest {
        JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id: Some(json!(1)),
            method: method.to_string(),
            params: Some(params),
        }
    }

    #[tokio::test]
    async fn test_initialize_echoes_protocol_version() {
        let state = state_for("http://127.0.0.1:9");
        let response =
            process_request(&state, request("initialize", json!({ "protocolVersion": "2025-06-18" })))
                .await;

        let result = response.result.unwrap();
        assert_eq!(result["protocolVersion"], "2025-06-18");
        assert_eq!(result["serverInfo"]["name"], "genius");
    }

    #[tokio::test]
    async fn test_initialized_notification_sets_flag() {
        let state = state_for("http://127.0.0.1:9");
        process_request(&state, request("notifications/initialized", json!({}))).await;
        assert!(state.initialized.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_rejects_wrong_jsonrpc_version() {
        let state = state_for("http://127.0.0.1:9");
        let mut req = request("tools/list", json!({}));
        req.jsonrpc = "1.0".to_string();

        let response = process_request(&state, req).await;
        assert_eq!(response.error.unwrap().code, -32600);
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let state = state_for("http://127.0.0.1:9");
        let response = process_request(&state, request("songs/dance", json!({}))).await;
        assert_eq!(response.error.unwrap().code, -32601);
    }

    #[tokio::test]
    async fn test_resource_templates_list() {
        let state = state_for("http://127.0.0.1:9");
        let response =
            process_request(&state, request("resources/templates/list", json!({}))).await;

        let templates = response.result.unwrap()["resourceTemplates"].clone();
        assert_eq!(templates.as_array().map(Vec::len), Some(3));
    }

    #[tokio::test]
    async fn test_resources_read_song() {
        let base = spawn_stub_with(|base| {
            vec![StubRoute::json("/songs/9", 200, song_body(9, &format!("{base}/page")))]
        })
        .await;
        let state = state_for(&base);

        let response =
            process_request(&state, request("resources/read", json!({ "uri": "genius://songs/9" })))
                .await;
        let contents = response.result.unwrap()["contents"].clone();
        assert_eq!(contents[0]["uri"], "genius://songs/9");
        assert_eq!(contents[0]["mimeType"], "application/json");
    }

    #[tokio::test]
    async fn test_resources_read_unknown_uri_uses_mcp_code() {
        let state = state_for("http://127.0.0.1:9");
        let response =
            process_request(&state, request("resources/read", json!({ "uri": "genius://albums/1" })))
                .await;
        assert_eq!(response.error.unwrap().code, -32002);
    }

    #[tokio::test]
    async fn test_tools_call_unknown_tool() {
        let state = state_for("http://127.0.0.1:9");
        let response =
            process_request(&state, request("tools/call", json!({ "name": "nope" }))).await;

        let error = response.error.unwrap();
        assert_eq!(error.code, -32602);
        assert_eq!(error.message, "Unknown tool: nope");
    }
}
