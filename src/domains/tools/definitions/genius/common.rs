//! Common utilities shared across Genius tools.
//!
//! Tool failures are reported in-band: the result is flagged as an error and
//! its text is a JSON object `{ "error": true, "message": ..., <input> }`.

use rmcp::model::{CallToolResult, Content};
use serde_json::{Map, Value};
use tracing::warn;

use crate::domains::genius::{OutputFormat, Render};

/// Create an error result carrying the message and the offending input.
pub fn error_result(message: &str, input: Map<String, Value>) -> CallToolResult {
    warn!("{}", message);

    let mut body = Map::new();
    body.insert("error".to_string(), Value::Bool(true));
    body.insert("message".to_string(), Value::String(message.to_string()));
    body.extend(input);

    let text = serde_json::to_string_pretty(&Value::Object(body))
        .unwrap_or_else(|_| message.to_string());
    CallToolResult::error(vec![Content::text(text)])
}

/// Render a record as the tool's text content.
///
/// JSON output also carries the record as structured content.
pub fn render_result<R: Render>(record: &R, format: OutputFormat) -> CallToolResult {
    let text = match format.render(record) {
        Ok(text) => text,
        Err(e) => {
            return error_result(
                &format!("Failed to render the result: {e}"),
                Map::new(),
            );
        }
    };

    let structured = match format {
        OutputFormat::Json => serde_json::to_value(record)
            .map_err(|e| warn!("Failed to serialize structured content: {}", e))
            .ok(),
        OutputFormat::Text => None,
    };

    CallToolResult {
        content: vec![Content::text(text)],
        structured_content: structured,
        is_error: Some(false),
        meta: None,
    }
}

/// Parse HTTP tool arguments into a parameter struct.
#[cfg(feature = "http")]
pub fn parse_arguments<P: serde::de::DeserializeOwned>(
    arguments: serde_json::Value,
) -> Result<P, crate::domains::tools::ToolError> {
    let arguments = if arguments.is_null() {
        Value::Object(Map::new())
    } else {
        arguments
    };
    serde_json::from_value(arguments)
        .map_err(|e| crate::domains::tools::ToolError::invalid_arguments(e.to_string()))
}

/// Convert a tool result into the HTTP transport's JSON shape.
#[cfg(feature = "http")]
pub fn http_response(result: CallToolResult) -> serde_json::Value {
    let mut response = Map::new();
    response.insert(
        "content".to_string(),
        serde_json::to_value(&result.content).unwrap_or(Value::Array(vec![])),
    );
    response.insert(
        "isError".to_string(),
        Value::Bool(result.is_error.unwrap_or(false)),
    );
    if let Some(structured) = result.structured_content {
        response.insert("structuredContent".to_string(), structured);
    }
    Value::Object(response)
}

/// Text of the first content item, for inspecting results in tests.
#[cfg(test)]
pub fn result_text(result: &CallToolResult) -> String {
    match result.content.first().map(|c| &c.raw) {
        Some(rmcp::model::RawContent::Text(text)) => text.text.clone(),
        _ => panic!("Expected text content"),
    }
}
