//! JSON-RPC dispatcher for the MCP server.
//!
//! Transport-agnostic: both the SSE and stdio transports hand raw message
//! strings to [`McpServer::handle_message`] and forward whatever response it
//! produces. Notifications produce no response.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::gateway::ClipboardGateway;
use crate::mcp::types::{
    CallToolResult, Implementation, InitializeResult, JsonRpcError, JsonRpcRequest,
    JsonRpcResponse, ListToolsResult, McpTool, RequestId, ServerCapabilities, ToolsCapability,
    PROTOCOL_VERSION,
};
use crate::tools::{ToolError, ToolRegistry};

/// Server name reported in the initialize handshake.
const SERVER_NAME: &str = "clipboard-mcp";

/// MCP server routing requests to the clipboard tool registry.
pub struct McpServer {
    registry: ToolRegistry,
    gateway: Arc<ClipboardGateway>,
}

impl McpServer {
    pub fn new(registry: ToolRegistry, gateway: Arc<ClipboardGateway>) -> Self {
        Self { registry, gateway }
    }

    /// Handle one raw JSON-RPC message.
    ///
    /// Returns `None` when the message is a notification (no response is
    /// sent). Unparseable input yields a parse-error response so the client
    /// sees the failure instead of a silent drop.
    pub fn handle_message(&self, raw: &str) -> Option<JsonRpcResponse> {
        let request: JsonRpcRequest = match serde_json::from_str(raw) {
            Ok(request) => request,
            Err(e) => {
                warn!("unparseable JSON-RPC message: {}", e);
                return Some(JsonRpcResponse::error(
                    RequestId::Number(0),
                    JsonRpcError::parse_error(e.to_string()),
                ));
            }
        };
        self.handle_request(request)
    }

    /// Handle a decoded JSON-RPC request.
    pub fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        debug!(method = %request.method, "handling request");

        if request.is_notification() {
            // notifications/initialized and friends need no reply
            return None;
        }
        let id = request.id.clone().unwrap_or(RequestId::Number(0));

        let result = match request.method.as_str() {
            "initialize" => self.handle_initialize(),
            "ping" => Ok(serde_json::json!({})),
            "tools/list" => self.handle_tools_list(),
            "tools/call" => self.handle_tools_call(request.params),
            _ => Err(JsonRpcError::method_not_found(&request.method)),
        };

        Some(match result {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => JsonRpcResponse::error(id, error),
        })
    }

    fn handle_initialize(&self) -> Result<serde_json::Value, JsonRpcError> {
        let result = InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: Some(false),
                }),
            },
            server_info: Implementation::new(SERVER_NAME, env!("CARGO_PKG_VERSION")),
        };
        serde_json::to_value(result).map_err(|e| JsonRpcError::internal_error(e.to_string()))
    }

    fn handle_tools_list(&self) -> Result<serde_json::Value, JsonRpcError> {
        let tools = self
            .registry
            .list()
            .into_iter()
            .map(|descriptor| McpTool {
                name: descriptor.name,
                description: Some(descriptor.description),
                input_schema: descriptor.input_schema,
            })
            .collect();

        let result = ListToolsResult {
            tools,
            next_cursor: None,
        };
        serde_json::to_value(result).map_err(|e| JsonRpcError::internal_error(e.to_string()))
    }

    fn handle_tools_call(
        &self,
        params: Option<serde_json::Value>,
    ) -> Result<serde_json::Value, JsonRpcError> {
        let params = params.ok_or_else(|| JsonRpcError::invalid_params("Missing params"))?;

        let name = params
            .get("name")
            .and_then(|n| n.as_str())
            .ok_or_else(|| JsonRpcError::invalid_params("Missing tool name"))?;

        let arguments = params
            .get("arguments")
            .cloned()
            .unwrap_or_else(|| serde_json::json!({}));

        // Gateway outcomes (empty input, clipboard failure) come back as
        // plain strings; only argument-shape problems become RPC errors.
        let text = self
            .registry
            .invoke(&self.gateway, name, arguments)
            .map_err(|e| match e {
                ToolError::InvalidInput(msg) => JsonRpcError::invalid_params(msg),
                ToolError::Execution(msg) => JsonRpcError::internal_error(msg),
            })?;

        serde_json::to_value(CallToolResult::text(text))
            .map_err(|e| JsonRpcError::internal_error(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::clipboard::ClipboardWriter;
    use crate::mcp::types::error_codes;

    struct NullClipboard;

    impl ClipboardWriter for NullClipboard {
        fn write(&self, _text: &str) -> bool {
            true
        }
    }

    struct BrokenClipboard;

    impl ClipboardWriter for BrokenClipboard {
        fn write(&self, _text: &str) -> bool {
            false
        }
    }

    fn server() -> McpServer {
        McpServer::new(
            ToolRegistry::new(),
            Arc::new(ClipboardGateway::new(Arc::new(NullClipboard))),
        )
    }

    fn call(server: &McpServer, id: i64, method: &str, params: serde_json::Value) -> JsonRpcResponse {
        server
            .handle_request(JsonRpcRequest::new(RequestId::Number(id), method, Some(params)))
            .expect("request with id gets a response")
    }

    #[test]
    fn test_initialize() {
        let response = call(&server(), 1, "initialize", json!({}));

        let result = response.result.unwrap();
        assert_eq!(result["protocolVersion"], PROTOCOL_VERSION);
        assert_eq!(result["serverInfo"]["name"], "clipboard-mcp");
        assert!(result["capabilities"]["tools"].is_object());
    }

    #[test]
    fn test_tools_list_advertises_three_tools() {
        let response = call(&server(), 2, "tools/list", json!({}));

        let result = response.result.unwrap();
        let tools = result["tools"].as_array().unwrap();
        let names: Vec<&str> = tools.iter().map(|t| t["name"].as_str().unwrap()).collect();

        assert_eq!(
            names,
            [
                "save_code_to_clipboard",
                "save_command_to_clipboard",
                "save_to_clipboard",
            ]
        );
        for tool in tools {
            assert!(tool["inputSchema"]["properties"].is_object());
        }
    }

    #[test]
    fn test_tools_call_success() {
        let response = call(
            &server(),
            3,
            "tools/call",
            json!({"name": "save_to_clipboard", "arguments": {"content": "hello"}}),
        );

        let result = response.result.unwrap();
        assert_eq!(result["isError"], false);
        let text = result["content"][0]["text"].as_str().unwrap();
        assert!(text.contains("Saved to clipboard: hello"));
    }

    #[test]
    fn test_tools_call_empty_input_is_a_result_not_an_error() {
        let response = call(
            &server(),
            4,
            "tools/call",
            json!({"name": "save_to_clipboard", "arguments": {"content": "   "}}),
        );

        assert!(response.error.is_none());
        let result = response.result.unwrap();
        assert_eq!(
            result["content"][0]["text"],
            "Error: Cannot save empty content to clipboard"
        );
    }

    #[test]
    fn test_tools_call_clipboard_failure_is_a_result_not_an_error() {
        let broken = McpServer::new(
            ToolRegistry::new(),
            Arc::new(ClipboardGateway::new(Arc::new(BrokenClipboard))),
        );

        let response = call(
            &broken,
            5,
            "tools/call",
            json!({"name": "save_code_to_clipboard", "arguments": {"code": "x = 1"}}),
        );

        assert!(response.error.is_none());
        let text = response.result.unwrap()["content"][0]["text"]
            .as_str()
            .unwrap()
            .to_string();
        assert!(text.starts_with('\u{2717}'));
    }

    #[test]
    fn test_tools_call_unknown_tool() {
        let response = call(
            &server(),
            6,
            "tools/call",
            json!({"name": "save_screenshot", "arguments": {}}),
        );

        let error = response.error.unwrap();
        assert_eq!(error.code, error_codes::INVALID_PARAMS);
        assert!(error.message.contains("unknown tool"));
    }

    #[test]
    fn test_tools_call_missing_argument() {
        let response = call(
            &server(),
            7,
            "tools/call",
            json!({"name": "save_command_to_clipboard", "arguments": {}}),
        );

        let error = response.error.unwrap();
        assert_eq!(error.code, error_codes::INVALID_PARAMS);
    }

    #[test]
    fn test_unknown_method() {
        let response = call(&server(), 8, "resources/list", json!({}));

        let error = response.error.unwrap();
        assert_eq!(error.code, error_codes::METHOD_NOT_FOUND);
    }

    #[test]
    fn test_notification_gets_no_response() {
        let request = JsonRpcRequest::notification("notifications/initialized", None);
        assert!(server().handle_request(request).is_none());
    }

    #[test]
    fn test_handle_message_parse_error() {
        let response = server().handle_message("{not json").unwrap();

        let error = response.error.unwrap();
        assert_eq!(error.code, error_codes::PARSE_ERROR);
    }

    #[test]
    fn test_ping() {
        let response = call(&server(), 9, "ping", json!({}));
        assert_eq!(response.result.unwrap(), json!({}));
    }
}
