//! JSON-RPC 2.0 envelopes and tool protocol result shapes.
//!
//! Requests without an `id` are notifications and never get a response.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::tools::{ToolDefinition, ToolResult};

/// Protocol revision reported by `initialize`.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// Version tag carried by every envelope.
pub const JSONRPC_VERSION: &str = "2.0";

/// Request read from the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jsonrpc: Option<String>,
    /// Absent for notifications; an explicit `null` is still a request.
    #[serde(default, deserialize_with = "present_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

impl RpcRequest {
    pub fn new(id: impl Into<Value>, method: impl Into<String>, params: Value) -> Self {
        Self {
            jsonrpc: Some(JSONRPC_VERSION.to_string()),
            id: Some(id.into()),
            method: method.into(),
            params,
        }
    }

    /// A request that expects no response.
    pub fn notification(method: impl Into<String>) -> Self {
        Self {
            jsonrpc: Some(JSONRPC_VERSION.to_string()),
            id: None,
            method: method.into(),
            params: Value::Null,
        }
    }

    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

/// Only called when the member exists, so `"id": null` becomes `Some(Null)`.
fn present_id<'de, D>(deserializer: D) -> std::result::Result<Option<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Response written back to the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcResponse {
    pub jsonrpc: String,
    /// Same id as the request.
    pub id: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

impl RpcResponse {
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: Value, error: RpcError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: None,
            error: Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Error object in a response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl RpcError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    /// Method not found (-32601).
    pub fn method_not_found(method: &str) -> Self {
        Self::new(ErrorCode::METHOD_NOT_FOUND, format!("Method not found: {}", method))
    }

    /// Tool not found, reported with the method-not-found code (-32601).
    pub fn tool_not_found(name: &str) -> Self {
        Self::new(ErrorCode::METHOD_NOT_FOUND, format!("Unknown tool: {}", name))
    }

    /// Invalid params (-32602).
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::INVALID_PARAMS, message)
    }

    /// Internal error (-32603).
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::INTERNAL_ERROR, message)
    }
}

/// Standard error codes.
pub struct ErrorCode;

impl ErrorCode {
    /// Unknown method or tool.
    pub const METHOD_NOT_FOUND: i32 = -32601;
    /// Malformed `params`.
    pub const INVALID_PARAMS: i32 = -32602;
    /// Unexpected server failure.
    pub const INTERNAL_ERROR: i32 = -32603;
}

/// Params of `tools/call`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ToolCallParams {
    pub name: String,
    #[serde(default)]
    pub arguments: Value,
}

/// One block of tool output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Content {
    Text { text: String },
}

/// Result of `tools/call`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCallResult {
    pub content: Vec<Content>,
    #[serde(rename = "isError")]
    pub is_error: bool,
}

impl From<ToolResult> for ToolCallResult {
    fn from(result: ToolResult) -> Self {
        Self {
            content: vec![Content::Text { text: result.content }],
            is_error: result.is_error,
        }
    }
}

/// Result of `tools/list`.
#[derive(Debug, Clone, Serialize)]
pub struct ToolListResult {
    pub tools: Vec<ToolDefinition>,
}

/// Result of `initialize`.
pub fn initialize_result(name: &str, version: &str) -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": {"tools": {}},
        "serverInfo": {"name": name, "version": version}
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_deserialize() {
        let request: RpcRequest =
            serde_json::from_str(r#"{"jsonrpc":"2.0","id":7,"method":"tools/list"}"#).unwrap();
        assert_eq!(request.id, Some(json!(7)));
        assert_eq!(request.method, "tools/list");
        assert_eq!(request.params, Value::Null);
        assert!(!request.is_notification());
    }

    #[test]
    fn test_request_string_id() {
        let request: RpcRequest = serde_json::from_str(r#"{"id":"abc","method":"initialize","params":{}}"#).unwrap();
        assert_eq!(request.id, Some(json!("abc")));
    }

    #[test]
    fn test_notification() {
        let request: RpcRequest =
            serde_json::from_str(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#).unwrap();
        assert!(request.is_notification());
        assert!(RpcRequest::notification("x").is_notification());
    }

    #[test]
    fn test_null_id_is_a_request() {
        let request: RpcRequest = serde_json::from_str(r#"{"jsonrpc":"2.0","id":null,"method":"ping"}"#).unwrap();
        assert_eq!(request.id, Some(Value::Null));
        assert!(!request.is_notification());
    }

    #[test]
    fn test_success_response_shape() {
        let response = RpcResponse::success(json!(1), json!({"ok": true}));
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value, json!({"jsonrpc": "2.0", "id": 1, "result": {"ok": true}}));
        assert!(response.is_success());
    }

    #[test]
    fn test_error_response_shape() {
        let response = RpcResponse::error(json!("a"), RpcError::tool_not_found("nope"));
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["error"]["code"], -32601);
        assert_eq!(value["error"]["message"], "Unknown tool: nope");
        assert_eq!(value["id"], "a");
        assert!(value.get("result").is_none());
        assert!(value["error"].get("data").is_none());
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(RpcError::method_not_found("x").code, -32601);
        assert_eq!(RpcError::invalid_params("x").code, -32602);
        assert_eq!(RpcError::internal_error("x").code, -32603);
    }

    #[test]
    fn test_tool_call_result_shape() {
        let result: ToolCallResult = ToolResult::error("Error getting issue: boom").into();
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(
            value,
            json!({"content": [{"type": "text", "text": "Error getting issue: boom"}], "isError": true})
        );
    }

    #[test]
    fn test_tool_call_params_default_arguments() {
        let params: ToolCallParams = serde_json::from_value(json!({"name": "get_jira_issue"})).unwrap();
        assert_eq!(params.arguments, Value::Null);
        assert!(serde_json::from_value::<ToolCallParams>(json!({"arguments": {}})).is_err());
    }

    #[test]
    fn test_initialize_result() {
        let value = initialize_result("atlassian-mcp-server", "0.1.0");
        assert_eq!(value["protocolVersion"], PROTOCOL_VERSION);
        assert_eq!(value["serverInfo"]["name"], "atlassian-mcp-server");
        assert_eq!(value["capabilities"]["tools"], json!({}));
    }
}
