//! Protocol Dispatcher - one request in, at most one response out

use std::sync::Arc;

use serde_json::{Value, json};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::config::Config;
use crate::error::{BridgeError, Result};
use crate::gateway::Gateway;
use crate::protocol::{
    RpcError, RpcRequest, RpcResponse, ToolCallParams, ToolCallResult, ToolListResult, decode_line, encode_message,
    initialize_result,
};
use crate::tools::{ToolContext, ToolRegistry};

/// Lifecycle of a dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatcherState {
    /// No tool registry yet; every request is answered with an internal error
    Uninitialized,
    /// Registry installed; requests are handled statelessly
    Ready,
}

/// Counters reported when the input stream ends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServeStats {
    pub responses: u64,
    pub notifications: u64,
    pub discarded: u64,
}

/// Routes protocol methods to the tool registry
pub struct Dispatcher {
    name: String,
    version: String,
    registry: Option<ToolRegistry>,
}

impl Dispatcher {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            registry: None,
        }
    }

    /// Ready dispatcher with the tool set selected in `config`
    pub fn from_config(config: Arc<Config>, gateway: Arc<dyn Gateway>) -> Result<Self> {
        let mut dispatcher = Self::new(config.server.name.clone(), config.server.version.clone());
        let tool_set = config.server.tool_set;
        let registry = ToolRegistry::for_tool_set(tool_set, ToolContext::new(gateway, config))?;
        dispatcher.install(registry);
        Ok(dispatcher)
    }

    /// Install the tool registry, moving to `Ready`
    pub fn install(&mut self, registry: ToolRegistry) {
        log::info!("Dispatcher ready with {} tools", registry.len());
        self.registry = Some(registry);
    }

    pub fn state(&self) -> DispatcherState {
        match self.registry {
            Some(_) => DispatcherState::Ready,
            None => DispatcherState::Uninitialized,
        }
    }

    pub fn registry(&self) -> Option<&ToolRegistry> {
        self.registry.as_ref()
    }

    /// Handle one request; notifications produce no response
    pub async fn handle(&self, request: RpcRequest) -> Option<RpcResponse> {
        let Some(id) = request.id else {
            log::debug!("Notification: {}", request.method);
            return None;
        };
        log::debug!("Request {}: {}", id, request.method);

        let Some(registry) = &self.registry else {
            return Some(RpcResponse::error(
                id,
                RpcError::internal_error("Server is not initialized"),
            ));
        };

        let outcome = match request.method.as_str() {
            "initialize" => Ok(initialize_result(&self.name, &self.version)),
            "ping" => Ok(json!({})),
            "tools/list" => to_result(&ToolListResult {
                tools: registry.list_tools(),
            }),
            "tools/call" => Self::call_tool(registry, request.params).await,
            other => Err(RpcError::method_not_found(other)),
        };

        Some(match outcome {
            Ok(result) => RpcResponse::success(id, result),
            Err(error) => {
                log::info!("Request {} failed: {} ({})", id, error.message, error.code);
                RpcResponse::error(id, error)
            }
        })
    }

    async fn call_tool(registry: &ToolRegistry, params: Value) -> std::result::Result<Value, RpcError> {
        let params: ToolCallParams = serde_json::from_value(params)
            .map_err(|e| RpcError::invalid_params(format!("Invalid tools/call params: {}", e)))?;

        match registry.call_tool(&params.name, params.arguments).await {
            Ok(result) => to_result(&ToolCallResult::from(result)),
            Err(BridgeError::ToolNotFound(name)) => Err(RpcError::tool_not_found(&name)),
            Err(e) => Err(RpcError::internal_error(e.to_string())),
        }
    }

    /// Serve newline-delimited requests until `reader` reaches end of input
    ///
    /// Each parsed request is answered and flushed before the next line is
    /// read. Malformed lines are skipped. Only I/O failures end the loop early.
    pub async fn run<R, W>(&self, reader: R, mut writer: W) -> Result<ServeStats>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut reader = reader;
        let mut stats = ServeStats::default();
        let mut buf = Vec::new();

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf).await? == 0 {
                break;
            }

            let line = String::from_utf8_lossy(&buf);
            let Some(request) = decode_line(&line) else {
                if !line.trim().is_empty() {
                    stats.discarded += 1;
                }
                continue;
            };

            match self.handle(request).await {
                Some(response) => {
                    writer.write_all(encode_message(&response)?.as_bytes()).await?;
                    writer.flush().await?;
                    stats.responses += 1;
                }
                None => stats.notifications += 1,
            }
        }

        log::info!(
            "Input closed: {} responses, {} notifications, {} discarded lines",
            stats.responses,
            stats.notifications,
            stats.discarded
        );
        Ok(stats)
    }
}

fn to_result<T: serde::Serialize>(value: &T) -> std::result::Result<Value, RpcError> {
    serde_json::to_value(value).map_err(|e| RpcError::internal_error(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::{HttpMethod, MockGateway, Service};
    use crate::protocol::ErrorCode;

    fn dispatcher(gateway: MockGateway) -> Dispatcher {
        let mut config = Config::default();
        config.bitbucket.workspace = Some("acme".to_string());
        Dispatcher::from_config(Arc::new(config), Arc::new(gateway)).unwrap()
    }

    #[tokio::test]
    async fn test_uninitialized_answers_internal_error() {
        let dispatcher = Dispatcher::new("test", "0.0.0");
        assert_eq!(dispatcher.state(), DispatcherState::Uninitialized);

        let response = dispatcher
            .handle(RpcRequest::new(1, "tools/list", Value::Null))
            .await
            .unwrap();
        assert_eq!(response.error.unwrap().code, ErrorCode::INTERNAL_ERROR);
    }

    #[tokio::test]
    async fn test_initialize() {
        let dispatcher = dispatcher(MockGateway::new());
        assert_eq!(dispatcher.state(), DispatcherState::Ready);

        let response = dispatcher
            .handle(RpcRequest::new(1, "initialize", json!({})))
            .await
            .unwrap();
        let result = response.result.unwrap();
        assert_eq!(result["protocolVersion"], "2024-11-05");
        assert_eq!(result["serverInfo"]["name"], "atlassian-mcp-server");
    }

    #[tokio::test]
    async fn test_notification_gets_no_response() {
        let dispatcher = dispatcher(MockGateway::new());
        assert!(dispatcher
            .handle(RpcRequest::notification("notifications/initialized"))
            .await
            .is_none());
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let dispatcher = dispatcher(MockGateway::new());
        let response = dispatcher
            .handle(RpcRequest::new("req-9", "resources/list", Value::Null))
            .await
            .unwrap();
        assert_eq!(response.id, json!("req-9"));
        assert_eq!(response.error.unwrap().code, -32601);
    }

    #[tokio::test]
    async fn test_unknown_tool_echoes_id() {
        let dispatcher = dispatcher(MockGateway::new());
        let response = dispatcher
            .handle(RpcRequest::new(42, "tools/call", json!({"name": "frobnicate", "arguments": {}})))
            .await
            .unwrap();
        assert_eq!(response.id, json!(42));
        let error = response.error.unwrap();
        assert_eq!(error.code, -32601);
        assert!(error.message.contains("frobnicate"));
    }

    #[tokio::test]
    async fn test_missing_tool_name_is_invalid_params() {
        let dispatcher = dispatcher(MockGateway::new());
        let response = dispatcher
            .handle(RpcRequest::new(3, "tools/call", json!({"arguments": {}})))
            .await
            .unwrap();
        assert_eq!(response.error.unwrap().code, ErrorCode::INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_tool_call_validation_error_is_content() {
        let dispatcher = dispatcher(MockGateway::new());
        let response = dispatcher
            .handle(RpcRequest::new(5, "tools/call", json!({"name": "get_jira_issue"})))
            .await
            .unwrap();
        let result = response.result.unwrap();
        assert_eq!(result["isError"], true);
        assert_eq!(
            result["content"][0]["text"],
            "Validation failed: Missing required argument: issue_key"
        );
    }

    #[tokio::test]
    async fn test_tool_call_success() {
        let dispatcher = dispatcher(MockGateway::new().on(
            Service::Bitbucket,
            HttpMethod::Get,
            "repositories/acme/api/refs/branches",
            json!({"values": [{"name": "main"}]}),
        ));
        let response = dispatcher
            .handle(RpcRequest::new(
                6,
                "tools/call",
                json!({"name": "list_branches", "arguments": {"repo_name": "api"}}),
            ))
            .await
            .unwrap();
        let result = response.result.unwrap();
        assert_eq!(result["isError"], false);
        assert_eq!(result["content"][0]["type"], "text");
        assert!(result["content"][0]["text"].as_str().unwrap().starts_with("Found 1 branch(es) in api:"));
    }

    #[tokio::test]
    async fn test_run_skips_blank_and_malformed_lines() {
        let dispatcher = dispatcher(MockGateway::new());
        let input = b"\n{oops\n{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"ping\"}\n";
        let mut output = Vec::new();

        let stats = dispatcher.run(&input[..], &mut output).await.unwrap();
        assert_eq!(stats, ServeStats { responses: 1, notifications: 0, discarded: 1 });

        let text = String::from_utf8(output).unwrap();
        assert_eq!(text, "{\"jsonrpc\":\"2.0\",\"id\":1,\"result\":{}}\n");
    }

    #[tokio::test]
    async fn test_run_handles_last_line_without_newline() {
        let dispatcher = dispatcher(MockGateway::new());
        let input = b"{\"id\":2,\"method\":\"ping\"}";
        let mut output = Vec::new();

        let stats = dispatcher.run(&input[..], &mut output).await.unwrap();
        assert_eq!(stats.responses, 1);
    }
}
