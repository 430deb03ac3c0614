use crate::app::App;
use crate::errors::{ErrorCode, McpError, ToolError};
use crate::mcp::catalog::{tool_by_name, tool_catalog};
use crate::mcp::protocol::{JsonRpcRequest, JsonRpcResponse};
use crate::services::logger::Logger;
use crate::services::request_context::RequestContext;
use serde_json::Value;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};

pub const PROTOCOL_VERSION: &str = "2025-06-18";
pub const SERVER_NAME: &str = "vertex-search-mcp";
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

fn text_result(text: &str) -> Value {
    serde_json::json!({
        "content": [ { "type": "text", "text": text } ]
    })
}

/// Tool failures stay inside the result so the calling agent can read them.
/// The text is the bare message; classification rides in `structuredContent`.
fn tool_error_result(error: &ToolError) -> Value {
    serde_json::json!({
        "content": [ { "type": "text", "text": error.message } ],
        "structuredContent": { "error": error },
        "isError": true
    })
}

#[derive(Clone)]
pub struct McpServer {
    app: Arc<App>,
    logger: Logger,
}

impl McpServer {
    pub fn new(app: App) -> Self {
        let logger = app.logger.child("server");
        Self {
            app: Arc::new(app),
            logger,
        }
    }

    pub fn is_debug(&self) -> bool {
        self.app.is_debug
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    fn handle_initialize(&self) -> Value {
        serde_json::json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {"tools": {"listChanged": false}},
            "serverInfo": {"name": SERVER_NAME, "version": SERVER_VERSION},
        })
    }

    fn handle_tools_list(&self) -> Value {
        serde_json::json!({ "tools": tool_catalog() })
    }

    async fn handle_tools_call(
        &self,
        params: &Value,
        ctx: &RequestContext,
    ) -> Result<Value, McpError> {
        let name = params.get("name").and_then(|v| v.as_str()).unwrap_or("");
        if name.is_empty() {
            return Err(McpError::new(ErrorCode::InvalidParams, "Missing tool name"));
        }
        if tool_by_name(name).is_none() || !self.app.tool_executor.has_tool(name) {
            return Err(McpError::new(
                ErrorCode::InvalidParams,
                format!("Unknown tool: {}", name),
            ));
        }
        let args = params.get("arguments").cloned().unwrap_or(Value::Null);

        match self.app.tool_executor.execute(name, args, ctx).await {
            Ok(text) => Ok(text_result(&text)),
            Err(err) => Ok(tool_error_result(&err)),
        }
    }

    /// Dispatches one parsed request. `None` means no response is owed
    /// (a notification).
    pub async fn dispatch(
        &self,
        request: JsonRpcRequest,
        ctx: &RequestContext,
    ) -> Option<JsonRpcResponse> {
        match request.method.as_str() {
            _ if request.method.starts_with("notifications/") => request
                .id
                .map(|id| JsonRpcResponse::success(id, serde_json::json!({}))),
            "initialize" => request
                .id
                .map(|id| JsonRpcResponse::success(id, self.handle_initialize())),
            "ping" => request
                .id
                .map(|id| JsonRpcResponse::success(id, serde_json::json!({}))),
            "tools/list" => request
                .id
                .map(|id| JsonRpcResponse::success(id, self.handle_tools_list())),
            "tools/call" => {
                let id = request.id?;
                let response = match self.handle_tools_call(&request.params, ctx).await {
                    Ok(result) => JsonRpcResponse::success(id, result),
                    Err(err) => JsonRpcResponse::failure(id, err.code.as_i32(), err.message),
                };
                Some(response)
            }
            _ => request.id.map(|id| {
                JsonRpcResponse::failure(
                    id,
                    ErrorCode::MethodNotFound.as_i32(),
                    "Method not found".to_string(),
                )
            }),
        }
    }

    /// Parses one raw JSON-RPC message and dispatches it.
    pub async fn handle_message(&self, raw: &str, ctx: &RequestContext) -> Option<JsonRpcResponse> {
        let parsed: Value = match serde_json::from_str(raw) {
            Ok(value) => value,
            Err(_) => {
                return Some(JsonRpcResponse::failure(
                    Value::Null,
                    ErrorCode::ParseError.as_i32(),
                    "Parse error".to_string(),
                ))
            }
        };

        let request: JsonRpcRequest = match serde_json::from_value(parsed) {
            Ok(req) => req,
            Err(_) => {
                return Some(JsonRpcResponse::failure(
                    Value::Null,
                    ErrorCode::InvalidRequest.as_i32(),
                    "Invalid request".to_string(),
                ))
            }
        };

        self.logger.debug(
            "request",
            Some(&serde_json::json!({
                "method": request.method,
                "notification": request.is_notification(),
                "transport": ctx.transport().as_str(),
                "call_id": ctx.call_id(),
            })),
        );

        self.dispatch(request, ctx).await
    }

    pub async fn run_stdio(&self) -> Result<(), ToolError> {
        let stdin = tokio::io::stdin();
        let stdout = tokio::io::stdout();
        let mut reader = BufReader::new(stdin).lines();
        let mut writer = BufWriter::new(stdout);

        self.logger.debug("serving MCP over stdio", None);

        while let Some(line) = reader
            .next_line()
            .await
            .map_err(|err| ToolError::internal(err.to_string()))?
        {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let ctx = RequestContext::stdio();
            if let Some(response) = self.handle_message(trimmed, &ctx).await {
                let payload = serde_json::to_string(&response).unwrap_or_default();
                writer.write_all(payload.as_bytes()).await?;
                writer.write_all(b"\n").await?;
                writer.flush().await?;
            }
        }

        Ok(())
    }
}
