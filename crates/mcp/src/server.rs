// MCP server: newline-delimited JSON-RPC over stdio

use crate::codec::{MessageLineCodec, MAX_MESSAGE_BYTES};
use crate::protocol::{
    CallToolParams, CallToolResult, Implementation, InitializeParams, InitializeResult,
    JsonRpcError, JsonRpcRequest, JsonRpcResponse, ListToolsResult, ServerCapabilities,
    ToolsCapability, DEFAULT_PROTOCOL_VERSION, JSONRPC_VERSION,
};
use crate::tools::ToolRegistry;
use anyhow::{Context, Result};
use futures::{SinkExt, StreamExt};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::mpsc;
use tokio_util::codec::{FramedRead, FramedWrite, LinesCodec};

pub const SERVER_NAME: &str = "wp-mcp";

pub struct McpServer {
    registry: Arc<ToolRegistry>,
    info: Implementation,
    max_message_bytes: usize,
}

impl McpServer {
    pub fn new(registry: ToolRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
            info: Implementation {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            max_message_bytes: MAX_MESSAGE_BYTES,
        }
    }

    /// Cap the size of a single inbound message; longer lines are answered with a parse error
    pub fn with_max_message_bytes(mut self, max_message_bytes: usize) -> Self {
        self.max_message_bytes = max_message_bytes;
        self
    }

    /// Serve on the process's stdin/stdout until stdin closes
    pub async fn start(self) -> Result<()> {
        tracing::info!(tools = self.registry.len(), "MCP server running on stdio");
        self.serve(tokio::io::stdin(), tokio::io::stdout()).await
    }

    /// Serve one JSON-RPC message per line from `reader`, writing responses to `writer`.
    ///
    /// Messages are handled concurrently; a single writer task serializes output.
    /// Returns once `reader` hits EOF and every in-flight message has been answered.
    pub async fn serve<R, W>(self, reader: R, writer: W) -> Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let server = Arc::new(self);
        let (tx, mut rx) = mpsc::unbounded_channel::<JsonRpcResponse>();

        let writer_task = tokio::spawn(async move {
            let mut sink = FramedWrite::new(writer, LinesCodec::new());
            while let Some(response) = rx.recv().await {
                let line = serde_json::to_string(&response).context("Failed to encode response")?;
                sink.send(line).await.context("Failed to write response")?;
            }
            Ok::<(), anyhow::Error>(())
        });

        let mut lines = FramedRead::new(reader, MessageLineCodec::new(server.max_message_bytes));
        while let Some(frame) = lines.next().await {
            let line = match frame.context("Failed to read from transport")? {
                Ok(line) => line,
                Err(e) => {
                    tracing::warn!(error = %e, "Discarding unreadable message");
                    let response = JsonRpcResponse::error(Value::Null, JsonRpcError::parse_error());
                    if tx.send(response).is_err() {
                        tracing::warn!("Transport closed before response could be written");
                    }
                    continue;
                }
            };
            if line.trim().is_empty() {
                continue;
            }

            let server = server.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                if let Some(response) = server.handle_message(&line).await {
                    if tx.send(response).is_err() {
                        tracing::warn!("Transport closed before response could be written");
                    }
                }
            });
        }

        tracing::info!("Input closed, draining in-flight requests");
        drop(tx);
        writer_task.await.context("Writer task panicked")??;
        Ok(())
    }

    /// Handle one raw line; `None` when no response is due (notifications)
    pub async fn handle_message(&self, line: &str) -> Option<JsonRpcResponse> {
        let value: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(error = %e, "Received malformed JSON");
                return Some(JsonRpcResponse::error(Value::Null, JsonRpcError::parse_error()));
            }
        };

        let id = value.get("id").cloned().unwrap_or(Value::Null);
        let request: JsonRpcRequest = match serde_json::from_value(value) {
            Ok(request) => request,
            Err(_) => return Some(JsonRpcResponse::error(id, JsonRpcError::invalid_request())),
        };

        if request.jsonrpc != JSONRPC_VERSION {
            return Some(JsonRpcResponse::error(id, JsonRpcError::invalid_request()));
        }

        self.handle_request(request).await
    }

    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.is_notification() {
            tracing::debug!(method = %request.method, "Received notification");
            return None;
        }
        let id = request.id.unwrap_or(Value::Null);

        tracing::debug!(method = %request.method, id = %id, "Handling request");
        let response = match request.method.as_str() {
            "initialize" => JsonRpcResponse::from_result(id, self.initialize(request.params)),
            "ping" => JsonRpcResponse::success(id, serde_json::json!({})),
            "tools/list" => JsonRpcResponse::from_result(
                id,
                Ok::<_, JsonRpcError>(ListToolsResult {
                    tools: self.registry.list_schemas(),
                }),
            ),
            "tools/call" => JsonRpcResponse::from_result(id, self.call_tool(request.params).await),
            "resources/list" => {
                JsonRpcResponse::success(id, serde_json::json!({ "resources": [] }))
            }
            method => JsonRpcResponse::error(id, JsonRpcError::method_not_found(method)),
        };

        Some(response)
    }

    fn initialize(&self, params: Option<Value>) -> Result<InitializeResult, JsonRpcError> {
        let params: InitializeParams = match params {
            Some(params) => parse_params(params)?,
            None => InitializeParams::default(),
        };

        if let Some(client) = &params.client_info {
            tracing::info!(client = %client.name, version = %client.version, "Client connected");
        }

        Ok(InitializeResult {
            protocol_version: params
                .protocol_version
                .unwrap_or_else(|| DEFAULT_PROTOCOL_VERSION.to_string()),
            capabilities: ServerCapabilities {
                tools: ToolsCapability {
                    list_changed: false,
                },
                resources: serde_json::json!({}),
            },
            server_info: self.info.clone(),
        })
    }

    async fn call_tool(&self, params: Option<Value>) -> Result<CallToolResult, JsonRpcError> {
        let params: CallToolParams = parse_params(
            params.ok_or_else(|| JsonRpcError::invalid_params("Missing params for tools/call"))?,
        )?;

        let tool = self
            .registry
            .get(&params.name)
            .ok_or_else(|| crate::error::ToolError::UnknownTool(params.name.clone()))?;

        tracing::info!(tool = %params.name, "Calling tool");
        tool.execute(params.arguments).await.map_err(|e| {
            tracing::warn!(tool = %params.name, error = %e, "Rejected tool arguments");
            JsonRpcError::from(e)
        })
    }
}

fn parse_params<T: DeserializeOwned>(params: Value) -> Result<T, JsonRpcError> {
    serde_json::from_value(params).map_err(|e| JsonRpcError::invalid_params(e.to_string()))
}
