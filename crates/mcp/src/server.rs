// MCP server: JSON-RPC dispatch and the stdio line loop

use crate::protocol::*;
use crate::tools::{default_registry, ToolRegistry};
use crate::{prompts, resources};
use anyhow::Result;
use futures::{SinkExt, StreamExt};
use ghost_sdk::GhostClient;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::codec::{FramedRead, FramedWrite, LinesCodec, LinesCodecError};

pub const SERVER_NAME: &str = "ghost-mcp";

/// Longest accepted request line.
const MAX_LINE_BYTES: usize = 8 * 1024 * 1024;

const INSTRUCTIONS: &str = "Tools, resources and prompts for a Ghost site's Admin API. \
Read tools default to readable text; pass format=\"json\" for raw records.";

pub struct McpServer {
    client: GhostClient,
    tools: ToolRegistry,
}

impl McpServer {
    /// Server exposing every default tool for `client`.
    pub fn new(client: GhostClient) -> Self {
        let tools = default_registry(&client);
        Self::with_registry(client, tools)
    }

    pub fn with_registry(client: GhostClient, tools: ToolRegistry) -> Self {
        Self { client, tools }
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    /// Serve on stdin/stdout until stdin closes.
    pub async fn start(&self) -> Result<()> {
        tracing::info!("MCP server listening on stdio ({} tools)", self.tools.len());
        self.serve(tokio::io::stdin(), tokio::io::stdout()).await
    }

    /// Serve newline-delimited JSON-RPC from `reader`, replying on `writer`.
    pub async fn serve<R, W>(&self, reader: R, writer: W) -> Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = FramedRead::new(reader, LinesCodec::new_with_max_length(MAX_LINE_BYTES));
        let mut out = FramedWrite::new(writer, LinesCodec::new());

        while let Some(line) = lines.next().await {
            let response = match line {
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => self.handle_line(&line).await,
                Err(LinesCodecError::MaxLineLengthExceeded) => {
                    tracing::warn!("Discarding request longer than {} bytes", MAX_LINE_BYTES);
                    Some(JsonRpcResponse::error(Value::Null, JsonRpcError::parse_error()))
                }
                Err(LinesCodecError::Io(e)) => return Err(e.into()),
            };

            if let Some(response) = response {
                out.send(serde_json::to_string(&response)?).await?;
            }
        }

        tracing::info!("stdin closed, shutting down");
        Ok(())
    }

    /// Handle one raw line; `None` when no reply is due.
    pub async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let value: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Unparseable request: {}", e);
                return Some(JsonRpcResponse::error(Value::Null, JsonRpcError::parse_error()));
            }
        };

        let id = value.get("id").cloned();
        match serde_json::from_value::<JsonRpcRequest>(value) {
            Ok(request) => self.handle_request(request).await,
            Err(e) => {
                tracing::warn!("Malformed request: {}", e);
                Some(JsonRpcResponse::error(
                    id.unwrap_or(Value::Null),
                    JsonRpcError::invalid_request(),
                ))
            }
        }
    }

    /// Dispatch one request; notifications get no reply.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let Some(id) = request.id.clone() else {
            tracing::debug!("Notification: {}", request.method);
            return None;
        };

        if request.jsonrpc != "2.0" {
            return Some(JsonRpcResponse::error(id, JsonRpcError::invalid_request()));
        }

        tracing::debug!("Request {}: {}", id, request.method);

        let result = match request.method.as_str() {
            "initialize" => Ok(Self::to_value(self.initialize())),
            "ping" => Ok(Value::Object(Default::default())),
            "tools/list" => Ok(Self::to_value(ListToolsResult {
                tools: self.tools.list_schemas(),
            })),
            "tools/call" => self.call_tool(request.params).await,
            "resources/list" => Ok(serde_json::json!({ "resources": resources::list() })),
            "resources/templates/list" => {
                Ok(serde_json::json!({ "resourceTemplates": resources::templates() }))
            }
            "resources/read" => self.read_resource(request.params).await,
            "prompts/list" => Ok(serde_json::json!({ "prompts": prompts::list() })),
            "prompts/get" => Self::params::<GetPromptParams>(request.params)
                .and_then(|params| prompts::get(&params.name, &params.arguments))
                .map(Self::to_value),
            other => Err(JsonRpcError::method_not_found(other)),
        };

        Some(match result {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => JsonRpcResponse::error(id, error),
        })
    }

    fn initialize(&self) -> InitializeResult {
        InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities::default(),
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: Some(INSTRUCTIONS.to_string()),
        }
    }

    async fn call_tool(&self, params: Option<Value>) -> Result<Value, JsonRpcError> {
        let params: CallToolParams = Self::params(params)?;
        let tool = self
            .tools
            .get(&params.name)
            .ok_or_else(|| JsonRpcError::invalid_params(format!("Unknown tool: {}", params.name)))?;

        let arguments = match params.arguments {
            Value::Null => Value::Object(Default::default()),
            Value::Object(map) => Value::Object(map),
            _ => return Err(JsonRpcError::invalid_params("Tool arguments must be an object")),
        };

        tracing::info!("Calling tool {}", params.name);
        match tool.execute(arguments).await {
            Ok(result) => Ok(Self::to_value(result)),
            Err(e) => {
                tracing::warn!("Tool {} rejected its arguments: {:#}", params.name, e);
                Err(JsonRpcError::invalid_params(format!("{:#}", e)))
            }
        }
    }

    async fn read_resource(&self, params: Option<Value>) -> Result<Value, JsonRpcError> {
        let params: ReadResourceParams = Self::params(params)?;
        match resources::read(&self.client, &params.uri).await {
            Ok(result) => Ok(Self::to_value(result)),
            Err(e) if e.is_invalid_params() => Err(JsonRpcError::invalid_params(e.to_string())),
            Err(e) => {
                tracing::error!("Failed to read resource {}: {}", params.uri, e);
                Err(JsonRpcError::internal_error(e.to_string()))
            }
        }
    }

    fn params<T: DeserializeOwned>(params: Option<Value>) -> Result<T, JsonRpcError> {
        let params = params.ok_or_else(|| JsonRpcError::invalid_params("Missing params"))?;
        serde_json::from_value(params).map_err(|e| JsonRpcError::invalid_params(e.to_string()))
    }

    fn to_value(value: impl serde::Serialize) -> Value {
        serde_json::to_value(value).unwrap_or(Value::Null)
    }
}
