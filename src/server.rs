//! MCP server loop: newline-delimited JSON-RPC 2.0 over stdin/stdout.
//!
//! Logging goes to stderr; stdout is reserved for protocol frames.
//!
//! Tool-level failures (validation, upstream errors, decode failures) are
//! NOT JSON-RPC errors: they come back as a normal `tools/call` result with
//! `isError` set, so the calling model sees the message and can retry.
//! JSON-RPC errors are reserved for protocol bugs: malformed JSON, unknown
//! methods, and unknown tool names.

use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::error::RouterError;
use crate::tools::ToolRouter;

const SERVER_NAME: &str = "fireberry-mcp";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");
const PROTOCOL_VERSION: &str = "2025-06-18";

/// MCP stdio server wrapping the tool router.
pub struct McpServer {
    router: ToolRouter,
}

impl McpServer {
    pub fn new(router: ToolRouter) -> Self {
        Self { router }
    }

    /// Read JSON-RPC requests from stdin and write responses to stdout
    /// until stdin closes.
    pub async fn run(&self) -> anyhow::Result<()> {
        let stdin = tokio::io::stdin();
        let mut stdout = tokio::io::stdout();
        let mut lines = BufReader::new(stdin).lines();

        tracing::info!("stdio server started");

        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if let Some(response) = self.handle_message(line).await {
                let mut bytes = response.into_bytes();
                bytes.push(b'\n');
                stdout.write_all(&bytes).await?;
                stdout.flush().await?;
            }
        }

        tracing::info!("stdin closed, stopping");
        Ok(())
    }

    /// Handle one request line. `None` means no response is owed
    /// (notifications).
    async fn handle_message(&self, line: &str) -> Option<String> {
        let request: Value = match serde_json::from_str(line) {
            Ok(v) => v,
            Err(e) => {
                return Some(error_response(
                    Value::Null,
                    -32700,
                    &format!("Parse error: {e}"),
                ))
            }
        };

        let id = request.get("id").cloned().unwrap_or(Value::Null);
        let method = request.get("method").and_then(|m| m.as_str()).unwrap_or("");
        let params = request.get("params").cloned().unwrap_or_else(|| json!({}));

        match method {
            "initialize" => Some(self.handle_initialize(id)),
            // Client notification, no response owed.
            "notifications/initialized" => None,
            "tools/list" => Some(self.handle_tools_list(id)),
            "tools/call" => Some(self.handle_tools_call(id, &params).await),
            _ => Some(error_response(
                id,
                -32601,
                &format!("Method not found: {method}"),
            )),
        }
    }

    fn handle_initialize(&self, id: Value) -> String {
        result_response(
            id,
            json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": { "tools": {} },
                "serverInfo": { "name": SERVER_NAME, "version": SERVER_VERSION }
            }),
        )
    }

    fn handle_tools_list(&self, id: Value) -> String {
        match serde_json::to_value(self.router.definitions()) {
            Ok(tools) => result_response(id, json!({ "tools": tools })),
            Err(e) => {
                tracing::error!(error = %e, "failed to serialize tool list");
                error_response(id, -32603, "Internal error")
            }
        }
    }

    async fn handle_tools_call(&self, id: Value, params: &Value) -> String {
        let Some(name) = params.get("name").and_then(|n| n.as_str()) else {
            return error_response(id, -32602, "Missing tool name");
        };
        let arguments = params.get("arguments").cloned().unwrap_or_else(|| json!({}));

        tracing::debug!(tool = name, "invoking tool");
        match self.router.invoke(name, arguments).await {
            Ok(response) => match serde_json::to_value(&response) {
                Ok(result) => result_response(id, result),
                Err(e) => {
                    tracing::error!(error = %e, "failed to serialize tool response");
                    error_response(id, -32603, "Internal error")
                }
            },
            Err(e @ RouterError::UnknownTool(_)) => {
                error_response(id, -32602, &e.to_string())
            }
        }
    }
}

fn result_response(id: Value, result: Value) -> String {
    json!({ "jsonrpc": "2.0", "id": id, "result": result }).to_string()
}

fn error_response(id: Value, code: i64, message: &str) -> String {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "error": { "code": code, "message": message }
    })
    .to_string()
}
