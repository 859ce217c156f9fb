//! Tool system: the trait every tool implements and the dispatch table.
//!
//! Key concepts:
//! - **Tool trait**: every tool provides its name, description, JSON Schema
//!   for arguments, and an execute method
//! - **ToolRouter**: the single source of truth for which tools exist. Both
//!   `tools/list` (advertisement) and `tools/call` (invocation) read the
//!   same registry, so the two can never diverge.
//! - Tool failures (bad arguments, upstream errors) come back as a normal
//!   `ToolResponse` with `isError` set; only an unknown tool name is an
//!   `Err`, because it signals a caller bug rather than a data problem.

pub mod field;
pub mod metadata;
pub mod object;
pub mod record;

use async_trait::async_trait;
use serde_json::Value;

use crate::api::FireberryClient;
use crate::error::RouterError;
use crate::types::{ToolDefinition, ToolResponse};

/// Trait that all tools must implement.
#[async_trait]
pub trait Tool: Send + Sync {
    /// The unique, stable name of this tool (e.g. "record_create").
    fn name(&self) -> &'static str;

    /// A human-readable description. The calling model reads this to decide
    /// when to use the tool.
    fn description(&self) -> &'static str;

    /// JSON Schema describing the tool's arguments.
    fn input_schema(&self) -> Value;

    /// Validate the arguments and run the upstream operation.
    async fn execute(&self, client: &FireberryClient, args: Value) -> ToolResponse;

    /// Convert this tool into its advertised definition.
    fn to_definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_string(),
            description: self.description().to_string(),
            input_schema: self.input_schema(),
        }
    }
}

/// Routes tool calls to the correct tool implementation.
pub struct ToolRouter {
    client: FireberryClient,
    tools: Vec<Box<dyn Tool>>,
}

impl ToolRouter {
    pub fn new(client: FireberryClient) -> Self {
        Self {
            client,
            tools: Vec::new(),
        }
    }

    /// Register a tool. Panics if the name is already taken: the registry is
    /// built once at startup and a duplicate is a programming error that
    /// should stop the process immediately.
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        assert!(
            !self.tools.iter().any(|t| t.name() == tool.name()),
            "duplicate tool name: {}",
            tool.name()
        );
        self.tools.push(tool);
    }

    /// All advertised tool definitions, in registration order.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.iter().map(|t| t.to_definition()).collect()
    }

    /// Invoke a tool by name. An unknown name fails without reaching the
    /// validation pipeline or the network.
    pub async fn invoke(&self, name: &str, args: Value) -> Result<ToolResponse, RouterError> {
        let tool = self
            .tools
            .iter()
            .find(|t| t.name() == name)
            .ok_or_else(|| RouterError::UnknownTool(name.to_string()))?;
        Ok(tool.execute(&self.client, args).await)
    }
}

/// Build the router with all seven Fireberry tools registered.
pub fn create_default_router(client: FireberryClient) -> ToolRouter {
    let mut router = ToolRouter::new(client);
    router.register(Box::new(metadata::MetadataObjectsTool));
    router.register(Box::new(metadata::MetadataFieldsTool));
    router.register(Box::new(metadata::MetadataPicklistTool));
    router.register(Box::new(record::RecordCreateTool));
    router.register(Box::new(record::RecordUpdateTool));
    router.register(Box::new(object::ObjectCreateTool));
    router.register(Box::new(field::FieldCreateTool));
    router
}

#[cfg(test)]
mod tests {
    use super::*;

    fn router() -> ToolRouter {
        create_default_router(FireberryClient::new("http://127.0.0.1:1", "test-token"))
    }

    #[test]
    fn test_all_seven_tools_are_advertised() {
        let names: Vec<String> = router()
            .definitions()
            .into_iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(
            names,
            vec![
                "metadata_objects",
                "metadata_fields",
                "metadata_picklist",
                "record_create",
                "record_update",
                "object_create",
                "field_create",
            ]
        );
    }

    #[test]
    fn test_every_definition_has_schema_and_description() {
        for def in router().definitions() {
            assert!(!def.description.is_empty(), "{} lacks description", def.name);
            assert_eq!(def.input_schema["type"], "object", "{}", def.name);
        }
    }

    #[test]
    fn test_unknown_tool_never_reaches_the_network() {
        // The client points at a closed port; an unknown name must fail
        // before any connection attempt.
        let rt = tokio::runtime::Runtime::new().unwrap();
        let err = rt
            .block_on(router().invoke("no_such_tool", serde_json::json!({})))
            .unwrap_err();
        assert_eq!(err.to_string(), "Unknown tool: no_such_tool");
    }
}
