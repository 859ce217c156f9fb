//! Metadata read tools: object types, fields of an object, picklist values.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use super::Tool;
use crate::api::FireberryClient;
use crate::types::ToolResponse;
use crate::validate::{parse_args, ToolArgs, Violation};

// --- metadata_objects ---

/// Lists every object type in the CRM. Takes no arguments.
pub struct MetadataObjectsTool;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MetadataObjectsArgs {}

impl ToolArgs for MetadataObjectsArgs {}

#[async_trait]
impl Tool for MetadataObjectsTool {
    fn name(&self) -> &'static str {
        "metadata_objects"
    }

    fn description(&self) -> &'static str {
        "get all fireberry crm object types"
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {},
            "additionalProperties": false
        })
    }

    async fn execute(&self, client: &FireberryClient, args: Value) -> ToolResponse {
        let _args: MetadataObjectsArgs = match parse_args(self.name(), args) {
            Ok(a) => a,
            Err(e) => return ToolResponse::error(e.to_string()),
        };
        match client.metadata_objects().await {
            Ok(objects) => ToolResponse::json(&objects),
            Err(e) => ToolResponse::error(e.to_string()),
        }
    }
}

// --- metadata_fields ---

/// Lists all fields of one object type, with readable field type names.
pub struct MetadataFieldsTool;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
struct MetadataFieldsArgs {
    object_type: i64,
}

impl ToolArgs for MetadataFieldsArgs {
    fn check(&self) -> Vec<Violation> {
        let mut violations = Vec::new();
        if self.object_type <= 0 {
            violations.push(Violation::new("objectType", "must be a positive integer"));
        }
        violations
    }
}

#[async_trait]
impl Tool for MetadataFieldsTool {
    fn name(&self) -> &'static str {
        "metadata_fields"
    }

    fn description(&self) -> &'static str {
        "get all fields of a crm object"
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "objectType": {
                    "type": "integer",
                    "description": "The object type to get metadata for"
                }
            },
            "required": ["objectType"],
            "additionalProperties": false
        })
    }

    async fn execute(&self, client: &FireberryClient, args: Value) -> ToolResponse {
        let args: MetadataFieldsArgs = match parse_args(self.name(), args) {
            Ok(a) => a,
            Err(e) => return ToolResponse::error(e.to_string()),
        };
        match client.metadata_fields(args.object_type).await {
            Ok(fields) => ToolResponse::json(&fields),
            Err(e) => ToolResponse::error(e.to_string()),
        }
    }
}

// --- metadata_picklist ---

/// Lists the values of one picklist field.
pub struct MetadataPicklistTool;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
struct MetadataPicklistArgs {
    object_type: i64,
    field_name: String,
}

impl ToolArgs for MetadataPicklistArgs {
    fn check(&self) -> Vec<Violation> {
        let mut violations = Vec::new();
        if self.object_type <= 0 {
            violations.push(Violation::new("objectType", "must be a positive integer"));
        }
        if self.field_name.is_empty() {
            violations.push(Violation::new("fieldName", "must not be empty"));
        }
        violations
    }
}

#[async_trait]
impl Tool for MetadataPicklistTool {
    fn name(&self) -> &'static str {
        "metadata_picklist"
    }

    fn description(&self) -> &'static str {
        "get all picklist options of a picklist type field"
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "objectType": {
                    "type": "integer",
                    "description": "The object type to get metadata for"
                },
                "fieldName": {
                    "type": "string",
                    "description": "The picklist field name to get the values for"
                }
            },
            "required": ["objectType", "fieldName"],
            "additionalProperties": false
        })
    }

    async fn execute(&self, client: &FireberryClient, args: Value) -> ToolResponse {
        let args: MetadataPicklistArgs = match parse_args(self.name(), args) {
            Ok(a) => a,
            Err(e) => return ToolResponse::error(e.to_string()),
        };
        match client
            .metadata_picklist(args.object_type, &args.field_name)
            .await
        {
            Ok(picklist) => ToolResponse::json(&picklist),
            Err(e) => ToolResponse::error(e.to_string()),
        }
    }
}
