//! Record tools: create and update CRM records.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use uuid::Uuid;

use super::Tool;
use crate::api::FireberryClient;
use crate::types::ToolResponse;
use crate::validate::{parse_args, ToolArgs, Violation};

// --- record_create ---

/// Creates a new record of a given object type.
pub struct RecordCreateTool;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
struct RecordCreateArgs {
    object_type: i64,
    fields: Map<String, Value>,
}

impl ToolArgs for RecordCreateArgs {
    fn check(&self) -> Vec<Violation> {
        let mut violations = Vec::new();
        if self.object_type <= 0 {
            violations.push(Violation::new("objectType", "must be a positive integer"));
        }
        violations
    }
}

#[async_trait]
impl Tool for RecordCreateTool {
    fn name(&self) -> &'static str {
        "record_create"
    }

    fn description(&self) -> &'static str {
        "create a new crm record of a specified object type"
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "objectType": {
                    "type": "integer",
                    "description": "The object type to create a record for"
                },
                "fields": {
                    "type": "object",
                    "description": "The fields to create the record with"
                }
            },
            "required": ["objectType", "fields"],
            "additionalProperties": false
        })
    }

    async fn execute(&self, client: &FireberryClient, args: Value) -> ToolResponse {
        let args: RecordCreateArgs = match parse_args(self.name(), args) {
            Ok(a) => a,
            Err(e) => return ToolResponse::error(e.to_string()),
        };
        match client.create_record(args.object_type, &args.fields).await {
            Ok(created) => ToolResponse::json(&created),
            Err(e) => ToolResponse::error(e.to_string()),
        }
    }
}

// --- record_update ---

/// Updates an existing record by id.
pub struct RecordUpdateTool;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
struct RecordUpdateArgs {
    object_type: i64,
    record_id: String,
    fields: Map<String, Value>,
}

impl ToolArgs for RecordUpdateArgs {
    fn check(&self) -> Vec<Violation> {
        let mut violations = Vec::new();
        if self.object_type <= 0 {
            violations.push(Violation::new("objectType", "must be a positive integer"));
        }
        if Uuid::parse_str(&self.record_id).is_err() {
            violations.push(Violation::new("recordId", "must be a valid uuid"));
        }
        violations
    }
}

#[async_trait]
impl Tool for RecordUpdateTool {
    fn name(&self) -> &'static str {
        "record_update"
    }

    fn description(&self) -> &'static str {
        "update a crm record"
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "objectType": {
                    "type": "integer",
                    "description": "The object type to update a record for"
                },
                "recordId": {
                    "type": "string",
                    "format": "uuid",
                    "description": "The id of the record to update"
                },
                "fields": {
                    "type": "object",
                    "description": "The fields to update the record with"
                }
            },
            "required": ["objectType", "recordId", "fields"],
            "additionalProperties": false
        })
    }

    async fn execute(&self, client: &FireberryClient, args: Value) -> ToolResponse {
        let args: RecordUpdateArgs = match parse_args(self.name(), args) {
            Ok(a) => a,
            Err(e) => return ToolResponse::error(e.to_string()),
        };
        match client
            .update_record(args.object_type, &args.record_id, &args.fields)
            .await
        {
            Ok(updated) => ToolResponse::json(&updated),
            Err(e) => ToolResponse::error(e.to_string()),
        }
    }
}
