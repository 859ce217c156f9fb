//! Object tool: create a new CRM object type.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use super::Tool;
use crate::api::FireberryClient;
use crate::types::ToolResponse;
use crate::validate::{parse_args, ToolArgs, Violation};

const MAX_NAME_LEN: usize = 80;

/// Creates a new object type (e.g. "Account"/"Accounts").
pub struct ObjectCreateTool;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ObjectCreateArgs {
    name: String,
    collectionname: String,
}

fn check_name(path: &'static str, value: &str, violations: &mut Vec<Violation>) {
    if value.is_empty() {
        violations.push(Violation::new(path, "must not be empty"));
    } else if value.chars().count() > MAX_NAME_LEN {
        violations.push(Violation::new(
            path,
            format!("must be at most {MAX_NAME_LEN} characters"),
        ));
    }
}

impl ToolArgs for ObjectCreateArgs {
    fn check(&self) -> Vec<Violation> {
        let mut violations = Vec::new();
        check_name("name", &self.name, &mut violations);
        check_name("collectionname", &self.collectionname, &mut violations);
        violations
    }
}

#[async_trait]
impl Tool for ObjectCreateTool {
    fn name(&self) -> &'static str {
        "object_create"
    }

    fn description(&self) -> &'static str {
        "create a new crm object type"
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "name": {
                    "type": "string",
                    "minLength": 1,
                    "maxLength": MAX_NAME_LEN,
                    "description": "The name of the object e.g. Account"
                },
                "collectionname": {
                    "type": "string",
                    "minLength": 1,
                    "maxLength": MAX_NAME_LEN,
                    "description": "The plural name of the object e.g. Accounts"
                }
            },
            "required": ["name", "collectionname"],
            "additionalProperties": false
        })
    }

    async fn execute(&self, client: &FireberryClient, args: Value) -> ToolResponse {
        let args: ObjectCreateArgs = match parse_args(self.name(), args) {
            Ok(a) => a,
            Err(e) => return ToolResponse::error(e.to_string()),
        };
        match client.create_object(&args.name, &args.collectionname).await {
            Ok(created) => ToolResponse::json(&created),
            Err(e) => ToolResponse::error(e.to_string()),
        }
    }
}
