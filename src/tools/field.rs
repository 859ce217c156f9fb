//! Field tool: create a field on a CRM object type.
//!
//! Field creation is discriminated by the `fieldType` tag. Each variant
//! admits only its own extra attributes: `precision` belongs to number,
//! `relatedObjectType` to lookup, `options` to picklist. Supplying an
//! attribute of another variant is a contract violation, not a warning.
//!
//! Parsing is two-stage: a strict argument struct first (so unknown fields
//! are rejected), then conversion into the closed `FieldKind` sum type that
//! the API client's body builder switches over exhaustively. The contract
//! and the builder stay in lock-step through that enum: adding a variant to
//! one without the other fails to compile.

use std::collections::HashSet;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use super::Tool;
use crate::api::contracts::{FieldCreateRequest, FieldKind, PicklistOption};
use crate::api::FireberryClient;
use crate::types::ToolResponse;
use crate::validate::{parse_args, ToolArgs, ValidationError, Violation};

const MAX_LABEL_LEN: usize = 100;
const MAX_FIELD_NAME_LEN: usize = 100;
const MAX_PRECISION: i64 = 4;

/// Creates a new field in a CRM object.
pub struct FieldCreateTool;

/// The discriminator tag. Mirrors the creation endpoint's path slugs; note
/// rich-text fields exist in listings but cannot be created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum FieldTypeTag {
    Text,
    Number,
    Date,
    DateTime,
    Telephone,
    Email,
    Url,
    TextArea,
    Lookup,
    Picklist,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
struct FieldCreateArgs {
    object_type: i64,
    field_type: FieldTypeTag,
    #[serde(default)]
    field_name: Option<String>,
    label: String,
    /// Number fields only. Decimal places, 0 to 4, defaults to 0.
    #[serde(default)]
    precision: Option<i64>,
    /// Lookup fields only. The object type the field points at.
    #[serde(default)]
    related_object_type: Option<i64>,
    /// Picklist fields only.
    #[serde(default)]
    options: Option<Vec<PicklistOption>>,
}

impl ToolArgs for FieldCreateArgs {}

fn is_valid_field_name(name: &str) -> bool {
    if name.chars().count() > MAX_FIELD_NAME_LEN {
        return false;
    }
    match name.strip_prefix("pcf") {
        Some(rest) => !rest.is_empty() && rest.chars().all(|c| c.is_ascii_alphanumeric()),
        None => false,
    }
}

fn is_hex_color(color: &str) -> bool {
    let Some(digits) = color.strip_prefix('#') else {
        return false;
    };
    digits.len() == 6 && digits.chars().all(|c| c.is_ascii_hexdigit())
}

impl FieldCreateArgs {
    /// Apply the constraint checks and convert into the typed request.
    /// Returns every violation found, not just the first.
    fn into_request(self) -> Result<FieldCreateRequest, Vec<Violation>> {
        let mut violations = Vec::new();

        if self.object_type <= 0 {
            violations.push(Violation::new("objectType", "must be a positive integer"));
        }
        if self.label.is_empty() {
            violations.push(Violation::new("label", "must not be empty"));
        } else if self.label.chars().count() > MAX_LABEL_LEN {
            violations.push(Violation::new(
                "label",
                format!("must be at most {MAX_LABEL_LEN} characters"),
            ));
        }
        if let Some(name) = &self.field_name {
            if !is_valid_field_name(name) {
                violations.push(Violation::new(
                    "fieldName",
                    "must start with `pcf` and contain only letters and numbers",
                ));
            }
        }

        // Cross-variant attribute leakage.
        if self.precision.is_some() && self.field_type != FieldTypeTag::Number {
            violations.push(Violation::new("precision", "only valid for number fields"));
        }
        if self.related_object_type.is_some() && self.field_type != FieldTypeTag::Lookup {
            violations.push(Violation::new(
                "relatedObjectType",
                "only valid for lookup fields",
            ));
        }
        if self.options.is_some() && self.field_type != FieldTypeTag::Picklist {
            violations.push(Violation::new("options", "only valid for picklist fields"));
        }

        let kind = match self.field_type {
            FieldTypeTag::Text => Some(FieldKind::Text),
            FieldTypeTag::Date => Some(FieldKind::Date),
            FieldTypeTag::DateTime => Some(FieldKind::DateTime),
            FieldTypeTag::Telephone => Some(FieldKind::Telephone),
            FieldTypeTag::Email => Some(FieldKind::Email),
            FieldTypeTag::Url => Some(FieldKind::Url),
            FieldTypeTag::TextArea => Some(FieldKind::TextArea),
            FieldTypeTag::Number => {
                let precision = self.precision.unwrap_or(0);
                if (0..=MAX_PRECISION).contains(&precision) {
                    Some(FieldKind::Number {
                        precision: precision as u8,
                    })
                } else {
                    violations.push(Violation::new(
                        "precision",
                        format!("must be between 0 and {MAX_PRECISION}"),
                    ));
                    None
                }
            }
            FieldTypeTag::Lookup => match self.related_object_type {
                Some(related) if related > 0 => Some(FieldKind::Lookup {
                    related_object_type: related,
                }),
                Some(_) => {
                    violations.push(Violation::new(
                        "relatedObjectType",
                        "must be a positive integer",
                    ));
                    None
                }
                None => {
                    violations.push(Violation::new(
                        "relatedObjectType",
                        "required for lookup fields",
                    ));
                    None
                }
            },
            FieldTypeTag::Picklist => match self.options {
                None => {
                    violations.push(Violation::new("options", "required for picklist fields"));
                    None
                }
                Some(options) if options.is_empty() => {
                    violations.push(Violation::new("options", "must not be empty"));
                    None
                }
                Some(options) => {
                    let mut seen = HashSet::new();
                    for (i, option) in options.iter().enumerate() {
                        if !is_hex_color(&option.color) {
                            violations.push(Violation::new(
                                format!("options[{i}].color"),
                                "must be a hex color like #1f77b4",
                            ));
                        }
                        if option.label.is_empty() {
                            violations.push(Violation::new(
                                format!("options[{i}].label"),
                                "must not be empty",
                            ));
                        }
                        if !seen.insert(option.value) {
                            violations.push(Violation::new(
                                format!("options[{i}].value"),
                                "must be unique within the picklist",
                            ));
                        }
                    }
                    Some(FieldKind::Picklist { options })
                }
            },
        };

        match kind {
            Some(kind) if violations.is_empty() => Ok(FieldCreateRequest {
                object_type: self.object_type,
                field_name: self.field_name,
                label: self.label,
                kind,
            }),
            _ => Err(violations),
        }
    }
}

#[async_trait]
impl Tool for FieldCreateTool {
    fn name(&self) -> &'static str {
        "field_create"
    }

    fn description(&self) -> &'static str {
        "create a new field in a crm object"
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "objectType": {
                    "type": "integer",
                    "description": "The object type to add the field to"
                },
                "fieldType": {
                    "type": "string",
                    "enum": [
                        "text", "number", "date", "date-time", "telephone",
                        "email", "url", "text-area", "lookup", "picklist"
                    ],
                    "description": "The data type of the new field"
                },
                "fieldName": {
                    "type": "string",
                    "maxLength": MAX_FIELD_NAME_LEN,
                    "pattern": "^pcf[a-zA-Z0-9]+$",
                    "description": "The system name (sql column name) of the field, \
                                    must start with `pcf` and can only contain letters and numbers"
                },
                "label": {
                    "type": "string",
                    "minLength": 1,
                    "maxLength": MAX_LABEL_LEN,
                    "description": "The display label (readable ui name) for the field"
                },
                "precision": {
                    "type": "integer",
                    "minimum": 0,
                    "maximum": MAX_PRECISION,
                    "default": 0,
                    "description": "Number fields only: decimal places"
                },
                "relatedObjectType": {
                    "type": "integer",
                    "description": "Lookup fields only: the object type the field references"
                },
                "options": {
                    "type": "array",
                    "minItems": 1,
                    "items": {
                        "type": "object",
                        "properties": {
                            "order": { "type": "integer" },
                            "color": { "type": "string", "pattern": "^#[0-9a-fA-F]{6}$" },
                            "label": { "type": "string", "minLength": 1 },
                            "value": { "type": "integer" }
                        },
                        "required": ["order", "color", "label", "value"],
                        "additionalProperties": false
                    },
                    "description": "Picklist fields only: the selectable options"
                }
            },
            "required": ["objectType", "fieldType", "label"],
            "additionalProperties": false
        })
    }

    async fn execute(&self, client: &FireberryClient, args: Value) -> ToolResponse {
        let args: FieldCreateArgs = match parse_args(self.name(), args) {
            Ok(a) => a,
            Err(e) => return ToolResponse::error(e.to_string()),
        };
        let request = match args.into_request() {
            Ok(r) => r,
            Err(violations) => {
                let err = ValidationError {
                    tool: self.name(),
                    violations,
                };
                return ToolResponse::error(err.to_string());
            }
        };
        match client.create_field(&request).await {
            Ok(created) => ToolResponse::json(&created),
            Err(e) => ToolResponse::error(e.to_string()),
        }
    }
}
