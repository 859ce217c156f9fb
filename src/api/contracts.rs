//! Output contracts: what the Fireberry API is expected to return.
//!
//! These are deliberately separate from the tool input contracts in
//! `crate::tools` — the tool-facing surface can afford to be ergonomic, the
//! upstream-facing decode must stay strict. The two must never be merged
//! into one schema.
//!
//! Raw types mirror the wire shape, including the opaque
//! `systemFieldTypeId`. Normalized types are what tools return to the
//! caller: the opaque id stripped and replaced with the readable
//! `fieldType` name via the `TypeDictionary`. A `normalize` returning
//! `None` means the response carried an id we do not know — the caller
//! must fail closed with a decoding error.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::field_types::{FieldType, TypeDictionary};

/// The `{data, success, message}` wrapper the metadata read endpoints use
/// around their real payload.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
    #[allow(dead_code)]
    pub success: bool,
    #[allow(dead_code)]
    pub message: String,
}

/// The declared upstream failure shape. Recognized, not exhaustively
/// enumerated: any body carrying a string `Message` counts, whatever else
/// it contains, and it can arrive with HTTP 200.
#[derive(Debug, Deserialize)]
pub struct UpstreamError {
    #[serde(rename = "Message")]
    pub message: String,
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

// --- metadata_objects ---

/// One CRM object type, as listed and as returned to the caller.
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataObject {
    pub name: String,
    pub system_name: String,
    /// Numeric object type code, as a digits-only string on the wire.
    pub object_type: String,
}

impl MetadataObject {
    pub fn is_valid(&self) -> bool {
        is_digits(&self.object_type)
    }
}

// --- metadata_fields ---

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMetadataField {
    pub label: String,
    pub field_name: String,
    pub system_name: String,
    pub system_field_type_id: String,
}

impl RawMetadataField {
    pub fn normalize(self, types: &TypeDictionary) -> Option<MetadataField> {
        let field_type = types.name_for_id(&self.system_field_type_id)?;
        Some(MetadataField {
            label: self.label,
            field_name: self.field_name,
            system_name: self.system_name,
            field_type,
        })
    }
}

/// One field of an object type, opaque type id already translated.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataField {
    pub label: String,
    pub field_name: String,
    pub system_name: String,
    pub field_type: FieldType,
}

// --- metadata_picklist ---

#[derive(Debug, Deserialize, Serialize)]
pub struct PicklistValue {
    pub name: String,
    /// Digits-only string on the wire.
    pub value: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMetadataPicklist {
    pub label: String,
    pub field_name: String,
    pub field_object_type: String,
    pub system_name: String,
    pub values: Vec<PicklistValue>,
    pub system_field_type_id: String,
}

impl RawMetadataPicklist {
    pub fn normalize(self, types: &TypeDictionary) -> Option<MetadataPicklist> {
        if !is_digits(&self.field_object_type) {
            return None;
        }
        if self.values.iter().any(|v| !is_digits(&v.value)) {
            return None;
        }
        let field_type = types.name_for_id(&self.system_field_type_id)?;
        Some(MetadataPicklist {
            label: self.label,
            field_name: self.field_name,
            field_object_type: self.field_object_type,
            system_name: self.system_name,
            values: self.values,
            field_type,
        })
    }
}

/// A picklist field with its ordered values.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataPicklist {
    pub label: String,
    pub field_name: String,
    pub field_object_type: String,
    pub system_name: String,
    pub values: Vec<PicklistValue>,
    pub field_type: FieldType,
}

// --- record_create / record_update ---

/// Response to a record creation: the created record id plus an echo of the
/// record body.
#[derive(Debug, Deserialize, Serialize)]
pub struct CreateRecord {
    pub record: serde_json::Map<String, serde_json::Value>,
    pub success: bool,
    #[serde(rename = "_id")]
    pub id: String,
}

impl CreateRecord {
    pub fn is_valid(&self) -> bool {
        Uuid::parse_str(&self.id).is_ok()
    }
}

/// Response to a record update: the updated record body.
#[derive(Debug, Deserialize, Serialize)]
pub struct UpdateRecord {
    pub success: bool,
    pub record: serde_json::Map<String, serde_json::Value>,
}

// --- object_create ---

#[derive(Debug, Deserialize, Serialize)]
pub struct CreateObjectRecord {
    pub objecttypecode: i64,
}

/// Success arm of the object creation response. The failure arm is the
/// shared `UpstreamError` shape and is checked before this contract.
#[derive(Debug, Deserialize, Serialize)]
pub struct CreateObject {
    pub success: bool,
    pub record: CreateObjectRecord,
    #[serde(rename = "_id")]
    pub id: String,
}

impl CreateObject {
    pub fn is_valid(&self) -> bool {
        self.success && Uuid::parse_str(&self.id).is_ok()
    }
}

// --- field_create ---

#[derive(Debug, Deserialize, Serialize)]
pub struct CreatedSystemField {
    pub fieldname: String,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFieldData {
    pub system_field: Vec<CreatedSystemField>,
}

/// Success arm of the field creation response.
#[derive(Debug, Deserialize, Serialize)]
pub struct CreateField {
    pub success: bool,
    pub data: CreateFieldData,
    pub message: String,
}

impl CreateField {
    pub fn is_valid(&self) -> bool {
        self.success
    }
}

// --- field creation request (client side) ---

/// One option of a picklist field being created.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PicklistOption {
    /// Display rank within the picklist.
    pub order: i64,
    /// Hex color, `#rrggbb`.
    pub color: String,
    pub label: String,
    /// Stored value; must be unique within the picklist.
    pub value: i64,
}

/// Type-specific attributes of a field being created. Closed set: the
/// request-body builder switches exhaustively over this, so a new variant
/// here forces the builder (and the input contract) to handle it.
#[derive(Debug, Clone)]
pub enum FieldKind {
    Text,
    Date,
    DateTime,
    Telephone,
    Email,
    Url,
    TextArea,
    Number { precision: u8 },
    Lookup { related_object_type: i64 },
    Picklist { options: Vec<PicklistOption> },
}

impl FieldKind {
    /// The path segment naming this type in the creation endpoint.
    pub fn slug(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Date => "date",
            FieldKind::DateTime => "date-time",
            FieldKind::Telephone => "telephone",
            FieldKind::Email => "email",
            FieldKind::Url => "url",
            FieldKind::TextArea => "text-area",
            FieldKind::Number { .. } => "number",
            FieldKind::Lookup { .. } => "lookup",
            FieldKind::Picklist { .. } => "picklist",
        }
    }
}

/// A fully validated field creation request.
#[derive(Debug, Clone)]
pub struct FieldCreateRequest {
    pub object_type: i64,
    /// Optional system name; when absent the CRM generates one.
    pub field_name: Option<String>,
    pub label: String,
    pub kind: FieldKind,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_decodes() {
        let env: Envelope<Vec<MetadataObject>> = serde_json::from_value(json!({
            "data": [{"name": "Account", "systemName": "account", "objectType": "1"}],
            "success": true,
            "message": ""
        }))
        .unwrap();
        assert_eq!(env.data.len(), 1);
        assert!(env.data[0].is_valid());
    }

    #[test]
    fn test_object_type_must_be_digits() {
        let obj = MetadataObject {
            name: "Account".into(),
            system_name: "account".into(),
            object_type: "1a".into(),
        };
        assert!(!obj.is_valid());
    }

    #[test]
    fn test_field_normalize_translates_type_id() {
        let types = TypeDictionary::new();
        let raw: RawMetadataField = serde_json::from_value(json!({
            "label": "Email",
            "fieldName": "emailaddress1",
            "systemName": "emailaddress1",
            "systemFieldTypeId": "c713d2f7-8fa9-43c3-8062-f07486eaf567"
        }))
        .unwrap();
        let field = raw.normalize(&types).unwrap();
        assert_eq!(field.field_type, FieldType::Email);
        let value = serde_json::to_value(&field).unwrap();
        assert_eq!(value["fieldType"], json!("email"));
        assert!(value.get("systemFieldTypeId").is_none());
    }

    #[test]
    fn test_field_normalize_fails_closed_on_unknown_id() {
        let types = TypeDictionary::new();
        let raw = RawMetadataField {
            label: "X".into(),
            field_name: "x".into(),
            system_name: "x".into(),
            system_field_type_id: "11111111-1111-1111-1111-111111111111".into(),
        };
        assert!(raw.normalize(&types).is_none());
    }

    #[test]
    fn test_picklist_normalize_checks_digit_strings() {
        let types = TypeDictionary::new();
        let raw = RawMetadataPicklist {
            label: "Status".into(),
            field_name: "status".into(),
            field_object_type: "1".into(),
            system_name: "status".into(),
            values: vec![PicklistValue {
                name: "Open".into(),
                value: "abc".into(),
            }],
            system_field_type_id: FieldType::Picklist.id().into(),
        };
        assert!(raw.normalize(&types).is_none());
    }

    #[test]
    fn test_create_record_requires_uuid_id() {
        let ok: CreateRecord = serde_json::from_value(json!({
            "record": {},
            "success": true,
            "_id": "f3b4a3a0-6a7e-4a9e-9a1c-2f62b3a3c111"
        }))
        .unwrap();
        assert!(ok.is_valid());

        let bad: CreateRecord = serde_json::from_value(json!({
            "record": {},
            "success": true,
            "_id": "not-a-uuid"
        }))
        .unwrap();
        assert!(!bad.is_valid());
    }

    #[test]
    fn test_upstream_error_matches_any_body_with_message() {
        let err: UpstreamError =
            serde_json::from_value(json!({"Message": "Invalid Record Name", "extra": 1}))
                .unwrap();
        assert_eq!(err.message, "Invalid Record Name");
        assert!(serde_json::from_value::<UpstreamError>(json!({"message": "lowercase"})).is_err());
    }
}
