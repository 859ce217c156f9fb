//! Field type dictionary.
//!
//! Fireberry denotes a field's data type with an opaque UUID
//! (`systemFieldTypeId`). This module owns the closed set of known types and
//! the bidirectional mapping between those ids and readable names.
//!
//! Key concepts:
//! - **FieldType**: closed enum, one variant per type the CRM can report
//! - **TypeDictionary**: the id -> type map, built once at startup. The
//!   constructor asserts the id table is duplicate-free so a broken mapping
//!   fails at process start instead of as a per-request decode error.
//! - A lookup miss is a decoding failure for the caller. Never default an
//!   unknown id to some name.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A Fireberry field data type, identified upstream by an opaque UUID.
///
/// Serializes as the readable kebab-case name (`date-time`, `text-area`, ...),
/// which is the only representation tool callers ever see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldType {
    Date,
    DateTime,
    Email,
    Lookup,
    Number,
    Picklist,
    RichText,
    Text,
    TextArea,
    Telephone,
    Url,
}

impl FieldType {
    pub const ALL: [FieldType; 11] = [
        FieldType::Date,
        FieldType::DateTime,
        FieldType::Email,
        FieldType::Lookup,
        FieldType::Number,
        FieldType::Picklist,
        FieldType::RichText,
        FieldType::Text,
        FieldType::TextArea,
        FieldType::Telephone,
        FieldType::Url,
    ];

    /// The stable upstream identifier for this type.
    pub fn id(self) -> &'static str {
        match self {
            FieldType::Date => "83bf530c-e04c-462b-9ffc-a46f750fc072",
            FieldType::DateTime => "ce972d02-5013-46d4-9d1d-f09df1ac346a",
            FieldType::Email => "c713d2f7-8fa9-43c3-8062-f07486eaf567",
            FieldType::Lookup => "a8fcdf65-91bc-46fd-82f6-1234758345a1",
            FieldType::Number => "6a34bfe3-fece-4da1-9136-a7b1e5ae3319",
            FieldType::Picklist => "b4919f2e-2996-48e4-a03c-ba39fb64386c",
            FieldType::RichText => "ed2ad39d-32fc-4585-8f5b-2e93463f050a",
            FieldType::Text => "a1e7ed6f-5083-477b-b44c-9943a6181359",
            FieldType::TextArea => "80108f9d-1e75-40fa-9fa9-02be4ddc1da1",
            FieldType::Telephone => "3f62f67a-1cee-403a-bec6-aa02a9804edb",
            FieldType::Url => "c820d32f-44df-4c2a-9c1e-18734e864fd5",
        }
    }

    /// The readable name, identical to the serde representation.
    pub fn name(self) -> &'static str {
        match self {
            FieldType::Date => "date",
            FieldType::DateTime => "date-time",
            FieldType::Email => "email",
            FieldType::Lookup => "lookup",
            FieldType::Number => "number",
            FieldType::Picklist => "picklist",
            FieldType::RichText => "rich-text",
            FieldType::Text => "text",
            FieldType::TextArea => "text-area",
            FieldType::Telephone => "telephone",
            FieldType::Url => "url",
        }
    }
}

/// Immutable id -> type map, inverted from [`FieldType::id`] once at startup.
#[derive(Debug)]
pub struct TypeDictionary {
    by_id: HashMap<&'static str, FieldType>,
}

impl TypeDictionary {
    /// Build the dictionary.
    ///
    /// Panics if two field types share an id: the inversion must stay a
    /// bijection, and a duplicate should stop the process at startup.
    pub fn new() -> Self {
        let mut by_id = HashMap::with_capacity(FieldType::ALL.len());
        for ft in FieldType::ALL {
            let previous = by_id.insert(ft.id(), ft);
            assert!(
                previous.is_none(),
                "duplicate field type id {} ({:?} and {:?})",
                ft.id(),
                previous.unwrap(),
                ft
            );
        }
        Self { by_id }
    }

    /// Resolve an upstream id to its field type. `None` means the response
    /// carried an id this build does not know; callers must treat that as a
    /// decoding failure.
    pub fn name_for_id(&self, id: &str) -> Option<FieldType> {
        self.by_id.get(id).copied()
    }
}

impl Default for TypeDictionary {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bijection_round_trip() {
        let dict = TypeDictionary::new();
        for ft in FieldType::ALL {
            assert_eq!(dict.name_for_id(ft.id()), Some(ft));
        }
    }

    #[test]
    fn test_every_id_is_distinct() {
        let dict = TypeDictionary::new();
        assert_eq!(dict.by_id.len(), FieldType::ALL.len());
    }

    #[test]
    fn test_unknown_id_misses() {
        let dict = TypeDictionary::new();
        assert_eq!(dict.name_for_id("00000000-0000-0000-0000-000000000000"), None);
        assert_eq!(dict.name_for_id("date"), None);
    }

    #[test]
    fn test_serde_names_match() {
        for ft in FieldType::ALL {
            let json = serde_json::to_value(ft).unwrap();
            assert_eq!(json, serde_json::Value::String(ft.name().to_string()));
        }
    }
}
