//! Fireberry REST API client.
//!
//! One method per upstream operation, all following the same state machine:
//!
//! 1. build the request (path from the operation's parameters, `tokenid`
//!    header, JSON body where applicable)
//! 2. send it and parse the body as JSON — network or parse failure is a
//!    terminal `Unknown` error
//! 3. match the body against the declared `{Message}` failure shape FIRST;
//!    the CRM can report a business error with HTTP 200, so status is never
//!    trusted for classification
//! 4. validate against the operation's success contract — mismatch is
//!    `InvalidResponse`, logged with the full body at debug level
//! 5. normalize: strip the opaque `systemFieldTypeId` and substitute the
//!    readable type name via the `TypeDictionary`; an unknown id fails
//!    closed as `InvalidResponse`

pub mod contracts;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::field_types::TypeDictionary;
use self::contracts::{
    CreateField, CreateObject, CreateRecord, Envelope, FieldCreateRequest, FieldKind,
    MetadataField, MetadataObject, MetadataPicklist, RawMetadataField, RawMetadataPicklist,
    UpdateRecord, UpstreamError,
};

/// Object type code of the meta-object that stores object definitions.
/// Creating a record of this type creates a new object type.
const OBJECT_DEFINITION_TYPE: i64 = 58;

/// HTTP client for the Fireberry REST API.
pub struct FireberryClient {
    base_url: String,
    token: String,
    client: reqwest::Client,
    types: TypeDictionary,
}

impl FireberryClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            token: token.into(),
            client: reqwest::Client::new(),
            types: TypeDictionary::new(),
        }
    }

    /// Send a request and parse the body as JSON. Network failures and
    /// non-JSON bodies both end the call as `Unknown`.
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self
            .client
            .request(method, &url)
            .header("tokenid", &self.token)
            .header("Content-Type", "application/json");
        if let Some(body) = body {
            req = req.json(&body);
        }

        let response = req.send().await.map_err(|e| {
            tracing::error!(url = %url, error = %e, "upstream request failed");
            ApiError::Unknown
        })?;

        response.json::<Value>().await.map_err(|e| {
            tracing::error!(url = %url, error = %e, "upstream body was not JSON");
            ApiError::Unknown
        })
    }

    /// List all object types.
    pub async fn metadata_objects(&self) -> Result<Vec<MetadataObject>, ApiError> {
        let body = self.request(Method::GET, "/metadata/records", None).await?;
        let env: Envelope<Vec<MetadataObject>> = decode(body)?;
        if env.data.is_empty() || env.data.iter().any(|o| !o.is_valid()) {
            tracing::debug!("metadata objects failed post-decode validation");
            return Err(ApiError::InvalidResponse);
        }
        Ok(env.data)
    }

    /// List all fields of an object type, type ids translated to names.
    pub async fn metadata_fields(
        &self,
        object_type: i64,
    ) -> Result<Vec<MetadataField>, ApiError> {
        let path = format!("/metadata/records/{object_type}/fields");
        let body = self.request(Method::GET, &path, None).await?;
        let env: Envelope<Vec<RawMetadataField>> = decode(body)?;
        if env.data.is_empty() {
            tracing::debug!(object_type, "metadata fields response was empty");
            return Err(ApiError::InvalidResponse);
        }

        let mut fields = Vec::with_capacity(env.data.len());
        for raw in env.data {
            let type_id = raw.system_field_type_id.clone();
            match raw.normalize(&self.types) {
                Some(field) => fields.push(field),
                None => {
                    tracing::debug!(system_field_type_id = %type_id, "unrecognized field type id");
                    return Err(ApiError::InvalidResponse);
                }
            }
        }
        Ok(fields)
    }

    /// Fetch a picklist field's values.
    pub async fn metadata_picklist(
        &self,
        object_type: i64,
        field_name: &str,
    ) -> Result<MetadataPicklist, ApiError> {
        let path = format!("/metadata/records/{object_type}/fields/{field_name}/values");
        let body = self.request(Method::GET, &path, None).await?;
        let env: Envelope<RawMetadataPicklist> = decode(body)?;
        let type_id = env.data.system_field_type_id.clone();
        env.data.normalize(&self.types).ok_or_else(|| {
            tracing::debug!(system_field_type_id = %type_id, "picklist failed normalization");
            ApiError::InvalidResponse
        })
    }

    /// Create a record of the given object type.
    pub async fn create_record(
        &self,
        object_type: i64,
        fields: &serde_json::Map<String, Value>,
    ) -> Result<CreateRecord, ApiError> {
        let path = format!("/api/v2/record/{object_type}");
        let body = self
            .request(Method::POST, &path, Some(Value::Object(fields.clone())))
            .await?;
        let created: CreateRecord = decode(body)?;
        if !created.is_valid() {
            tracing::debug!(id = %created.id, "create record returned a non-uuid id");
            return Err(ApiError::InvalidResponse);
        }
        Ok(created)
    }

    /// Update an existing record.
    pub async fn update_record(
        &self,
        object_type: i64,
        record_id: &str,
        fields: &serde_json::Map<String, Value>,
    ) -> Result<UpdateRecord, ApiError> {
        let path = format!("/api/v2/record/{object_type}/{record_id}");
        let body = self
            .request(Method::PUT, &path, Some(Value::Object(fields.clone())))
            .await?;
        decode(body)
    }

    /// Create a new object type (a record of the object-definition type).
    pub async fn create_object(
        &self,
        name: &str,
        collectionname: &str,
    ) -> Result<CreateObject, ApiError> {
        let path = format!("/api/v2/record/{OBJECT_DEFINITION_TYPE}");
        let payload = json!({ "name": name, "collectionname": collectionname });
        let body = self.request(Method::POST, &path, Some(payload)).await?;
        let created: CreateObject = decode(body)?;
        if !created.is_valid() {
            tracing::debug!("create object response failed post-decode validation");
            return Err(ApiError::InvalidResponse);
        }
        Ok(created)
    }

    /// Create a field on an object type. The body shape depends on the
    /// field-type variant; see [`field_create_body`].
    pub async fn create_field(
        &self,
        request: &FieldCreateRequest,
    ) -> Result<CreateField, ApiError> {
        let path = format!(
            "/api/v2/system-field/{}/{}",
            request.object_type,
            request.kind.slug()
        );
        let body = self
            .request(Method::POST, &path, Some(field_create_body(request)))
            .await?;
        let created: CreateField = decode(body)?;
        if !created.is_valid() {
            tracing::debug!("create field response failed post-decode validation");
            return Err(ApiError::InvalidResponse);
        }
        Ok(created)
    }
}

/// Classify a parsed body: declared error shape first, then the success
/// contract, otherwise schema mismatch. The two failure kinds must never be
/// conflated — a declared error is surfaced verbatim, a mismatch only as the
/// generic text (the raw body goes to the debug log, never to the caller).
fn decode<T: DeserializeOwned>(body: Value) -> Result<T, ApiError> {
    if let Ok(err) = serde_json::from_value::<UpstreamError>(body.clone()) {
        return Err(ApiError::Upstream(err.message));
    }
    match serde_json::from_value::<T>(body.clone()) {
        Ok(value) => Ok(value),
        Err(e) => {
            tracing::debug!(body = %body, error = %e, "response matched neither contract");
            Err(ApiError::InvalidResponse)
        }
    }
}

/// Build the creation request body for a field. Each variant contributes
/// only its own attributes; the match is exhaustive so a new variant cannot
/// silently omit its required attributes.
fn field_create_body(request: &FieldCreateRequest) -> Value {
    let mut body = serde_json::Map::new();
    if let Some(name) = &request.field_name {
        body.insert("fieldName".to_string(), json!(name));
    }
    body.insert("label".to_string(), json!(request.label));

    match &request.kind {
        FieldKind::Text
        | FieldKind::Date
        | FieldKind::DateTime
        | FieldKind::Telephone
        | FieldKind::Email
        | FieldKind::Url
        | FieldKind::TextArea => {}
        FieldKind::Number { precision } => {
            body.insert("precision".to_string(), json!(precision));
        }
        FieldKind::Lookup {
            related_object_type,
        } => {
            body.insert("relatedObjectType".to_string(), json!(related_object_type));
        }
        FieldKind::Picklist { options } => {
            let options: Vec<Value> = options
                .iter()
                .map(|o| {
                    json!({
                        "order": o.order,
                        "color": o.color,
                        "label": o.label,
                        "value": o.value,
                    })
                })
                .collect();
            body.insert("options".to_string(), Value::Array(options));
        }
    }

    Value::Object(body)
}
