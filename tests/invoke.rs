//! End-to-end tool invocation against a stub upstream.
//!
//! Each test starts a one-shot HTTP responder on a local port that returns
//! a canned JSON body, points the client at it, and drives a call through
//! the router exactly as the transport would.

use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use fireberry_mcp::api::FireberryClient;
use fireberry_mcp::tools::{create_default_router, ToolRouter};
use fireberry_mcp::types::ToolResponse;

/// Serve exactly one request with the given JSON body, then close.
async fn stub_upstream(body: Value) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let body = body.to_string();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();

        // Drain the request: headers, then content-length bytes of body.
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        let header_end = loop {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                return;
            }
            request.extend_from_slice(&buf[..n]);
            if let Some(pos) = request.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
        };
        let headers = String::from_utf8_lossy(&request[..header_end]).to_lowercase();
        let content_length: usize = headers
            .lines()
            .find_map(|l| l.strip_prefix("content-length:"))
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(0);
        while request.len() - header_end < content_length {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }

        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
    });

    format!("http://{addr}")
}

fn router(base_url: &str) -> ToolRouter {
    create_default_router(FireberryClient::new(base_url, "test-token"))
}

async fn invoke(base_url: &str, tool: &str, args: Value) -> ToolResponse {
    router(base_url).invoke(tool, args).await.unwrap()
}

#[tokio::test]
async fn record_create_success_pretty_prints_the_body() {
    let body = json!({
        "record": {},
        "success": true,
        "_id": "f3b4a3a0-6a7e-4a9e-9a1c-2f62b3a3c111"
    });
    let base = stub_upstream(body.clone()).await;

    let response = invoke(
        &base,
        "record_create",
        json!({"objectType": 1, "fields": {"name": "Acme"}}),
    )
    .await;

    assert!(!response.is_error);
    let echoed: Value = serde_json::from_str(&response.text_content()).unwrap();
    assert_eq!(echoed, body);
    // Pretty-printed, not compact.
    assert!(response.text_content().contains('\n'));
}

#[tokio::test]
async fn record_create_business_error_is_surfaced_verbatim() {
    let base = stub_upstream(json!({"Message": "Invalid Record Name"})).await;

    let response = invoke(
        &base,
        "record_create",
        json!({"objectType": 1, "fields": {"name": "Acme"}}),
    )
    .await;

    assert!(response.is_error);
    assert_eq!(response.text_content(), "Invalid Record Name");
}

#[tokio::test]
async fn metadata_fields_translates_type_ids() {
    let base = stub_upstream(json!({
        "data": [{
            "label": "Email",
            "fieldName": "emailaddress1",
            "systemName": "emailaddress1",
            "systemFieldTypeId": "c713d2f7-8fa9-43c3-8062-f07486eaf567"
        }],
        "success": true,
        "message": ""
    }))
    .await;

    let response = invoke(&base, "metadata_fields", json!({"objectType": 1})).await;

    assert!(!response.is_error);
    let fields: Value = serde_json::from_str(&response.text_content()).unwrap();
    assert_eq!(fields[0]["fieldType"], "email");
    assert!(fields[0].get("systemFieldTypeId").is_none());
}

#[tokio::test]
async fn metadata_fields_fails_closed_on_unknown_type_id() {
    let base = stub_upstream(json!({
        "data": [{
            "label": "Mystery",
            "fieldName": "mystery",
            "systemName": "mystery",
            "systemFieldTypeId": "11111111-1111-1111-1111-111111111111"
        }],
        "success": true,
        "message": ""
    }))
    .await;

    let response = invoke(&base, "metadata_fields", json!({"objectType": 1})).await;

    assert!(response.is_error);
    assert_eq!(response.text_content(), "Invalid response format from API");
}

#[tokio::test]
async fn metadata_picklist_normalizes_the_envelope() {
    let base = stub_upstream(json!({
        "data": {
            "label": "Status",
            "fieldName": "status",
            "fieldObjectType": "1",
            "systemName": "status",
            "values": [
                {"name": "Open", "value": "1"},
                {"name": "Closed", "value": "2"}
            ],
            "systemFieldTypeId": "b4919f2e-2996-48e4-a03c-ba39fb64386c"
        },
        "success": true,
        "message": ""
    }))
    .await;

    let response = invoke(
        &base,
        "metadata_picklist",
        json!({"objectType": 1, "fieldName": "status"}),
    )
    .await;

    assert!(!response.is_error);
    let picklist: Value = serde_json::from_str(&response.text_content()).unwrap();
    assert_eq!(picklist["fieldType"], "picklist");
    assert_eq!(picklist["values"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn schema_mismatch_yields_the_generic_message() {
    let base = stub_upstream(json!({"totally": "unexpected"})).await;

    let response = invoke(&base, "metadata_objects", json!({})).await;

    assert!(response.is_error);
    assert_eq!(response.text_content(), "Invalid response format from API");
}

#[tokio::test]
async fn object_create_checks_the_error_shape_despite_http_200() {
    let base = stub_upstream(json!({"Message": "An error has occurred."})).await;

    let response = invoke(
        &base,
        "object_create",
        json!({"name": "Account", "collectionname": "Accounts"}),
    )
    .await;

    assert!(response.is_error);
    assert_eq!(response.text_content(), "An error has occurred.");
}

#[tokio::test]
async fn object_create_success() {
    let base = stub_upstream(json!({
        "success": true,
        "record": {"objecttypecode": 1012},
        "_id": "f3b4a3a0-6a7e-4a9e-9a1c-2f62b3a3c111"
    }))
    .await;

    let response = invoke(
        &base,
        "object_create",
        json!({"name": "Account", "collectionname": "Accounts"}),
    )
    .await;

    assert!(!response.is_error);
    let created: Value = serde_json::from_str(&response.text_content()).unwrap();
    assert_eq!(created["record"]["objecttypecode"], 1012);
}

#[tokio::test]
async fn field_create_success() {
    let base = stub_upstream(json!({
        "success": true,
        "data": {"systemField": [{"fieldname": "pcfNickname"}]},
        "message": "field created"
    }))
    .await;

    let response = invoke(
        &base,
        "field_create",
        json!({
            "objectType": 1,
            "fieldType": "text",
            "fieldName": "pcfNickname",
            "label": "Nickname"
        }),
    )
    .await;

    assert!(!response.is_error);
    let created: Value = serde_json::from_str(&response.text_content()).unwrap();
    assert_eq!(created["data"]["systemField"][0]["fieldname"], "pcfNickname");
}

#[tokio::test]
async fn network_failure_is_an_unknown_error() {
    // Nothing is listening here.
    let response = invoke(
        "http://127.0.0.1:1",
        "metadata_fields",
        json!({"objectType": 1}),
    )
    .await;

    assert!(response.is_error);
    assert_eq!(response.text_content(), "Unknown error");
}

#[tokio::test]
async fn validation_failure_never_reaches_the_upstream() {
    // No stub at all: validation must fail before any connection attempt.
    let response = invoke(
        "http://127.0.0.1:1",
        "field_create",
        json!({
            "objectType": 1,
            "fieldType": "lookup",
            "label": "Owner"
        }),
    )
    .await;

    assert!(response.is_error);
    let text = response.text_content();
    assert!(text.starts_with("Invalid arguments for field_create:"));
    assert!(text.contains("relatedObjectType"));
}

#[tokio::test]
async fn update_record_success() {
    let base = stub_upstream(json!({
        "success": true,
        "record": {"name": "Acme Ltd"}
    }))
    .await;

    let response = invoke(
        &base,
        "record_update",
        json!({
            "objectType": 1,
            "recordId": "f3b4a3a0-6a7e-4a9e-9a1c-2f62b3a3c111",
            "fields": {"name": "Acme Ltd"}
        }),
    )
    .await;

    assert!(!response.is_error);
    let updated: Value = serde_json::from_str(&response.text_content()).unwrap();
    assert_eq!(updated["record"]["name"], "Acme Ltd");
}
