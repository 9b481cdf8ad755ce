//! Tests for the login request envelope and server reply classification.
//!
//! These are pure tests; no network access is needed.

use serde_json::{Value, json};
use xtb_relay::types::{Credentials, ServerMessage};

// ===================================================================
// Login request
// ===================================================================

#[test]
fn test_login_request_exact_wire_format() {
    let creds = Credentials::new("user123", "password123");
    let json = creds.login_request().to_json().unwrap();
    assert_eq!(
        json,
        r#"{"command":"login","arguments":{"userId":"user123","password":"password123","appName":"web"}}"#
    );
}

#[test]
fn test_login_request_carries_credentials() {
    for (user, pass) in [("1", "x"), ("12345678", "p@ss \"quoted\""), ("ünï", "")] {
        let creds = Credentials::new(user, pass);
        let value: Value = serde_json::from_str(&creds.login_request().to_json().unwrap()).unwrap();
        assert_eq!(value["command"], "login");
        assert_eq!(value["arguments"]["userId"], user);
        assert_eq!(value["arguments"]["password"], pass);
        assert_eq!(value["arguments"]["appName"], "web");
    }
}

#[test]
fn test_credentials_debug_hides_password() {
    let creds = Credentials::new("user123", "hunter2");
    let debug = format!("{creds:?}");
    assert!(debug.contains("user123"));
    assert!(!debug.contains("hunter2"));
}

// ===================================================================
// Reply classification
// ===================================================================

fn render(value: Value) -> String {
    ServerMessage::classify(&value).to_string()
}

#[test]
fn test_success_reply() {
    assert_eq!(
        render(json!({"status": true, "streamSessionId": "abc123"})),
        "Connection established! StreamSessionId: abc123"
    );
}

#[test]
fn test_success_reply_with_null_session_id() {
    let reply = ServerMessage::classify(&json!({"status": true, "streamSessionId": null}));
    assert!(reply.is_authenticated());
    assert_eq!(reply.to_string(), "Connection established! StreamSessionId: ");
}

#[test]
fn test_error_reply() {
    assert_eq!(
        render(json!({"status": false, "errorDescr": "Invalid login"})),
        "Error: {Invalid login}"
    );
}

#[test]
fn test_missing_session_id_is_failure() {
    let reply = ServerMessage::classify(&json!({"status": true}));
    assert!(!reply.is_authenticated());
    assert_eq!(reply.to_string(), "Error: {}");
}

#[test]
fn test_false_status_with_session_id_is_failure() {
    assert_eq!(
        render(json!({"status": false, "streamSessionId": "abc123"})),
        "Error: {}"
    );
}

#[test]
fn test_truthy_non_boolean_status() {
    // Only a missing field, null and false are falsy.
    assert!(ServerMessage::classify(&json!({"status": 0, "streamSessionId": "s"})).is_authenticated());
    assert!(ServerMessage::classify(&json!({"status": "", "streamSessionId": "s"})).is_authenticated());
    assert!(!ServerMessage::classify(&json!({"status": null, "streamSessionId": "s"})).is_authenticated());
    assert!(!ServerMessage::classify(&json!({"streamSessionId": "s"})).is_authenticated());
}

#[test]
fn test_non_string_fields_render_as_json() {
    assert_eq!(
        render(json!({"status": true, "streamSessionId": 42})),
        "Connection established! StreamSessionId: 42"
    );
    assert_eq!(
        render(json!({"status": false, "errorDescr": {"code": "BE005"}})),
        r#"Error: {{"code":"BE005"}}"#
    );
}

#[test]
fn test_non_object_reply_is_failure() {
    assert_eq!(render(json!([1, 2, 3])), "Error: {}");
    assert_eq!(render(json!("hello")), "Error: {}");
}

#[test]
fn test_parse_from_bytes() {
    let reply = ServerMessage::parse(br#"{"status":true,"streamSessionId":"8469308861804289383"}"#).unwrap();
    assert_eq!(
        reply,
        ServerMessage::Authenticated {
            stream_session_id: json!("8469308861804289383")
        }
    );
}

#[test]
fn test_parse_malformed_payload() {
    let err = ServerMessage::parse(b"not json").unwrap_err();
    assert!(matches!(err, xtb_relay::RelayError::Json(_)));
}
