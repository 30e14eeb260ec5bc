use super::*;

// =============================================================
// Failure message extraction
// =============================================================

#[test]
fn failure_message_prefers_message_field() {
    let body: ErrorBody =
        serde_json::from_str(r#"{"message":"Invalid credentials","error":"ignored"}"#).unwrap();
    assert_eq!(failure_message(401, Some(body)), "Invalid credentials");
}

#[test]
fn failure_message_falls_back_to_error_field() {
    let body: ErrorBody = serde_json::from_str(r#"{"error":"Username taken"}"#).unwrap();
    assert_eq!(failure_message(409, Some(body)), "Username taken");
}

#[test]
fn failure_message_uses_status_when_body_is_empty() {
    let body: ErrorBody = serde_json::from_str("{}").unwrap();
    assert_eq!(failure_message(500, Some(body)), "request failed: 500");
}

#[test]
fn failure_message_uses_status_when_body_is_not_json() {
    assert_eq!(failure_message(502, None), "request failed: 502");
}
