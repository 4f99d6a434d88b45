use super::*;

#[test]
fn success_body_yields_response() {
    let out = interpret_reply(true, r#"{"response":"hello there"}"#).unwrap();
    assert_eq!(out, "hello there");
}

#[test]
fn error_status_yields_api_error() {
    let err = interpret_reply(false, r#"{"error":"Missing 'chat' or 'model' in request body."}"#)
        .unwrap_err();
    assert!(matches!(err, ClientError::Api(msg) if msg.contains("Missing")));
}

#[test]
fn unparseable_body_is_a_transport_failure() {
    let err = interpret_reply(true, "<html>bad gateway</html>").unwrap_err();
    assert!(matches!(err, ClientError::Http(_)));
}

#[test]
fn missing_fields_default_to_empty() {
    // A 200 with no response field still resolves, as the original client did.
    let out = interpret_reply(true, "{}").unwrap();
    assert_eq!(out, "");
}
