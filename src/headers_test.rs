use super::*;

#[test]
fn bearer_formats_token() {
    assert_eq!(bearer("abc123"), "Bearer abc123");
}

#[test]
fn new_headers_are_empty() {
    let headers = DefaultHeaders::new();
    assert!(headers.is_empty());
    assert!(headers.authorization().is_none());
}

#[test]
fn set_default_header_replaces_previous_value() {
    let mut headers = DefaultHeaders::new();
    headers.set_default_header("Authorization", "Bearer one").unwrap();
    headers.set_default_header("authorization", "Bearer two").unwrap();
    assert_eq!(headers.len(), 1);
    assert_eq!(headers.authorization(), Some("Bearer two"));
}

#[test]
fn authorization_value_is_marked_sensitive() {
    let mut headers = DefaultHeaders::new();
    headers.set_default_header("Authorization", "Bearer secret").unwrap();
    let value = headers.as_header_map().get(AUTHORIZATION).unwrap();
    assert!(value.is_sensitive());
}

#[test]
fn set_default_header_rejects_bad_name() {
    let mut headers = DefaultHeaders::new();
    let err = headers.set_default_header("bad name", "x").unwrap_err();
    assert_eq!(err.error_code(), "E_HEADER_NAME");
}

#[test]
fn set_default_header_rejects_newline_value() {
    let mut headers = DefaultHeaders::new();
    let err = headers.set_default_header("X-Trace", "a\nb").unwrap_err();
    assert_eq!(err.error_code(), "E_HEADER_VALUE");
    assert!(headers.is_empty());
}

#[test]
fn client_builds_with_defaults() {
    let mut headers = DefaultHeaders::new();
    headers.set_default_header("Authorization", "Bearer abc").unwrap();
    assert!(headers.client(ApiTimeouts::default()).is_ok());
}
