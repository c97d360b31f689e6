use super::*;

#[test]
fn api_error_codes_and_retry() {
    let unavailable = SessionError::Api { status: 503, body: String::new() };
    assert_eq!(unavailable.error_code(), "E_API_RESPONSE");
    assert!(unavailable.retryable());

    let unauthorized = SessionError::Api { status: 401, body: "nope".into() };
    assert!(!unauthorized.retryable());
}

#[test]
fn config_error_not_retryable() {
    let err = SessionError::Config("LOGIN_PATH is empty".into());
    assert_eq!(err.error_code(), "E_CONFIG_PARSE");
    assert!(!err.retryable());
    assert!(err.to_string().contains("LOGIN_PATH"));
}

#[test]
fn already_bootstrapped_message() {
    let err = SessionError::AlreadyBootstrapped;
    assert_eq!(err.error_code(), "E_ALREADY_BOOTSTRAPPED");
    assert_eq!(err.to_string(), "session context already bootstrapped");
}
