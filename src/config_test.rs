use std::sync::{Mutex, MutexGuard};

use super::*;

static ENV_LOCK: Mutex<()> = Mutex::new(());

fn env_lock() -> MutexGuard<'static, ()> {
    ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// # Safety
/// Callers hold `env_lock()` so no other test touches the environment.
unsafe fn clear_guard_env() {
    unsafe {
        std::env::remove_var("SESSION_STORE_PATH");
        std::env::remove_var("SESSION_KEY");
        std::env::remove_var("LOGIN_PATH");
        std::env::remove_var("LOGIN_ROUTE");
        std::env::remove_var("PUBLIC_PATHS");
        std::env::remove_var("API_BASE_URL");
        std::env::remove_var("API_REQUEST_TIMEOUT_SECS");
        std::env::remove_var("API_CONNECT_TIMEOUT_SECS");
    }
}

// =============================================================================
// from_env
// =============================================================================

#[test]
fn from_env_defaults() {
    let _guard = env_lock();
    unsafe { clear_guard_env() };

    let cfg = GuardConfig::from_env().unwrap();
    assert_eq!(cfg.store_path, DEFAULT_STORE_PATH);
    assert_eq!(cfg.session_key, "user");
    assert_eq!(cfg.routes.login().path, "/login");
    assert_eq!(cfg.routes.login().name, "login");
    assert_eq!(cfg.routes.allow_list(), vec!["/login"]);
    assert_eq!(cfg.api_base_url, DEFAULT_API_BASE_URL);
    assert_eq!(cfg.timeouts, ApiTimeouts::default());
}

#[test]
fn from_env_parses_overrides() {
    let _guard = env_lock();
    unsafe {
        clear_guard_env();
        std::env::set_var("SESSION_STORE_PATH", "/tmp/store.json");
        std::env::set_var("SESSION_KEY", "account");
        std::env::set_var("LOGIN_PATH", "/signin");
        std::env::set_var("LOGIN_ROUTE", "signin");
        std::env::set_var("PUBLIC_PATHS", "/about, /help ,,");
        std::env::set_var("API_BASE_URL", "https://homer.example.test/api/v3/");
        std::env::set_var("API_REQUEST_TIMEOUT_SECS", "5");
        std::env::set_var("API_CONNECT_TIMEOUT_SECS", "nope");
    }

    let cfg = GuardConfig::from_env().unwrap();
    assert_eq!(cfg.store_path, "/tmp/store.json");
    assert_eq!(cfg.session_key, "account");
    assert_eq!(cfg.routes.allow_list(), vec!["/signin", "/about", "/help"]);
    assert_eq!(cfg.routes.login().name, "signin");
    assert_eq!(cfg.api_base_url, "https://homer.example.test/api/v3");
    assert_eq!(cfg.timeouts, ApiTimeouts { request_secs: 5, connect_secs: DEFAULT_API_CONNECT_TIMEOUT_SECS });

    unsafe { clear_guard_env() };
}

#[test]
fn from_env_rejects_empty_login_path() {
    let _guard = env_lock();
    unsafe {
        clear_guard_env();
        std::env::set_var("LOGIN_PATH", "  ");
    }

    let err = GuardConfig::from_env().unwrap_err().to_string();
    assert!(err.contains("LOGIN_PATH"));

    unsafe { clear_guard_env() };
}

// =============================================================================
// parse_public_paths
// =============================================================================

#[test]
fn parse_public_paths_none_is_empty() {
    assert!(parse_public_paths(None).is_empty());
}

#[test]
fn parse_public_paths_skips_blanks() {
    assert_eq!(parse_public_paths(Some(" , /a,")), vec!["/a".to_string()]);
}
