//! Error case tests
//!
//! Error conversions and messages at the crate boundary

use dressing_core::AccountError;
use dressing_room::error::DressingError;
use dressing_room::replay::ReplayScript;
use dressing_room::{Config, JsonStore};
use tempfile::tempdir;

/// Opening a missing store for sign-in points at registration
#[test]
fn test_missing_store_for_login() {
    let dir = tempdir().expect("Failed to create temp dir");
    let err = match JsonStore::open_existing(&dir.path().join("store.json")) {
        Err(err) => err,
        Ok(_) => panic!("store should not exist"),
    };
    assert!(matches!(err, DressingError::StoreNotFound(_)));
    assert!(err.to_string().contains("register"));
}

#[test]
fn test_account_errors_wrap_transparently() {
    let err: DressingError = AccountError::UsernameTaken.into();
    assert!(matches!(err, DressingError::Core(_)));
    assert_eq!(err.to_string(), "Account error: username already taken");
}

#[test]
fn test_missing_script_file_is_io() {
    let err = ReplayScript::load(std::path::Path::new("/nonexistent/script-12345.json")).unwrap_err();
    assert!(matches!(err, DressingError::Io(_)));
}

#[test]
fn test_malformed_config_is_json_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "[1, 2").unwrap();
    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, DressingError::Json(_)));
}

/// Every variant renders a non-empty message
#[test]
fn test_error_display() {
    let errors = vec![
        DressingError::Config("no home".to_string()),
        DressingError::StoreNotFound("store.json".to_string()),
        DressingError::Script("bad event".to_string()),
        DressingError::UnknownTheme("gothic".to_string()),
        DressingError::UnknownGarment(42),
        DressingError::Prompt("not a terminal".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "empty message for {:?}", err);
    }
}
