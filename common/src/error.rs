//! Error types

use thiserror::Error;

/// Shared error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Account error: {0}")]
    Account(#[from] AccountError),
}

/// Why an account operation was refused
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccountError {
    #[error("username too short (min 3)")]
    UsernameTooShort,

    #[error("username must be at most 24 characters without spaces")]
    UsernameInvalid,

    #[error("display name too short (min 3)")]
    DisplayNameTooShort,

    #[error("display name too long (max 24)")]
    DisplayNameTooLong,

    #[error("password too short (min 6)")]
    PasswordTooShort,

    #[error("password too long (max 32)")]
    PasswordTooLong,

    #[error("username already taken")]
    UsernameTaken,

    #[error("unknown user")]
    UnknownUser,

    #[error("wrong password")]
    WrongPassword,

    #[error("store unavailable: {0}")]
    Store(String),
}

/// Result alias
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = Error::Io(io_error);
        let display = format!("{}", error);
        assert!(display.contains("IO error"));
        assert!(display.contains("file not found"));
    }

    #[test]
    fn test_error_display_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let error = Error::Json(json_error);
        assert!(format!("{}", error).contains("JSON error"));
    }

    #[test]
    fn test_error_display_store() {
        let error = Error::Store("catalog table missing".to_string());
        assert_eq!(format!("{}", error), "Store error: catalog table missing");
    }

    #[test]
    fn test_error_from_account() {
        let error: Error = AccountError::WrongPassword.into();
        assert!(matches!(error, Error::Account(AccountError::WrongPassword)));
        assert_eq!(format!("{}", error), "Account error: wrong password");
    }

    #[test]
    fn test_error_from_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let error: Error = io_error.into();
        assert!(matches!(error, Error::Io(_)));
    }
}
