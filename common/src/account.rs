//! Accounts
//!
//! Registration rules and the user side of the persistence service. The
//! engine only sees `Profile`; password storage is the store's business.

use crate::error::AccountError;
use crate::types::Profile;

pub const DEFAULT_AVATAR: &str = "assets/avatars/default.png";

pub const USERNAME_MIN: usize = 3;
pub const USERNAME_MAX: usize = 24;
pub const DISPLAY_NAME_MIN: usize = 3;
pub const DISPLAY_NAME_MAX: usize = 24;
pub const PASSWORD_MIN: usize = 6;
pub const PASSWORD_MAX: usize = 32;

/// User side of the persistence service
pub trait UserStore {
    fn authenticate(&self, username: &str, password: &str) -> Result<Profile, AccountError>;

    /// Validates, then stores. Usernames are unique.
    fn create_user(&mut self, user: NewUser) -> Result<Profile, AccountError>;
}

/// A registration request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub display_name: String,
    pub password: String,
    pub avatar: Option<String>,
}

impl NewUser {
    pub fn new(username: impl Into<String>, display_name: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            display_name: display_name.into(),
            password: password.into(),
            avatar: None,
        }
    }

    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }

    /// Trim the names and check the length rules; the avatar falls back to
    /// the default one. The password is kept exactly as typed.
    pub fn validate(self) -> Result<NewUser, AccountError> {
        let username = self.username.trim().to_string();
        let display_name = self.display_name.trim().to_string();
        let password = self.password;

        let username_len = username.chars().count();
        if username_len < USERNAME_MIN {
            return Err(AccountError::UsernameTooShort);
        }
        if username_len > USERNAME_MAX || username.chars().any(char::is_whitespace) {
            return Err(AccountError::UsernameInvalid);
        }

        let display_len = display_name.chars().count();
        if display_len < DISPLAY_NAME_MIN {
            return Err(AccountError::DisplayNameTooShort);
        }
        if display_len > DISPLAY_NAME_MAX {
            return Err(AccountError::DisplayNameTooLong);
        }

        let password_len = password.chars().count();
        if password_len < PASSWORD_MIN {
            return Err(AccountError::PasswordTooShort);
        }
        if password_len > PASSWORD_MAX {
            return Err(AccountError::PasswordTooLong);
        }

        let avatar = self
            .avatar
            .map(|avatar| avatar.trim().to_string())
            .filter(|avatar| !avatar.is_empty())
            .unwrap_or_else(|| DEFAULT_AVATAR.to_string());

        Ok(NewUser {
            username,
            display_name,
            password,
            avatar: Some(avatar),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_user_is_trimmed() {
        let user = NewUser::new("  mira ", " Mira V ", " secret1 ").validate().unwrap();
        assert_eq!(user.username, "mira");
        assert_eq!(user.display_name, "Mira V");
        assert_eq!(user.password, " secret1 ");
        assert_eq!(user.avatar.as_deref(), Some(DEFAULT_AVATAR));
    }

    #[test]
    fn test_username_rules() {
        assert_eq!(
            NewUser::new("mi", "Mira", "secret1").validate(),
            Err(AccountError::UsernameTooShort)
        );
        assert_eq!(
            NewUser::new("mi ra", "Mira", "secret1").validate(),
            Err(AccountError::UsernameInvalid)
        );
        assert_eq!(
            NewUser::new("m".repeat(25), "Mira", "secret1").validate(),
            Err(AccountError::UsernameInvalid)
        );
        assert!(NewUser::new("m".repeat(24), "Mira", "secret1").validate().is_ok());
    }

    #[test]
    fn test_display_name_rules() {
        assert_eq!(
            NewUser::new("mira", "Mi", "secret1").validate(),
            Err(AccountError::DisplayNameTooShort)
        );
        assert_eq!(
            NewUser::new("mira", "M".repeat(25), "secret1").validate(),
            Err(AccountError::DisplayNameTooLong)
        );
    }

    #[test]
    fn test_password_rules() {
        assert_eq!(
            NewUser::new("mira", "Mira", "12345").validate(),
            Err(AccountError::PasswordTooShort)
        );
        assert_eq!(
            NewUser::new("mira", "Mira", "x".repeat(33)).validate(),
            Err(AccountError::PasswordTooLong)
        );
        assert!(NewUser::new("mira", "Mira", "x".repeat(32)).validate().is_ok());
    }

    /// Surrounding spaces count towards the password length
    #[test]
    fn test_password_length_counts_spaces() {
        assert!(NewUser::new("mira", "Mira", "  abcd").validate().is_ok());
        assert_eq!(
            NewUser::new("mira", "Mira", format!(" {} ", "x".repeat(31))).validate(),
            Err(AccountError::PasswordTooLong)
        );
    }

    #[test]
    fn test_chosen_avatar_kept() {
        let user = NewUser::new("mira", "Mira", "secret1")
            .with_avatar("assets/avatars/cat.png")
            .validate()
            .unwrap();
        assert_eq!(user.avatar.as_deref(), Some("assets/avatars/cat.png"));
    }
}
