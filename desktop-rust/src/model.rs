use dressing_core::{DressSession, Profile, ResultView};

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub username: String,
    pub display_name: String,
    pub password: String,
    /// Avatar images found under the asset root
    pub avatars: Vec<String>,
    pub avatar_index: usize,
    pub message: String,
}

impl RegisterForm {
    pub fn with_avatars(avatars: Vec<String>) -> Self {
        Self {
            avatars,
            ..Self::default()
        }
    }

    pub fn selected_avatar(&self) -> Option<&String> {
        self.avatars.get(self.avatar_index)
    }

    pub fn next_avatar(&mut self) {
        if !self.avatars.is_empty() {
            self.avatar_index = (self.avatar_index + 1) % self.avatars.len();
        }
    }

    pub fn previous_avatar(&mut self) {
        if !self.avatars.is_empty() {
            self.avatar_index = (self.avatar_index + self.avatars.len() - 1) % self.avatars.len();
        }
    }
}

/// The screen currently shown; each variant owns its own state
pub enum Screen {
    Login(LoginForm),
    Register(RegisterForm),
    Menu(Profile),
    Dress(Box<DressSession>),
    Result(ResultView),
}

impl Default for Screen {
    fn default() -> Self {
        Screen::Login(LoginForm::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_avatar_cycle_wraps() {
        let mut form = RegisterForm::with_avatars(vec!["a.png".into(), "b.png".into(), "c.png".into()]);
        form.previous_avatar();
        assert_eq!(form.selected_avatar().map(String::as_str), Some("c.png"));
        form.next_avatar();
        form.next_avatar();
        assert_eq!(form.selected_avatar().map(String::as_str), Some("b.png"));
    }

    #[test]
    fn test_no_avatars() {
        let mut form = RegisterForm::default();
        form.next_avatar();
        assert!(form.selected_avatar().is_none());
        assert!(matches!(Screen::default(), Screen::Login(_)));
    }
}
