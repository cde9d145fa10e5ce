//! Register view.
//!
//! Passwords are checked locally (match, then length) before anything is
//! sent to the backend.

use crate::client::EstateApi;
use crate::model::Credentials;
use crate::views::Route;

pub const PASSWORD_MIN_LEN: usize = 8;
pub const PASSWORD_MAX_LEN: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterFailure {
    MissingFields,
    PasswordMismatch,
    PasswordLength,
    /// The backend refused or could not be reached
    Rejected,
}

impl RegisterFailure {
    pub fn message(&self) -> &'static str {
        match self {
            RegisterFailure::MissingFields => "All fields are required",
            RegisterFailure::PasswordMismatch => "Passwords do not match",
            RegisterFailure::PasswordLength => "Password must be between 8 and 20 characters",
            RegisterFailure::Rejected => "Error registering user",
        }
    }

    /// True for failures caught before any request
    pub fn is_local(&self) -> bool {
        !matches!(self, RegisterFailure::Rejected)
    }
}

#[derive(Debug, Clone, Default)]
pub struct RegisterView {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
    password_visible: bool,
    confirm_visible: bool,
    error: Option<RegisterFailure>,
}

impl RegisterView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fields(
        username: impl Into<String>,
        password: impl Into<String>,
        confirm_password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            confirm_password: confirm_password.into(),
            ..Default::default()
        }
    }

    pub fn error(&self) -> Option<RegisterFailure> {
        self.error
    }

    pub fn error_message(&self) -> Option<&'static str> {
        self.error.map(|e| e.message())
    }

    pub fn password_visible(&self) -> bool {
        self.password_visible
    }

    pub fn confirm_visible(&self) -> bool {
        self.confirm_visible
    }

    pub fn toggle_password_visibility(&mut self) {
        self.password_visible = !self.password_visible;
    }

    pub fn toggle_confirm_visibility(&mut self) {
        self.confirm_visible = !self.confirm_visible;
    }

    /// Local checks, in the order the user sees them
    pub fn validate(&self) -> Result<(), RegisterFailure> {
        if self.username.trim().is_empty()
            || self.password.is_empty()
            || self.confirm_password.is_empty()
        {
            return Err(RegisterFailure::MissingFields);
        }
        if self.password != self.confirm_password {
            return Err(RegisterFailure::PasswordMismatch);
        }
        let len = self.password.chars().count();
        if !(PASSWORD_MIN_LEN..=PASSWORD_MAX_LEN).contains(&len) {
            return Err(RegisterFailure::PasswordLength);
        }
        Ok(())
    }

    /// Submit the form. On success the login screen is the next route.
    pub async fn submit<A>(&mut self, api: &A) -> Option<Route>
    where
        A: EstateApi + ?Sized,
    {
        if let Err(failure) = self.validate() {
            self.error = Some(failure);
            return None;
        }

        let credentials = Credentials::new(self.username.trim(), self.password.clone());

        match api.register(&credentials).await {
            Ok(()) => {
                tracing::info!(username = %credentials.username, "Registered");
                self.error = None;
                Some(Route::Login)
            }
            Err(e) => {
                tracing::error!(username = %credentials.username, error = %e, "Registration failed");
                self.error = Some(RegisterFailure::Rejected);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::fake::{Call, FakeApi};

    #[tokio::test]
    async fn test_mismatch_never_calls_backend() {
        let api = FakeApi::new();
        let mut view = RegisterView::with_fields("carol", "password123", "password124");

        assert_eq!(view.submit(&api).await, None);
        assert_eq!(view.error(), Some(RegisterFailure::PasswordMismatch));
        assert_eq!(view.error_message(), Some("Passwords do not match"));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_length_bounds_never_call_backend() {
        let api = FakeApi::new();

        for password in ["short", "1234567", "123456789012345678901"] {
            let mut view = RegisterView::with_fields("carol", password, password);
            assert_eq!(view.submit(&api).await, None);
            assert_eq!(view.error(), Some(RegisterFailure::PasswordLength));
        }

        assert!(api.calls().is_empty());
    }

    #[test]
    fn test_length_bounds_inclusive() {
        assert!(RegisterView::with_fields("u", "12345678", "12345678")
            .validate()
            .is_ok());
        assert!(RegisterView::with_fields("u", "12345678901234567890", "12345678901234567890")
            .validate()
            .is_ok());
        // Characters, not bytes
        assert!(RegisterView::with_fields("u", "ñññññññññññññññññññ", "ñññññññññññññññññññ")
            .validate()
            .is_ok());
    }

    #[test]
    fn test_mismatch_checked_before_length() {
        let view = RegisterView::with_fields("u", "short", "other");
        assert_eq!(view.validate(), Err(RegisterFailure::PasswordMismatch));
    }

    #[tokio::test]
    async fn test_success_navigates_to_login() {
        let api = FakeApi::new();
        let mut view = RegisterView::with_fields("carol", "password123", "password123");

        assert_eq!(view.submit(&api).await, Some(Route::Login));
        assert_eq!(api.calls(), vec![Call::Register("carol".to_string())]);
        assert!(view.error().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_user_shows_generic_error() {
        let api = FakeApi::new().with_user("carol", "whatever1");
        let mut view = RegisterView::with_fields("carol", "password123", "password123");

        assert_eq!(view.submit(&api).await, None);
        assert_eq!(view.error(), Some(RegisterFailure::Rejected));
        assert_eq!(view.error_message(), Some("Error registering user"));
        assert!(!RegisterFailure::Rejected.is_local());
    }

    #[tokio::test]
    async fn test_missing_fields() {
        let api = FakeApi::new();
        let mut view = RegisterView::with_fields("", "password123", "password123");

        assert_eq!(view.submit(&api).await, None);
        assert_eq!(view.error(), Some(RegisterFailure::MissingFields));
        assert!(api.calls().is_empty());
    }

    #[test]
    fn test_visibility_toggles_are_independent() {
        let mut view = RegisterView::new();
        view.toggle_confirm_visibility();
        assert!(view.confirm_visible());
        assert!(!view.password_visible());
    }
}
