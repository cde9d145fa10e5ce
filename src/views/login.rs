//! Login view.

use crate::client::{ClientError, EstateApi};
use crate::model::Credentials;
use crate::session::SessionStore;
use crate::views::Route;

/// What the login screen shows after a failed submit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginFailure {
    /// A field was left blank; no request was sent
    MissingFields,
    /// The backend answered 401
    InvalidCredentials,
    /// Anything else: network, server, or session storage
    Other,
}

impl LoginFailure {
    pub fn message(&self) -> &'static str {
        match self {
            LoginFailure::MissingFields => "Username and password are required",
            LoginFailure::InvalidCredentials => "Invalid credentials",
            LoginFailure::Other => "Error logging in",
        }
    }

    fn from_client(err: &ClientError) -> Self {
        if err.is_unauthorized() {
            LoginFailure::InvalidCredentials
        } else {
            LoginFailure::Other
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoginView {
    pub username: String,
    pub password: String,
    password_visible: bool,
    error: Option<LoginFailure>,
}

impl LoginView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credentials(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            ..Default::default()
        }
    }

    pub fn error(&self) -> Option<LoginFailure> {
        self.error
    }

    pub fn error_message(&self) -> Option<&'static str> {
        self.error.map(|e| e.message())
    }

    pub fn password_visible(&self) -> bool {
        self.password_visible
    }

    pub fn toggle_password_visibility(&mut self) {
        self.password_visible = !self.password_visible;
    }

    /// Submit the form. On success the session flag is set and the
    /// property list is returned as the next route.
    pub async fn submit<A, S>(&mut self, api: &A, session: &S) -> Option<Route>
    where
        A: EstateApi + ?Sized,
        S: SessionStore + ?Sized,
    {
        if self.username.trim().is_empty() || self.password.is_empty() {
            self.error = Some(LoginFailure::MissingFields);
            return None;
        }

        let credentials = Credentials::new(self.username.trim(), self.password.clone());

        if let Err(e) = api.login(&credentials).await {
            tracing::warn!(username = %credentials.username, error = %e, "Login failed");
            self.error = Some(LoginFailure::from_client(&e));
            return None;
        }

        if let Err(e) = session.set_authenticated() {
            tracing::error!(error = %e, "Failed to store session flag");
            self.error = Some(LoginFailure::Other);
            return None;
        }

        tracing::info!(username = %credentials.username, "Logged in");
        self.error = None;
        Some(Route::Properties)
    }
}
