//! Views
//!
//! Front-end independent state for the three screens. Each view owns its
//! form fields and talks to the backend through [`EstateApi`]; the
//! session flag lives behind [`SessionStore`]. Handlers return the
//! [`Route`] to navigate to, if any.
//!
//! [`EstateApi`]: crate::client::EstateApi
//! [`SessionStore`]: crate::session::SessionStore

pub mod form;
pub mod login;
pub mod properties;
pub mod register;

#[cfg(test)]
pub(crate) mod fake;

pub use form::{FormError, FormField, PropertyForm};
pub use login::{LoginFailure, LoginView};
pub use properties::{PropertiesView, SubmitOutcome};
pub use register::{RegisterFailure, RegisterView, PASSWORD_MAX_LEN, PASSWORD_MIN_LEN};

/// Navigation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Properties,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Properties => "/properties",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_paths() {
        assert_eq!(Route::Login.path(), "/login");
        assert_eq!(Route::Register.path(), "/register");
        assert_eq!(Route::Properties.path(), "/properties");
    }
}
