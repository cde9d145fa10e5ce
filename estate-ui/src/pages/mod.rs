//! Pages
//!
//! Top-level page components for each route.

pub mod login;
pub mod properties;
pub mod register;

pub use login::Login;
pub use properties::Properties;
pub use register::Register;
