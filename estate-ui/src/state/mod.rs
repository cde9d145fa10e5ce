//! State Management
//!
//! The session flag and the form models behind the pages.

pub mod model;
pub mod session;

pub use model::{
    validate_login, validate_registration, FormError, LoginFailure, Property, PropertyDraft,
    PropertyForm, RegisterFailure,
};
