//! Page Models
//!
//! Property types as the API sends them, the string-backed property form,
//! and the local checks run before any request.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const PASSWORD_MIN_LEN: usize = 8;
pub const PASSWORD_MAX_LEN: usize = 20;

/// A stored property
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: i64,
    pub address: String,
    pub price: f64,
    pub size: f64,
    pub description: String,
}

/// Body of create and update requests
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PropertyDraft {
    pub address: String,
    pub price: f64,
    pub size: f64,
    pub description: String,
}

/// Raw form inputs
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PropertyForm {
    pub address: String,
    pub price: String,
    pub size: String,
    pub description: String,
}

/// Input fields of the property form
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormField {
    Address,
    Price,
    Size,
    Description,
}

impl FormField {
    pub fn label(&self) -> &'static str {
        match self {
            FormField::Address => "Address",
            FormField::Price => "Price",
            FormField::Size => "Size",
            FormField::Description => "Description",
        }
    }
}

/// Why the form could not become a [`PropertyDraft`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormError {
    Missing(FormField),
    NotANumber(FormField),
    Negative(FormField),
}

impl FormError {
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormError::Missing(field) => write!(f, "{} is required", field.label()),
            FormError::NotANumber(field) => write!(f, "{} must be a number", field.label()),
            FormError::Negative(field) => write!(f, "{} cannot be negative", field.label()),
        }
    }
}

/// Login checks that fail, locally or at the backend
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoginFailure {
    /// A field was left blank; no request was sent
    MissingFields,
    /// The backend answered 401
    InvalidCredentials,
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
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
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
}

impl PropertyForm {
    pub fn from_property(property: &Property) -> Self {
        Self {
            address: property.address.clone(),
            price: property.price.to_string(),
            size: property.size.to_string(),
            description: property.description.clone(),
        }
    }

    /// Parse the inputs. All four are required; numbers must be finite
    /// and non-negative.
    pub fn to_draft(&self) -> Result<PropertyDraft, FormError> {
        let address = required(&self.address, FormField::Address)?;
        let price = number(&self.price, FormField::Price)?;
        let size = number(&self.size, FormField::Size)?;
        let description = required(&self.description, FormField::Description)?;

        Ok(PropertyDraft {
            address: address.to_string(),
            price,
            size,
            description: description.to_string(),
        })
    }
}

fn required(value: &str, field: FormField) -> Result<&str, FormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(FormError::Missing(field))
    } else {
        Ok(trimmed)
    }
}

fn number(value: &str, field: FormField) -> Result<f64, FormError> {
    let parsed: f64 = required(value, field)?
        .parse()
        .map_err(|_| FormError::NotANumber(field))?;

    if !parsed.is_finite() {
        return Err(FormError::NotANumber(field));
    }
    if parsed < 0.0 {
        return Err(FormError::Negative(field));
    }
    Ok(parsed)
}

pub fn validate_login(username: &str, password: &str) -> Result<(), LoginFailure> {
    if username.trim().is_empty() || password.is_empty() {
        return Err(LoginFailure::MissingFields);
    }
    Ok(())
}

/// Checks run in order: required fields, match, then length
pub fn validate_registration(
    username: &str,
    password: &str,
    confirm: &str,
) -> Result<(), RegisterFailure> {
    if username.trim().is_empty() || password.is_empty() || confirm.is_empty() {
        return Err(RegisterFailure::MissingFields);
    }
    if password != confirm {
        return Err(RegisterFailure::PasswordMismatch);
    }
    let len = password.chars().count();
    if !(PASSWORD_MIN_LEN..=PASSWORD_MAX_LEN).contains(&len) {
        return Err(RegisterFailure::PasswordLength);
    }
    Ok(())
}
