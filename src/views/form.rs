//! Property form state: raw field text as typed, parsed on submit.

use std::fmt;
use thiserror::Error;

use crate::model::{Property, PropertyDraft};

/// Input fields of the property form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Address,
    Price,
    Size,
    Description,
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FormField::Address => "Address",
            FormField::Price => "Price",
            FormField::Size => "Size",
            FormField::Description => "Description",
        };
        f.write_str(name)
    }
}

/// Why a form could not become a [`PropertyDraft`]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormError {
    #[error("{0} is required")]
    Missing(FormField),

    #[error("{0} must be a number")]
    NotANumber(FormField),

    #[error("{0} cannot be negative")]
    Negative(FormField),
}

/// The create/edit form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyForm {
    pub address: String,
    pub price: String,
    pub size: String,
    pub description: String,
}

impl PropertyForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Form prefilled from an existing row
    pub fn from_property(property: &Property) -> Self {
        Self {
            address: property.address.clone(),
            price: property.price.to_string(),
            size: property.size.to_string(),
            description: property.description.clone(),
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Address => self.address = value,
            FormField::Price => self.price = value,
            FormField::Size => self.size = value,
            FormField::Description => self.description = value,
        }
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Address => &self.address,
            FormField::Price => &self.price,
            FormField::Size => &self.size,
            FormField::Description => &self.description,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Parse the fields. All four are required; price and size must be
    /// finite and non-negative.
    pub fn to_draft(&self) -> Result<PropertyDraft, FormError> {
        let address = required(&self.address, FormField::Address)?;
        let price = number(&self.price, FormField::Price)?;
        let size = number(&self.size, FormField::Size)?;
        let description = required(&self.description, FormField::Description)?;

        Ok(PropertyDraft::new(address, price, size, description))
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
