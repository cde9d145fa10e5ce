//! Domain Types
//!
//! Core data structures shared by the client, the views and the backend.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Server-assigned property identifier
pub type PropertyId = i64;

/// Username and password pair sent to `/auth/login` and `/auth/register`
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// A stored property as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: PropertyId,
    pub address: String,
    pub price: f64,
    /// Size in square meters
    pub size: f64,
    pub description: String,
}

impl Property {
    /// The editable fields of this property
    pub fn draft(&self) -> PropertyDraft {
        PropertyDraft {
            address: self.address.clone(),
            price: self.price,
            size: self.size,
            description: self.description.clone(),
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Property[id={}, address='{}', price={:.2}, size={:.2}, description='{}']",
            self.id, self.address, self.price, self.size, self.description
        )
    }
}

/// Property fields without an id: the body of create and update requests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDraft {
    pub address: String,
    pub price: f64,
    pub size: f64,
    pub description: String,
}

impl PropertyDraft {
    pub fn new(
        address: impl Into<String>,
        price: f64,
        size: f64,
        description: impl Into<String>,
    ) -> Self {
        Self {
            address: address.into(),
            price,
            size,
            description: description.into(),
        }
    }

    /// Attach a server-assigned id
    pub fn with_id(self, id: PropertyId) -> Property {
        Property {
            id,
            address: self.address,
            price: self.price,
            size: self.size,
            description: self.description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_debug_hides_password() {
        let creds = Credentials::new("alice", "hunter22");
        let debug = format!("{:?}", creds);
        assert!(debug.contains("alice"));
        assert!(!debug.contains("hunter22"));
    }

    #[test]
    fn test_property_json_shape() {
        let property = PropertyDraft::new("Calle 1", 100000.0, 80.5, "Nice flat").with_id(7);
        let json = serde_json::to_value(&property).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["address"], "Calle 1");
        assert_eq!(json["size"], 80.5);

        let back: Property = serde_json::from_value(json).unwrap();
        assert_eq!(back, property);
    }

    #[test]
    fn test_draft_has_no_id() {
        let draft = PropertyDraft::new("A", 1.0, 2.0, "d");
        let json = serde_json::to_value(&draft).unwrap();
        assert!(json.get("id").is_none());
    }

    #[test]
    fn test_property_display() {
        let property = PropertyDraft::new("Address", 150000.0, 150.0, "Description").with_id(1);
        assert_eq!(
            property.to_string(),
            "Property[id=1, address='Address', price=150000.00, size=150.00, description='Description']"
        );
    }
}
