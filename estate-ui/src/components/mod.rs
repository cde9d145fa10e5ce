//! UI Components
//!
//! Reusable Leptos components for the pages.

pub mod password_input;
pub mod property_table;

pub use password_input::PasswordInput;
pub use property_table::PropertyTable;
