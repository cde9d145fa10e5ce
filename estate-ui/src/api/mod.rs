//! API Client
//!
//! HTTP calls to the Estate REST API.

pub mod client;

pub use client::*;
