//! HTTP handlers, one module per resource.

pub mod auth;
pub mod products;
pub mod profile;
