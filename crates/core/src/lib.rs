//! Framework-free domain logic for the extranet backend.
//!
//! Everything in this crate is usable without axum or sqlx: the error
//! taxonomy, shared type aliases, and the username/avatar rules enforced
//! at the API boundary.

pub mod avatar;
pub mod error;
pub mod types;
pub mod username;
