//! User entity model and DTOs.

use sqlx::FromRow;

use extranet_core::types::{DbId, Timestamp};

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses
/// directly. Handlers build their own response types from the fields they
/// need.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub password_hash: String,
    pub name: Option<String>,
    pub surname: Option<String>,
    pub email: Option<String>,
    /// Server-managed avatar path, or `None` for the default avatar.
    pub avatar: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new user. The password arrives here already hashed.
#[derive(Debug)]
pub struct CreateUser {
    pub username: String,
    pub password_hash: String,
    pub name: Option<String>,
    pub surname: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<String>,
}

/// Profile fields applied unconditionally on update: submitting `None`
/// clears the column.
#[derive(Debug)]
pub struct ProfileFields {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub email: Option<String>,
}
