//! Product entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use extranet_core::types::{DbId, Timestamp};

/// Full product row from the `products` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Product {
    pub id: DbId,
    pub name: String,
    pub image_path: Option<String>,
    pub description: Option<String>,
    pub owner_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Product row joined with the owner's username, for catalog listings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProductWithOwner {
    pub id: DbId,
    pub name: String,
    pub image_path: Option<String>,
    pub description: Option<String>,
    pub owner_id: DbId,
    pub owner_username: String,
    pub created_at: Timestamp,
}

/// DTO for creating a new product. The owner is never client-supplied; it
/// comes from the authenticated caller.
#[derive(Debug, Deserialize)]
pub struct CreateProduct {
    pub name: String,
    pub image_path: Option<String>,
    pub description: Option<String>,
}

/// DTO for updating an existing product. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub image_path: Option<String>,
    pub description: Option<String>,
}

impl UpdateProduct {
    /// Whether the update carries at least one field.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.image_path.is_none() && self.description.is_none()
    }
}
