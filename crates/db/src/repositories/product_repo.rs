//! Repository for the `products` table.

use sqlx::PgPool;

use extranet_core::types::DbId;

use crate::models::product::{CreateProduct, Product, ProductWithOwner, UpdateProduct};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, image_path, description, owner_id, created_at, updated_at";

/// Provides CRUD operations for products.
pub struct ProductRepo;

impl ProductRepo {
    /// Insert a new product owned by `owner_id`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        owner_id: DbId,
        input: &CreateProduct,
    ) -> Result<Product, sqlx::Error> {
        let query = format!(
            "INSERT INTO products (name, image_path, description, owner_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(&input.name)
            .bind(&input.image_path)
            .bind(&input.description)
            .bind(owner_id)
            .fetch_one(pool)
            .await
    }

    /// List the full catalog with each owner's username, newest first.
    pub async fn list_with_owner(pool: &PgPool) -> Result<Vec<ProductWithOwner>, sqlx::Error> {
        sqlx::query_as::<_, ProductWithOwner>(
            "SELECT p.id, p.name, p.image_path, p.description, p.owner_id,
                    u.username AS owner_username, p.created_at
             FROM products p
             JOIN users u ON u.id = p.owner_id
             ORDER BY p.created_at DESC, p.id DESC",
        )
        .fetch_all(pool)
        .await
    }

    /// Fetch only the owner of a product, for ownership checks.
    pub async fn find_owner_id(pool: &PgPool, id: DbId) -> Result<Option<DbId>, sqlx::Error> {
        let row: Option<(DbId,)> = sqlx::query_as("SELECT owner_id FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(|(owner_id,)| owner_id))
    }

    /// Update a product. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProduct,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query = format!(
            "UPDATE products SET
                name = COALESCE($2, name),
                image_path = COALESCE($3, image_path),
                description = COALESCE($4, description),
                updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.image_path)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Delete a product. Returns `true` if the row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
