//! Handlers for the `/products` resource.
//!
//! The catalog is world-readable; creating requires authentication, and
//! mutating or deleting requires being the product's owner. The owner is
//! always the authenticated caller -- it is never taken from the payload.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use extranet_core::error::CoreError;
use extranet_core::types::DbId;
use extranet_db::models::product::{CreateProduct, Product, ProductWithOwner, UpdateProduct};
use extranet_db::repositories::ProductRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::Ack;
use crate::state::AppState;

/// GET /api/v1/products
///
/// Public catalog listing with each owner's username, newest first.
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<ProductWithOwner>>> {
    let products = ProductRepo::list_with_owner(&state.pool).await?;
    Ok(Json(products))
}

/// POST /api/v1/products
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateProduct>,
) -> AppResult<(StatusCode, Json<Product>)> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "name is required.".into(),
        )));
    }

    let product = ProductRepo::create(&state.pool, auth.user_id, &input).await?;

    tracing::info!(product_id = product.id, owner_id = auth.user_id, "Product created");

    Ok((StatusCode::CREATED, Json(product)))
}

/// PUT /api/v1/products/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProduct>,
) -> AppResult<Json<Ack>> {
    if input.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "No fields to update.".into(),
        )));
    }

    check_ownership(&state, id, auth.user_id, "edit").await?;

    // The product can vanish between the ownership read and this update;
    // the stale read then surfaces as NotFound.
    ProductRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id,
        }))?;

    Ok(Json(Ack::ok()))
}

/// DELETE /api/v1/products/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Ack>> {
    check_ownership(&state, id, auth.user_id, "delete").await?;

    let deleted = ProductRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id,
        }));
    }

    tracing::info!(product_id = id, owner_id = auth.user_id, "Product deleted");

    Ok(Json(Ack::ok()))
}

/// Resolve the product's owner and reject non-owners.
///
/// A missing product is `NotFound`; an ownership mismatch is `Forbidden`.
async fn check_ownership(
    state: &AppState,
    product_id: DbId,
    caller_id: DbId,
    action: &str,
) -> AppResult<()> {
    let owner_id = ProductRepo::find_owner_id(&state.pool, product_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id: product_id,
        }))?;

    if owner_id != caller_id {
        return Err(AppError::Core(CoreError::Forbidden(format!(
            "Not allowed to {action} this product."
        ))));
    }
    Ok(())
}
