//! Route definitions for the `/products` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::products;
use crate::state::AppState;

/// Routes mounted at `/products`.
///
/// ```text
/// GET    /      -> list (public)
/// POST   /      -> create (requires auth)
/// PUT    /{id}  -> update (owner only)
/// DELETE /{id}  -> delete (owner only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(products::list).post(products::create))
        .route("/{id}", put(products::update).delete(products::delete))
}
