pub mod auth;
pub mod health;
pub mod products;
pub mod profile;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register        register (public)
/// /auth/login           login (public)
/// /auth/logout          logout (token from header, always acknowledges)
/// /auth/check-username  availability check (public)
///
/// /profile              get own profile (requires auth)
/// /profile/update       multipart profile + avatar update (requires auth)
///
/// /products             list (public), create (requires auth)
/// /products/{id}        update, delete (owner only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/profile", profile::router())
        .nest("/products", products::router())
}
