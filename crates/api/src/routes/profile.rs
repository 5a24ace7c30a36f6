//! Route definitions for the `/profile` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::profile;
use crate::state::AppState;

/// Routes mounted at `/profile`. Both require authentication.
///
/// ```text
/// GET  /        -> get_profile
/// POST /update  -> update_profile (multipart)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(profile::get_profile))
        .route("/update", post(profile::update_profile))
}
