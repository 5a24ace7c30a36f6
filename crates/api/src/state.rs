use std::sync::Arc;

use crate::auth::revocation::TokenRevoker;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: extranet_db::DbPool,
    /// Server configuration (base URL, avatar directory, JWT secrets).
    pub config: Arc<ServerConfig>,
    /// Revocation registry consulted on every authenticated request.
    pub revoked_tokens: Arc<dyn TokenRevoker>,
}
