//! Shared response envelope types for API handlers.
//!
//! Mutation endpoints acknowledge with a `{ "ok": true }` body. Use [`Ack`]
//! instead of ad-hoc `serde_json::json!({ "ok": true })` to get consistent
//! serialization across handlers.

use serde::Serialize;

/// Standard `{ "ok": true }` acknowledgement body.
#[derive(Debug, Serialize)]
pub struct Ack {
    pub ok: bool,
}

impl Ack {
    /// A successful acknowledgement.
    pub fn ok() -> Self {
        Self { ok: true }
    }
}
