//! Registry of session tokens invalidated before their natural expiry.
//!
//! Logout adds the presented token here; the auth extractor consults the
//! registry on every protected request. The store is trait-abstracted so a
//! deployment that needs revocations to survive restarts (or to be shared
//! across instances) can swap in a durable backend without touching callers.

use std::collections::HashSet;

use tokio::sync::RwLock;

/// A store of revoked tokens, safe under concurrent request handling.
#[async_trait::async_trait]
pub trait TokenRevoker: Send + Sync {
    /// Mark a token as revoked. Revoking an already-revoked token is a no-op.
    async fn revoke(&self, token: &str);

    /// Whether the token has been revoked.
    async fn is_revoked(&self, token: &str) -> bool;
}

/// Process-lifetime in-memory revocation list.
///
/// Entries are never pruned: tokens expire on their own within the validity
/// window, and a restart clears the set entirely. Both are accepted
/// limitations of the in-memory backend.
#[derive(Debug, Default)]
pub struct InMemoryRevocationList {
    revoked: RwLock<HashSet<String>>,
}

impl InMemoryRevocationList {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl TokenRevoker for InMemoryRevocationList {
    async fn revoke(&self, token: &str) {
        self.revoked.write().await.insert(token.to_string());
    }

    async fn is_revoked(&self, token: &str) -> bool {
        self.revoked.read().await.contains(token)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[tokio::test]
    async fn revoke_and_check() {
        let list = InMemoryRevocationList::new();
        assert!(!list.is_revoked("tok-1").await);

        list.revoke("tok-1").await;
        assert!(list.is_revoked("tok-1").await);
        assert!(!list.is_revoked("tok-2").await);
    }

    #[tokio::test]
    async fn revoking_twice_is_idempotent() {
        let list = InMemoryRevocationList::new();
        list.revoke("tok-1").await;
        list.revoke("tok-1").await;
        assert!(list.is_revoked("tok-1").await);
    }

    #[tokio::test]
    async fn concurrent_revocations_all_land() {
        let list = Arc::new(InMemoryRevocationList::new());

        let handles: Vec<_> = (0..32)
            .map(|i| {
                let list = Arc::clone(&list);
                tokio::spawn(async move {
                    list.revoke(&format!("tok-{i}")).await;
                })
            })
            .collect();
        for handle in handles {
            handle.await.expect("revocation task should not panic");
        }

        for i in 0..32 {
            assert!(list.is_revoked(&format!("tok-{i}")).await);
        }
    }
}
