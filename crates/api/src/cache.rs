//! In-process cache of rendered list views.
//!
//! List responses are cached keyed by view path plus query string, and
//! every successful mutation invalidates the whole path. Invalidation is
//! fire-and-forget and is ordered strictly after the persistence commit,
//! never before.

use std::collections::HashMap;

use tokio::sync::RwLock;

/// The invoice list view path. Mutations invalidate this path; create and
/// update additionally redirect the caller to it.
pub const INVOICES_VIEW_PATH: &str = "/dashboard/invoices";

/// Upper bound on cached renderings across all views. The cache is
/// advisory, so hitting the bound drops the whole map instead of
/// tracking per-entry recency.
const MAX_ENTRIES: usize = 256;

/// Cache of serialized view payloads keyed by `path` + `query string`.
#[derive(Default)]
pub struct ViewCache {
    entries: RwLock<HashMap<(String, String), serde_json::Value>>,
}

impl ViewCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a cached payload for one concrete rendering of a view.
    pub async fn get(&self, path: &str, query: &str) -> Option<serde_json::Value> {
        self.entries
            .read()
            .await
            .get(&(path.to_string(), query.to_string()))
            .cloned()
    }

    /// Store the payload for one concrete rendering of a view.
    ///
    /// Varied search and page queries produce distinct keys, so the map
    /// is bounded at [`MAX_ENTRIES`] to keep memory flat between
    /// mutations.
    pub async fn put(&self, path: &str, query: &str, payload: serde_json::Value) {
        let key = (path.to_string(), query.to_string());
        let mut entries = self.entries.write().await;
        if entries.len() >= MAX_ENTRIES && !entries.contains_key(&key) {
            entries.clear();
        }
        entries.insert(key, payload);
    }

    /// Drop every cached rendering of a view path, regardless of query.
    pub async fn invalidate(&self, path: &str) {
        self.entries.write().await.retain(|(p, _), _| p != path);
    }

    /// Number of cached renderings (test observability).
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
