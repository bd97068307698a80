use std::sync::Arc;

use crate::cache::ViewCache;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: invodash_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Cached invoice-list views, invalidated after every mutation.
    pub view_cache: Arc<ViewCache>,
}
