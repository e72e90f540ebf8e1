use std::sync::Arc;

use crate::export::Exporter;
use crate::session::SessionId;
use crate::store::{FormStore, SessionLocks, SessionStorage};
use crate::views::Views;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable session storage. Memory by default, redis when `REDIS_URL` is set.
    pub storage: Arc<dyn SessionStorage>,
    /// Per-session write locks shared by every `FormStore` handed out below.
    pub locks: Arc<SessionLocks>,
    pub exporter: Arc<dyn Exporter>,
    pub views: Arc<Views>,
}

impl AppState {
    /// The record store scoped to one browser session.
    pub fn form_store(&self, session: SessionId) -> FormStore {
        FormStore::new(self.storage.clone(), self.locks.clone(), session.0)
    }
}
