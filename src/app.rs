//! Application assembly: shared state and the route table.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use crate::health;
use crate::items;
use crate::router::Router;
use crate::store::Store;

/// State handed to every handler. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn Store>,
    writes: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store, writes: Arc::new(Mutex::new(())) }
    }

    pub fn store(&self) -> &dyn Store {
        self.store.as_ref()
    }

    /// Held across a read-modify-write of the collection so that concurrent
    /// mutations apply one after another instead of overwriting each other.
    pub(crate) async fn lock_writes(&self) -> MutexGuard<'_, ()> {
        self.writes.lock().await
    }
}

/// Builds the full service: item routes plus health probes.
pub fn app(store: Arc<dyn Store>) -> Router<AppState> {
    Router::with_state(AppState::new(store))
        .get("/items",           items::list)
        .post("/items",          items::create)
        .get("/items/{name}",    items::get)
        .patch("/items/{name}",  items::update)
        .delete("/items/{name}", items::delete)
        .get("/healthz",         health::liveness)
        .get("/readyz",          health::readiness)
}
