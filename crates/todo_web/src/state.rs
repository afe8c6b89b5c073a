use std::sync::Arc;

use todo_core::TodoStore;
use todo_sync::{load_initial_todos, PeerClientTrait, SyncDispatcher};

pub struct AppState {
    pub store: Arc<TodoStore>,
    pub sync: Option<SyncDispatcher>,
}

impl AppState {
    /// A standalone store starting empty.
    pub fn new() -> Self {
        Self {
            store: Arc::new(TodoStore::new()),
            sync: None,
        }
    }

    /// A store seeded from `peer` that pushes every mutation back to it.
    pub async fn with_peer(peer: Arc<dyn PeerClientTrait>) -> Self {
        let initial = load_initial_todos(peer.as_ref()).await;
        let dispatcher = SyncDispatcher::spawn(peer);
        let store = TodoStore::with_todos(initial).with_listener(Arc::new(dispatcher.clone()));

        Self {
            store: Arc::new(store),
            sync: Some(dispatcher),
        }
    }

    /// Waits for queued sync pushes, if this state syncs at all.
    pub async fn flush_sync(&self) {
        if let Some(sync) = &self.sync {
            sync.flush().await;
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
