use log::{error, info};
use todo_core::Todo;

use crate::client::PeerClientTrait;

/// Reads the peer's collection once, falling back to an empty list.
///
/// Failures are logged and never retried.
pub async fn load_initial_todos(peer: &dyn PeerClientTrait) -> Vec<Todo> {
    match peer.fetch_todos().await {
        Ok(todos) => {
            info!("Loaded {} todos from peer", todos.len());
            todos
        }
        Err(e) => {
            error!("Failed to load todos from peer: {}", e);
            info!("Starting with empty todo list");
            Vec::new()
        }
    }
}
