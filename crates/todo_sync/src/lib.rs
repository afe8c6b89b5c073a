//! Best-effort synchronization of a todo collection to a peer service.
//!
//! The peer is read once at startup ([`load_initial_todos`]) and receives the
//! full collection after every mutation through a [`SyncDispatcher`], which
//! queues snapshots and pushes them from a background task.

pub mod client;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod loader;

pub use client::{PeerClient, PeerClientTrait};
pub use config::PeerConfig;
pub use dispatcher::{SyncDispatcher, SyncStats};
pub use error::SyncError;
pub use loader::load_initial_todos;
