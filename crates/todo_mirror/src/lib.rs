//! Peer service that holds a copy of a todo collection.
//!
//! It accepts whole-collection syncs and per-record edits, and can keep a
//! JSON snapshot of its collection on disk.

pub mod handlers;
pub mod snapshot;
pub mod state;

pub use handlers::mirror_app_config;
pub use snapshot::SnapshotFile;
pub use state::MirrorState;
