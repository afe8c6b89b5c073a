use todo_core::TodoStore;
use todo_web::AppError;
use tokio::sync::Mutex;

use crate::snapshot::SnapshotFile;

pub struct MirrorState {
    pub store: TodoStore,
    snapshot: Option<SnapshotFile>,
    write_lock: Mutex<()>,
}

impl MirrorState {
    pub fn in_memory() -> Self {
        Self {
            store: TodoStore::new(),
            snapshot: None,
            write_lock: Mutex::new(()),
        }
    }

    /// Loads the collection from `snapshot` and keeps writing it back there.
    pub async fn with_snapshot(snapshot: SnapshotFile) -> Result<Self, AppError> {
        let todos = snapshot.load().await?;
        log::info!(
            "Loaded {} todos from snapshot {:?}",
            todos.len(),
            snapshot.path()
        );
        Ok(Self {
            store: TodoStore::with_todos(todos),
            snapshot: Some(snapshot),
            write_lock: Mutex::new(()),
        })
    }

    /// Writes the current collection to the snapshot file, if any.
    ///
    /// Writers are serialized and each reads the collection after taking
    /// the lock, so the file always ends with the newest state.
    pub async fn persist(&self) -> Result<(), AppError> {
        let Some(snapshot) = &self.snapshot else {
            return Ok(());
        };
        let _guard = self.write_lock.lock().await;
        let todos = self.store.list().await;
        snapshot.save(&todos).await
    }
}
