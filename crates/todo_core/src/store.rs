use std::sync::Arc;

use tokio::sync::RwLock;

use crate::id::IdGenerator;
use crate::model::{Todo, TodoId};

/// Observer notified with the whole collection after each client mutation.
///
/// Called while the store's write lock is held, so notifications arrive in
/// mutation order. Implementations must not block.
pub trait ChangeListener: Send + Sync {
    fn collection_changed(&self, todos: &[Todo]);
}

/// Ordered in-memory todo collection shared by request handlers.
pub struct TodoStore {
    todos: RwLock<Vec<Todo>>,
    ids: IdGenerator,
    listener: Option<Arc<dyn ChangeListener>>,
}

impl Default for TodoStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TodoStore {
    pub fn new() -> Self {
        Self {
            todos: RwLock::new(Vec::new()),
            ids: IdGenerator::new(),
            listener: None,
        }
    }

    pub fn with_todos(todos: Vec<Todo>) -> Self {
        let ids = IdGenerator::new();
        for todo in &todos {
            ids.observe(todo.id);
        }
        Self {
            todos: RwLock::new(todos),
            ids,
            listener: None,
        }
    }

    pub fn with_listener(mut self, listener: Arc<dyn ChangeListener>) -> Self {
        self.listener = Some(listener);
        self
    }

    pub async fn list(&self) -> Vec<Todo> {
        self.todos.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.todos.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.todos.read().await.is_empty()
    }

    /// Appends a new open todo and returns it.
    pub async fn create(&self, text: Option<String>) -> Todo {
        let mut todos = self.todos.write().await;
        let todo = Todo::new(self.ids.next_id(), text);
        todos.push(todo.clone());
        self.notify(&todos);
        todo
    }

    /// Sets `done` on every todo with `id`, keeping its position.
    ///
    /// `None` leaves the records untouched but still counts as a mutation
    /// for listeners. Returns the last matching record, if any.
    pub async fn update(&self, id: TodoId, done: Option<bool>) -> Option<Todo> {
        let mut todos = self.todos.write().await;
        let mut updated = None;
        for todo in todos.iter_mut().filter(|todo| todo.id == id) {
            if let Some(done) = done {
                todo.done = done;
            }
            updated = Some(todo.clone());
        }
        if updated.is_none() {
            log::debug!("No todo with id {} to update", id);
        }
        self.notify(&todos);
        updated
    }

    /// Removes every todo with `id` and returns how many were removed.
    pub async fn delete(&self, id: TodoId) -> usize {
        let mut todos = self.todos.write().await;
        let before = todos.len();
        todos.retain(|todo| todo.id != id);
        let removed = before - todos.len();
        if removed == 0 {
            log::debug!("No todo with id {} to delete", id);
        }
        self.notify(&todos);
        removed
    }

    /// Reports the current collection to the listener without changing it.
    ///
    /// Used for client mutations that matched nothing, such as an update
    /// addressed to an id that could not be parsed.
    pub async fn touch(&self) {
        let todos = self.todos.write().await;
        self.notify(&todos);
    }

    /// Adopts `replacement` wholesale. Listeners are not notified.
    pub async fn replace_all(&self, replacement: Vec<Todo>) {
        let mut todos = self.todos.write().await;
        for todo in &replacement {
            self.ids.observe(todo.id);
        }
        *todos = replacement;
    }

    /// Inserts `todo`, or overwrites the first record with the same id in
    /// place. Listeners are not notified.
    pub async fn upsert(&self, todo: Todo) -> Todo {
        let mut todos = self.todos.write().await;
        self.ids.observe(todo.id);
        match todos.iter_mut().find(|existing| existing.id == todo.id) {
            Some(existing) => *existing = todo.clone(),
            None => todos.push(todo.clone()),
        }
        todo
    }

    fn notify(&self, todos: &[Todo]) {
        if let Some(listener) = &self.listener {
            listener.collection_changed(todos);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        seen: Mutex<Vec<Vec<Todo>>>,
    }

    impl ChangeListener for Recorder {
        fn collection_changed(&self, todos: &[Todo]) {
            self.seen.lock().unwrap().push(todos.to_vec());
        }
    }

    #[tokio::test]
    async fn create_appends_open_todo() {
        let store = TodoStore::new();
        let first = store.create(Some("buy milk".to_string())).await;
        let second = store.create(None).await;

        assert!(!first.done);
        assert!(second.id > first.id);
        assert_eq!(store.list().await, vec![first, second]);
    }

    #[tokio::test]
    async fn update_rewrites_in_place() {
        let store = TodoStore::new();
        let a = store.create(Some("a".to_string())).await;
        let b = store.create(Some("b".to_string())).await;
        let c = store.create(Some("c".to_string())).await;

        let updated = store.update(b.id, Some(true)).await;

        assert_eq!(updated, Some(b.clone().with_done(true)));
        assert_eq!(store.list().await, vec![a, b.with_done(true), c]);
    }

    #[tokio::test]
    async fn update_without_done_keeps_record() {
        let store = TodoStore::new();
        let a = store.create(Some("a".to_string())).await;
        store.update(a.id, Some(true)).await;

        let updated = store.update(a.id, None).await;

        assert_eq!(updated.map(|t| t.done), Some(true));
    }

    #[tokio::test]
    async fn update_unknown_id_changes_nothing() {
        let store = TodoStore::new();
        let a = store.create(Some("a".to_string())).await;

        assert_eq!(store.update(a.id + 1, Some(true)).await, None);
        assert_eq!(store.list().await, vec![a]);
    }

    #[tokio::test]
    async fn delete_removes_all_matches() {
        let store = TodoStore::with_todos(vec![
            Todo::new(1, Some("x".to_string())),
            Todo::new(2, Some("y".to_string())),
            Todo::new(1, Some("z".to_string())),
        ]);

        assert_eq!(store.delete(1).await, 2);
        assert_eq!(store.delete(99).await, 0);
        assert_eq!(store.list().await, vec![Todo::new(2, Some("y".to_string()))]);
    }

    #[tokio::test]
    async fn adopted_ids_are_never_reissued() {
        let far_future = chrono::Utc::now().timestamp_millis() + 1_000_000;
        let store = TodoStore::new();
        store
            .replace_all(vec![Todo::new(far_future, Some("peer".to_string()))])
            .await;

        let created = store.create(None).await;

        assert_eq!(created.id, far_future + 1);
    }

    #[tokio::test]
    async fn upsert_overwrites_by_id() {
        let store = TodoStore::new();
        store.upsert(Todo::new(3, Some("old".to_string()))).await;
        store.upsert(Todo::new(4, Some("other".to_string()))).await;
        store
            .upsert(Todo::new(3, Some("new".to_string())).with_done(true))
            .await;

        let todos = store.list().await;
        assert_eq!(todos.len(), 2);
        assert_eq!(todos[0], Todo::new(3, Some("new".to_string())).with_done(true));
    }

    #[tokio::test]
    async fn listener_sees_every_client_mutation() {
        let recorder = Arc::new(Recorder::default());
        let store = TodoStore::new().with_listener(recorder.clone());

        let todo = store.create(Some("a".to_string())).await;
        store.update(todo.id, Some(true)).await;
        store.delete(12345).await;
        store.touch().await;
        store.replace_all(Vec::new()).await;

        let seen = recorder.seen.lock().unwrap();
        assert_eq!(seen.len(), 4);
        assert_eq!(seen[0], vec![todo.clone()]);
        assert_eq!(seen[1], vec![todo.clone().with_done(true)]);
        assert_eq!(seen[2], vec![todo.clone().with_done(true)]);
        assert_eq!(seen[3], vec![todo.with_done(true)]);
    }

    #[tokio::test]
    async fn touch_leaves_collection_unchanged() {
        let recorder = Arc::new(Recorder::default());
        let store = TodoStore::new().with_listener(recorder.clone());
        let todo = store.create(Some("a".to_string())).await;

        store.touch().await;

        assert_eq!(store.list().await, vec![todo.clone()]);
        assert_eq!(recorder.seen.lock().unwrap().last(), Some(&vec![todo]));
    }
}
