use serde::{Deserialize, Serialize};

pub type TodoId = i64;

/// A single todo record.
///
/// `text` is optional: a todo created without text serializes without the
/// field at all, and the same shape is accepted back from a peer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: TodoId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default)]
    pub done: bool,
}

impl Todo {
    pub fn new(id: TodoId, text: Option<String>) -> Self {
        Self {
            id,
            text,
            done: false,
        }
    }

    pub fn with_done(mut self, done: bool) -> Self {
        self.done = done;
        self
    }
}
