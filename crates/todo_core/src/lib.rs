pub mod id;
pub mod model;
pub mod store;

pub use id::IdGenerator;
pub use model::{Todo, TodoId};
pub use store::{ChangeListener, TodoStore};
