pub mod controllers;
pub mod dto;
pub mod error;
pub mod logging;
pub mod middleware;
pub mod server;
pub mod state;

pub use error::{AppError, Result};
pub use server::{serve, todo_app_config, ServerSettings};
pub use state::AppState;
