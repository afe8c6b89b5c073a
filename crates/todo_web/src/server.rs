use std::path::{Path, PathBuf};

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{web, App, HttpServer};
use log::{info, warn};

use crate::controllers::todo_controller;
use crate::error::AppError;
use crate::middleware::RequestLog;
use crate::state::AppState;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

pub fn api_config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api").configure(todo_controller::config));
}

/// Routes for a todo service: the API plus static files when `static_dir`
/// exists.
pub fn todo_app_config(
    state: web::Data<AppState>,
    static_dir: Option<PathBuf>,
) -> impl Fn(&mut web::ServiceConfig) + Send + Clone + 'static {
    move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(state.clone());
        api_config(cfg);
        if let Some(dir) = &static_dir {
            cfg.service(Files::new("/", dir.clone()).index_file("index.html"));
        }
    }
}

/// Keeps `dir` only if it is a directory that can be served.
pub fn resolve_static_dir(dir: Option<&Path>) -> Option<PathBuf> {
    let dir = dir?;
    if dir.is_dir() {
        Some(dir.to_path_buf())
    } else {
        warn!("Static directory {:?} not found, serving the API only", dir);
        None
    }
}

/// Binds `settings` and serves the routes installed by `configure` until the
/// server shuts down.
pub async fn serve<F>(settings: &ServerSettings, configure: F) -> Result<(), AppError>
where
    F: Fn(&mut web::ServiceConfig) + Send + Clone + 'static,
{
    let server = HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(RequestLog)
            .configure(configure.clone())
    })
    .bind((settings.host.as_str(), settings.port))
    .map_err(AppError::ServerError)?
    .run();

    info!(
        "Listening on http://{}:{}",
        display_host(&settings.host),
        settings.port
    );

    server.await.map_err(AppError::ServerError)
}

fn display_host(host: &str) -> &str {
    if host == "0.0.0.0" {
        "localhost"
    } else {
        host
    }
}
