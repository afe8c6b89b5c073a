use std::path::PathBuf;

use actix_web::web;
use clap::Parser;
use todo_web::logging::init_logging;
use todo_web::server::resolve_static_dir;
use todo_web::{serve, todo_app_config, AppState, ServerSettings};

#[derive(Parser, Debug, Clone)]
#[command(name = "todo-store-service")]
#[command(about = "In-memory todo HTTP service")]
#[command(version)]
struct Cli {
    /// Enable debug mode
    #[arg(long, env = "DEBUG", default_value = "false")]
    debug: bool,

    /// Server port
    #[arg(long, env = "PORT", default_value = "3000")]
    port: u16,

    /// Address to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// Directory served at `/`
    #[arg(long, env = "STATIC_DIR", default_value = "public")]
    static_dir: PathBuf,

    /// Log level (overrides debug flag)
    #[arg(long, env = "RUST_LOG")]
    log_level: Option<String>,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    init_logging(cli.debug, cli.log_level.as_deref());

    log::info!("Starting todo store service on port {}", cli.port);
    if cli.debug {
        log::debug!("Debug mode enabled");
        log::debug!("  Host: {}", cli.host);
        log::debug!("  Static dir: {:?}", cli.static_dir);
    }

    let settings = ServerSettings {
        host: cli.host,
        port: cli.port,
    };
    let state = web::Data::new(AppState::new());
    let static_dir = resolve_static_dir(Some(&cli.static_dir));

    serve(&settings, todo_app_config(state, static_dir)).await?;
    Ok(())
}
