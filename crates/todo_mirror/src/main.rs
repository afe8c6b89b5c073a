use std::path::PathBuf;

use actix_web::web;
use clap::Parser;
use todo_mirror::{mirror_app_config, MirrorState, SnapshotFile};
use todo_web::logging::init_logging;
use todo_web::{serve, ServerSettings};

#[derive(Parser, Debug, Clone)]
#[command(name = "todo-mirror-service")]
#[command(about = "Peer service that keeps a copy of a todo list")]
#[command(version)]
struct Cli {
    /// Enable debug mode
    #[arg(long, env = "DEBUG", default_value = "false")]
    debug: bool,

    /// Server port
    #[arg(long, env = "PORT", default_value = "8000")]
    port: u16,

    /// Address to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// JSON file to keep the collection in; in-memory only when unset
    #[arg(long, env = "MIRROR_DATA_FILE")]
    data_file: Option<PathBuf>,

    /// Log level (overrides debug flag)
    #[arg(long, env = "RUST_LOG")]
    log_level: Option<String>,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    init_logging(cli.debug, cli.log_level.as_deref());

    log::info!("Starting todo mirror service on port {}", cli.port);

    let state = match cli.data_file {
        Some(path) => MirrorState::with_snapshot(SnapshotFile::new(path)).await?,
        None => {
            log::info!("No data file configured, keeping todos in memory only");
            MirrorState::in_memory()
        }
    };

    let settings = ServerSettings {
        host: cli.host,
        port: cli.port,
    };
    serve(&settings, mirror_app_config(web::Data::new(state))).await?;
    Ok(())
}
