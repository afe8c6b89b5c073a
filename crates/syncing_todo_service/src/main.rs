use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use actix_web::web;
use clap::Parser;
use todo_sync::config::DEFAULT_PEER_URL;
use todo_sync::{PeerClient, PeerConfig};
use todo_web::logging::init_logging;
use todo_web::server::resolve_static_dir;
use todo_web::{serve, todo_app_config, AppState, ServerSettings};

#[derive(Parser, Debug, Clone)]
#[command(name = "syncing-todo-service")]
#[command(about = "Todo HTTP service that mirrors its list to a peer")]
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

    /// Base URL of the peer service (falls back to `PEER_URL`, then
    /// http://localhost:8000)
    #[arg(long, env = "APP_TWO_URL")]
    peer_url: Option<String>,

    /// Retries for each sync push
    #[arg(long, env = "SYNC_MAX_RETRIES", default_value = "3")]
    sync_retries: u32,

    /// Timeout for requests to the peer, in seconds
    #[arg(long, env = "SYNC_TIMEOUT_SECS", default_value = "10")]
    sync_timeout_secs: u64,

    /// Log level (overrides debug flag)
    #[arg(long, env = "RUST_LOG")]
    log_level: Option<String>,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    init_logging(cli.debug, cli.log_level.as_deref());

    log::info!("Starting syncing todo service on port {}", cli.port);
    let peer_url = resolve_peer_url(cli.peer_url, std::env::var("PEER_URL").ok());
    log::info!("Peer configuration:");
    log::info!("  Base URL: {}", peer_url);
    log::info!("  Retries: {}", cli.sync_retries);
    log::info!("  Timeout: {}s", cli.sync_timeout_secs);

    let peer_config = PeerConfig::new(peer_url)
        .with_max_retries(cli.sync_retries)
        .with_timeout(Duration::from_secs(cli.sync_timeout_secs));
    let peer = PeerClient::new(&peer_config)?;

    let settings = ServerSettings {
        host: cli.host,
        port: cli.port,
    };
    let state = web::Data::new(AppState::with_peer(Arc::new(peer)).await);
    let static_dir = resolve_static_dir(Some(&cli.static_dir));

    let result = serve(&settings, todo_app_config(state.clone(), static_dir)).await;

    log::info!("Flushing pending sync pushes");
    state.flush_sync().await;

    result?;
    Ok(())
}

/// `APP_TWO_URL` (or `--peer-url`) wins over `PEER_URL`.
fn resolve_peer_url(peer_url: Option<String>, fallback: Option<String>) -> String {
    peer_url
        .or(fallback)
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_PEER_URL.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn peer_url_is_read_from_app_two_url() {
        let command = Cli::command();
        let arg = command
            .get_arguments()
            .find(|arg| arg.get_id() == "peer_url")
            .unwrap();
        assert_eq!(arg.get_env(), Some(std::ffi::OsStr::new("APP_TWO_URL")));
    }

    #[test]
    fn peer_url_flag_wins_over_fallback() {
        let cli = Cli::try_parse_from(["syncing-todo-service", "--peer-url", "http://db:8000"])
            .unwrap();
        assert_eq!(
            resolve_peer_url(cli.peer_url, Some("http://other:9000".to_string())),
            "http://db:8000"
        );
    }

    #[test]
    fn peer_url_falls_back_to_peer_url_then_default() {
        assert_eq!(
            resolve_peer_url(None, Some("http://other:9000".to_string())),
            "http://other:9000"
        );
        assert_eq!(resolve_peer_url(None, None), "http://localhost:8000");
    }
}
