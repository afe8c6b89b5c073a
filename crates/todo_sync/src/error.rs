use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Peer request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Peer request failed: {0}")]
    Middleware(#[from] reqwest_middleware::Error),

    #[error("Peer {url} responded with status {status}")]
    Status { url: String, status: StatusCode },

    #[error("Invalid todo list from peer: {0}")]
    Decode(#[source] reqwest::Error),
}
