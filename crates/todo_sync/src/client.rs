use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use todo_core::Todo;

use crate::config::PeerConfig;
use crate::error::SyncError;

const TODOS_PATH: &str = "/todos";
const SYNC_PATH: &str = "/todos/sync";

#[async_trait]
pub trait PeerClientTrait: Send + Sync {
    /// Reads the peer's full collection.
    async fn fetch_todos(&self) -> Result<Vec<Todo>, SyncError>;

    /// Replaces the peer's collection with `todos`.
    async fn push_todos(&self, todos: &[Todo]) -> Result<(), SyncError>;
}

/// HTTP client for the peer service.
#[derive(Debug, Clone)]
pub struct PeerClient {
    base_url: String,
    client: Client,
    retry_client: ClientWithMiddleware,
}

impl PeerClient {
    pub fn new(config: &PeerConfig) -> Result<Self, SyncError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(SyncError::ClientBuild)?;
        let retry_client = Self::build_retry_client(client.clone(), config.max_retries);

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
            retry_client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build_retry_client(client: Client, max_retries: u32) -> ClientWithMiddleware {
        let retry_policy = ExponentialBackoff::builder()
            .retry_bounds(Duration::from_millis(200), Duration::from_secs(5))
            .build_with_max_retries(max_retries);

        ClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl PeerClientTrait for PeerClient {
    async fn fetch_todos(&self) -> Result<Vec<Todo>, SyncError> {
        let url = self.url(TODOS_PATH);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::Status { url, status });
        }

        response.json::<Vec<Todo>>().await.map_err(SyncError::Decode)
    }

    async fn push_todos(&self, todos: &[Todo]) -> Result<(), SyncError> {
        let url = self.url(SYNC_PATH);
        let response = self.retry_client.post(&url).json(todos).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::Status { url, status });
        }

        Ok(())
    }
}
