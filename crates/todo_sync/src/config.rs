use std::time::Duration;

pub const DEFAULT_PEER_URL: &str = "http://localhost:8000";
pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Where the peer lives and how hard to try reaching it.
#[derive(Debug, Clone)]
pub struct PeerConfig {
    pub base_url: String,
    /// Retries for sync pushes. The startup load is never retried.
    pub max_retries: u32,
    pub timeout: Duration,
}

impl PeerConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            max_retries: DEFAULT_MAX_RETRIES,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for PeerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_PEER_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_peer() {
        let config = PeerConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.timeout, Duration::from_secs(10));
    }
}
