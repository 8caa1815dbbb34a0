//! Client configuration

/// Configuration for talking to the Bloom server
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g. "http://localhost:3000")
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout: u64,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: 30,
        }
    }

    pub fn with_timeout(mut self, timeout: u64) -> Self {
        self.timeout = timeout;
        self
    }
}
