use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;

use crate::error::{Result, YouTubeError};

pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 6.0) AppleWebKit/535.7 (KHTML, like Gecko) Chrome/16.0.912.63 Safari/535.7";
pub const FEED_BASE: &str = "https://gdata.youtube.com/feeds/api/videos";

/// Retrieves the raw body behind a URL.
#[async_trait]
pub trait Fetch {
    async fn fetch_source(&self, url: &str) -> Result<String>;
}

#[derive(Clone, Debug)]
pub struct FetchConfig {
    pub user_agent: String,
    /// The feed endpoint's chain is not always trusted, so verification is off by default.
    pub accept_invalid_certs: bool,
    pub feed_base: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: USER_AGENT.to_string(),
            accept_invalid_certs: true,
            feed_base: FEED_BASE.to_string(),
        }
    }
}

impl FetchConfig {
    pub fn with_feed_base(mut self, feed_base: &str) -> Self {
        self.feed_base = feed_base.trim_end_matches('/').to_string();
        self
    }
}

/// One GET per call. No retries and no timeout beyond the client default.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &FetchConfig) -> Result<HttpFetcher> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()?;
        Ok(HttpFetcher { client })
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch_source(&self, url: &str) -> Result<String> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            // the feed reports its errors in the body, so keep reading
            warn!("{} answered with {}", url, response.status());
        }
        let body = response.text().await?;
        if body.is_empty() {
            Err(YouTubeError::Fetch(format!("Empty response from {}", url)))?
        }
        Ok(body)
    }
}
