use reqwest::{Client, header};
use tracing::debug;

use crate::config::Config;
use crate::error::Result;

/// HTTP client plus the user agent every site request carries.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    user_agent: String,
}

impl HttpFetcher {
    pub fn new(client: Client, user_agent: impl Into<String>) -> Self {
        Self {
            client,
            user_agent: user_agent.into(),
        }
    }

    /// Build a fetcher with default client settings (no timeout override).
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = Client::builder().build()?;
        Ok(Self::new(client, config.user_agent.clone()))
    }

    /// GET a page and return its body; non-2xx statuses are errors.
    pub async fn page(&self, url: &str) -> Result<String> {
        debug!(url, "fetching page");
        let resp = self
            .client
            .get(url)
            .header(header::USER_AGENT, &self.user_agent)
            .send()
            .await?
            .error_for_status()?;

        let body = resp.text().await?;
        debug!(url, bytes = body.len(), "page fetched");
        Ok(body)
    }
}
