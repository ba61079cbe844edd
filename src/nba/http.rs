use bytes::Bytes;
use reqwest::{Client, StatusCode};
use tracing::debug;

use crate::config::NbaConfig;
use crate::core::api_key_header_map;
use crate::{BuzzerError, Result};


/// Performs authenticated GET requests against the statistics API.
///
/// Every request carries the API key and a JSON content type and is bounded
/// by the configured timeout. There is no retry: a non-200 status is
/// returned as [`BuzzerError::UpstreamStatus`].
#[derive(Debug, Clone)]
pub struct UpstreamFetcher {
    client: Client,
    base_url: String,
}

impl UpstreamFetcher {
    pub fn new(config: &NbaConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("buzzerbeater/", env!("CARGO_PKG_VERSION")))
            .default_headers(api_key_header_map(&config.api_key)?)
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `path` (which must start with `/`) and return the raw body.
    pub async fn fetch(&self, path: &str) -> Result<Bytes> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "fetching from upstream");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(BuzzerError::UpstreamStatus {
                status: status.as_u16(),
            });
        }

        Ok(response.bytes().await?)
    }
}
