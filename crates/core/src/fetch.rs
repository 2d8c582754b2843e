//! HTTP JSON fetcher shared by every upstream call.

use crate::config::ApiConfig;
use crate::error::{FetchError, FetchResult};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, error};
use url::Url;

/// Media type requested from the weather API.
pub const GEO_JSON: &str = "application/geo+json";

/// Extra header set for weather API requests.
pub const GEO_JSON_ACCEPT: &[(&str, &str)] = &[("Accept", GEO_JSON)];

/// GETs JSON documents with the client-identifying User-Agent attached.
#[derive(Debug, Clone)]
pub struct JsonFetcher {
    client: Client,
}

impl JsonFetcher {
    pub fn new(config: &ApiConfig) -> FetchResult<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout())
            .build()?;

        Ok(Self { client })
    }

    /// Fetch and decode `url`, surfacing every failure as a [`FetchError`].
    pub async fn try_fetch<T: DeserializeOwned>(
        &self,
        url: &str,
        headers: &[(&str, &str)],
    ) -> FetchResult<T> {
        let url = Url::parse(url)?;
        debug!(url = %url, "GET request");

        let mut request = self.client.get(url.clone());
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Fetch and decode `url`, logging any failure and returning `None` instead.
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        url: &str,
        headers: &[(&str, &str)],
    ) -> Option<T> {
        match self.try_fetch(url, headers).await {
            Ok(data) => Some(data),
            Err(e) => {
                error!(url = %url, timeout = e.is_timeout(), error = %e, "Fetch error");
                None
            }
        }
    }
}
