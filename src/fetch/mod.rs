// src/fetch/mod.rs

use std::{future::Future, time::Duration};

use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, REFERER, USER_AGENT},
    Client,
};
use tracing::debug;
use url::Url;

use crate::{config::Config, error::FetchError};

pub mod urls;

/// Something that can GET the bytes behind a URL.
///
/// Implementations must map non-2xx responses and timeouts to an error;
/// nothing here retries.
pub trait Fetcher: Send + Sync {
    fn get_bytes(&self, url: &Url) -> impl Future<Output = Result<Vec<u8>, FetchError>> + Send;
}

/// `reqwest`-backed fetcher carrying the fixed headers and timeout.
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        Self::with_timeout(config, config.timeout())
    }

    /// Like [`HttpFetcher::new`] but with an explicit per-request timeout.
    pub fn with_timeout(config: &Config, timeout: Duration) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        for (name, value) in [
            (USER_AGENT, &config.headers.user_agent),
            (REFERER, &config.headers.referer),
            (ACCEPT, &config.headers.accept),
        ] {
            let v = HeaderValue::from_str(value).map_err(|_| FetchError::InvalidHeader {
                name: name.to_string(),
                value: value.to_string(),
            })?;
            headers.insert(name, v);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    async fn get_bytes(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
        debug!("Fetching bytes from {}", url);
        let map_err = |source: reqwest::Error| {
            if source.is_timeout() {
                FetchError::Timeout {
                    url: url.to_string(),
                }
            } else {
                FetchError::Transport {
                    url: url.to_string(),
                    source,
                }
            }
        };

        let resp = self.client.get(url.clone()).send().await.map_err(map_err)?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let bytes = resp.bytes().await.map_err(map_err)?;
        Ok(bytes.to_vec())
    }
}
