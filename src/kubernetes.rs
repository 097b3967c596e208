use serde::de::DeserializeOwned;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

use crate::error::FetchError;
use crate::types::Config;

/// Per-request timeout against the cluster API.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(2);

/// Attempts per URL, including the first one.
pub const MAX_ATTEMPTS: usize = 2;

/// Authenticated GET access to the cluster API.
///
/// Certificate verification is off: remote clusters are reached by IP and
/// typically present self-signed API server certificates.
pub struct KubeApiClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
    max_attempts: usize,
}

impl KubeApiClient {
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .danger_accept_invalid_certs(true)
            .build()
            .map_err(|e| FetchError::Transport {
                url: config.url.clone(),
                source: e,
            })?;

        Ok(Self {
            client,
            base_url: config.url.clone(),
            token: config.token.clone(),
            max_attempts: MAX_ATTEMPTS,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path such as a self-link.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET `url` with the retry budget, returning the body text.
    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        retry_with_budget(self.max_attempts, url, || self.fetch_once(url)).await
    }

    /// GET an API path and decode its JSON body.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let url = self.url_for(path);
        let body = self.fetch(&url).await?;
        serde_json::from_str(&body).map_err(|e| FetchError::Malformed {
            url,
            reason: e.to_string(),
        })
    }

    async fn fetch_once(&self, url: &str) -> Result<String, FetchError> {
        debug!("GET {}", url);
        let res = self
            .client
            .get(url)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| FetchError::Transport {
                url: url.to_string(),
                source: e,
            })?;

        let status = res.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = res.bytes().await.map_err(|e| FetchError::Transport {
            url: url.to_string(),
            source: e,
        })?;
        let body = String::from_utf8(bytes.to_vec()).map_err(|e| FetchError::Decode {
            url: url.to_string(),
            source: e,
        })?;
        debug!("GET {} -> {} ({} bytes)", url, status, body.len());
        Ok(body)
    }
}

/// Run `attempt` until it succeeds, fails with a non-transient error, or
/// `max_attempts` is used up. Exhaustion is reported as
/// [`FetchError::RetriesExhausted`] wrapping the last failure.
pub async fn retry_with_budget<F, Fut, T>(
    max_attempts: usize,
    url: &str,
    mut attempt: F,
) -> Result<T, FetchError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, FetchError>>,
{
    let max_attempts = max_attempts.max(1);
    let mut tries = 0;
    loop {
        tries += 1;
        match attempt().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_transient() && tries < max_attempts => {
                debug!("attempt {}/{} for {} failed: {}", tries, max_attempts, url, e);
            }
            Err(e) if e.is_transient() => {
                return Err(FetchError::RetriesExhausted {
                    url: url.to_string(),
                    attempts: tries,
                    last: Box::new(e),
                });
            }
            Err(e) => return Err(e),
        }
    }
}
