//! Shared HTTP plumbing for the scraping and JSON adapters.

use crate::error::{DataError, Result};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{Instant, sleep};

/// Browser-like user agent; several upstreams reject obvious bots.
pub(crate) const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Build a client with a cookie store and the browser user agent.
pub(crate) fn browser_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(BROWSER_USER_AGENT)
        .cookie_store(true)
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(DataError::Network)
}

/// Turn a non-success status into [`DataError::Http`].
pub(crate) fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(DataError::Http {
            status: status.as_u16(),
            url: response.url().to_string(),
        })
    }
}

/// GET `url` and return the body as text.
pub(crate) async fn get_text(client: &reqwest::Client, url: &str) -> Result<String> {
    let response = client.get(url).send().await?;
    let body = check_status(response)?.text().await?;
    Ok(body)
}

/// Minimum spacing between consecutive requests to one upstream.
#[derive(Debug)]
pub(crate) struct RateLimiter {
    last_request: Mutex<Option<Instant>>,
    min_interval: Duration,
}

impl RateLimiter {
    pub(crate) fn new(min_interval: Duration) -> Self {
        Self {
            last_request: Mutex::new(None),
            min_interval,
        }
    }

    pub(crate) async fn wait(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.min_interval {
                sleep(self.min_interval - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }
}
