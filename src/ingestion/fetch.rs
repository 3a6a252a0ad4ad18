use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONNECTION, USER_AGENT};
use reqwest::Client;
use tracing::{debug, warn};

use crate::config::ScrapeConfig;

/// Source of raw documents. `Ok(None)` means the server had no document for `url`.
pub trait Fetch {
    async fn fetch(&self, url: &str) -> Result<Option<String>>;
}

/// HTTP fetcher that spaces consecutive requests by a fixed delay.
pub struct HttpFetcher {
    client: Client,
    delay: Duration,
    last: Mutex<Option<Instant>>,
}

impl HttpFetcher {
    pub fn new(cfg: &ScrapeConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_str(&cfg.user_agent).context("user agent header")?);
        headers.insert(ACCEPT, HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8"));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_str(&cfg.accept_language).context("accept-language header")?);
        headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(20))
            .build()
            .context("build http client")?;
        Ok(HttpFetcher { client, delay: cfg.delay, last: Mutex::new(None) })
    }

    async fn pace(&self) {
        let wait = {
            let mut last = self.last.lock().unwrap_or_else(|p| p.into_inner());
            let now = Instant::now();
            let wait = last
                .map(|t| (t + self.delay).saturating_duration_since(now))
                .unwrap_or_default();
            *last = Some(now + wait);
            wait
        };
        if !wait.is_zero() {
            debug!(wait_ms = wait.as_millis() as u64, "rate limit");
            tokio::time::sleep(wait).await;
        }
    }
}

impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Option<String>> {
        self.pace().await;
        let resp = self.client.get(url).send().await.with_context(|| format!("GET {}", url))?;
        let status = resp.status();
        if !status.is_success() {
            warn!(url = %url, status = status.as_u16(), "non-success status");
            return Ok(None);
        }
        let text = resp.text().await.with_context(|| format!("read body {}", url))?;
        Ok(Some(text))
    }
}
