//! Event page retrieval
//!
//! Blocking HTTP GET with a browser-like User-Agent, followed by content
//! extraction. Failures are logged with the offending URL and surface to the
//! driver as "no content" so a batch run can carry on.

use crate::config::SyncConfig;
use crate::error::{FetchError, Result};
use crate::extraction::{ContentExtractor, ExtractedContent};
use reqwest::blocking::Client;
use tracing::{debug, error, info, instrument};

/// Anything that can turn a URL into extracted page content
pub trait PageSource {
    /// Fetch and extract `url`; `None` when nothing could be retrieved
    fn fetch(&self, url: &str) -> Option<ExtractedContent>;
}

/// HTTP-backed page source
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Build a fetcher sending the configured User-Agent.
    ///
    /// Uses the client library's default timeouts and never retries.
    pub fn new(config: &SyncConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;
        Ok(Self { client })
    }

    /// Fetch `url` and extract its content, propagating any failure
    #[instrument(skip(self))]
    pub fn try_fetch(&self, url: &str) -> Result<ExtractedContent> {
        info!("Fetching {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| FetchError::request(url, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                status: status.as_u16(),
                url: url.to_string(),
            }
            .into());
        }

        let body = response.text().map_err(|e| FetchError::request(url, &e))?;
        debug!("Received {} bytes from {}", body.len(), url);

        Ok(ContentExtractor::extract(&body))
    }
}

impl PageSource for Fetcher {
    fn fetch(&self, url: &str) -> Option<ExtractedContent> {
        match self.try_fetch(url) {
            Ok(content) => Some(content),
            Err(e) => {
                error!("Error fetching {}: {}", url, e);
                None
            }
        }
    }
}
