//! HTTP retrieval of article pages.
//!
//! One GET per URL, bounded by a timeout, with a desktop-browser
//! `User-Agent` because a number of news sites refuse unidentified clients.
//! There is no retry at this layer: any network fault or non-2xx status is
//! reported as a fetch failure and the caller moves on.
//!
//! Bodies come back as raw bytes; see [`crate::charset`] for decoding.

use crate::charset::charset_from_content_type;
use crate::error::PipelineError;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use std::time::{Duration, Instant};
use tracing::{debug, instrument};
use url::Url;

/// `User-Agent` sent with every page request.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// A fetched page body, not yet decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub bytes: Vec<u8>,
    /// `charset` parameter of the response `Content-Type`, if any.
    pub header_charset: Option<String>,
}

impl Page {
    pub fn new(bytes: impl Into<Vec<u8>>, header_charset: Option<&str>) -> Self {
        Self {
            bytes: bytes.into(),
            header_charset: header_charset.map(str::to_string),
        }
    }
}

/// Source of raw page HTML.
pub trait FetchPage {
    /// Retrieve the page behind `url`.
    async fn fetch(&self, url: &str) -> Result<Page, PipelineError>;
}

/// [`FetchPage`] backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(BROWSER_USER_AGENT)
            .build()?;
        Ok(Self { client })
    }
}

impl FetchPage for HttpFetcher {
    #[instrument(level = "info", skip_all, fields(%url))]
    async fn fetch(&self, url: &str) -> Result<Page, PipelineError> {
        let parsed = Url::parse(url).map_err(|source| PipelineError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;

        let t0 = Instant::now();
        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|source| PipelineError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(PipelineError::HttpStatus {
                url: url.to_string(),
                status,
            });
        }

        let header_charset = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(charset_from_content_type);
        let bytes = response
            .bytes()
            .await
            .map_err(|source| PipelineError::Request {
                url: url.to_string(),
                source,
            })?;
        debug!(
            status = status.as_u16(),
            bytes = bytes.len(),
            charset = header_charset.as_deref().unwrap_or("-"),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Fetched page"
        );
        Ok(Page::new(bytes.to_vec(), header_charset.as_deref()))
    }
}
