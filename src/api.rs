//! Language-model interaction.
//!
//! The module uses a trait-based design so the summarizer never depends on a
//! concrete backend:
//! - [`AskAsync`]: Core trait defining a single-turn async completion
//! - [`AnthropicClient`]: Implementation against the Anthropic Messages API
//!
//! No retries happen here. A failed call surfaces as an error and the
//! summarizer decides what to do with it.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{instrument, warn};

use crate::error::PipelineError;
use crate::utils::truncate_for_log;

pub const DEFAULT_API_URL: &str = "https://api.anthropic.com/v1/messages";
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
pub const ANTHROPIC_VERSION: &str = "2023-06-01";
/// Output-length cap for every completion.
pub const MAX_OUTPUT_TOKENS: u32 = 500;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Trait for async LLM interaction.
///
/// Implementors send one prompt and return the model's text, already
/// trimmed of surrounding whitespace.
pub trait AskAsync {
    /// Send `prompt` as a single user turn and return the first text segment
    /// of the reply.
    async fn ask(&self, prompt: &str) -> Result<String, Box<dyn Error>>;
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: [Message<'a>; 1],
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}

/// Client for the Anthropic Messages API.
///
/// The API key is supplied at construction; checking that one exists is the
/// caller's job.
pub struct AnthropicClient {
    http: Client,
    api_key: String,
    api_url: String,
    model: String,
    max_tokens: u32,
}

impl AnthropicClient {
    pub fn new(
        api_key: String,
        api_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            api_key,
            api_url: api_url.into(),
            model: model.into(),
            max_tokens: MAX_OUTPUT_TOKENS,
        })
    }
}

impl fmt::Debug for AnthropicClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnthropicClient")
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .finish_non_exhaustive()
    }
}

impl AskAsync for AnthropicClient {
    #[instrument(level = "info", skip_all, fields(model = %self.model))]
    async fn ask(&self, prompt: &str) -> Result<String, Box<dyn Error>> {
        let t0 = Instant::now();
        let request = MessagesRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            messages: [Message {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .http
            .post(&self.api_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("unknown error"));
            warn!(
                status = status.as_u16(),
                elapsed_ms = t0.elapsed().as_millis() as u64,
                body = %truncate_for_log(&body, 300),
                "API call failed"
            );
            return Err(PipelineError::Model(format!("HTTP {}: {}", status, body)).into());
        }

        let parsed: MessagesResponse = response.json().await?;
        let text = parsed
            .content
            .into_iter()
            .next()
            .and_then(|block| block.text)
            .map(|text| text.trim().to_string())
            .unwrap_or_default();

        if text.is_empty() {
            return Err(PipelineError::Model("response carried no text".into()).into());
        }
        Ok(text)
    }
}
