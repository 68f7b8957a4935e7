//! # Article Summarizer
//!
//! Fetches news articles from a list of URLs, pulls the headline and body
//! out of whatever markup each publisher uses, asks a language model for a
//! two-line summary, and saves one CSV row per URL.
//!
//! ## Usage
//!
//! ```sh
//! ANTHROPIC_API_KEY=... article_summarizer -u urls.txt -o articles_summary.csv
//! ```
//!
//! ## Architecture
//!
//! Items are processed strictly one at a time:
//! 1. **Fetching**: GET the page with a browser `User-Agent`
//! 2. **Extraction**: Ordered selector rules for title and body, paragraph fallback
//! 3. **Summarization**: Fixed two-bullet prompt sent to the Messages API
//! 4. **Output**: Full CSV rewrite every N items and at the end

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod api;
mod charset;
mod cli;
mod error;
mod extractor;
mod fetcher;
mod models;
mod outputs;
mod runner;
mod summarizer;
#[cfg(test)]
mod test_support;
mod utils;

use api::AnthropicClient;
use cli::Cli;
use fetcher::HttpFetcher;
use runner::{BatchRunner, RunOptions};
use summarizer::Summarizer;
use utils::{ensure_parent_writable, load_urls};

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("article_summarizer starting up");

    let args = Cli::parse();
    debug!(urls = %args.urls.display(), output = %args.output.display(), model = %args.model, "Parsed CLI arguments");

    // ---- Inputs and output location are checked before any work starts ----
    let urls = match load_urls(&args.urls).await {
        Ok(urls) => urls,
        Err(e) => {
            error!(path = %args.urls.display(), error = %e, "Cannot load URL list");
            return Err(e);
        }
    };

    if let Err(e) = ensure_parent_writable(&args.output).await {
        error!(
            path = %args.output.display(),
            error = %e,
            "Output location is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    // ---- Pipeline ----
    let fetcher = HttpFetcher::new(args.timeout)?;
    let model = AnthropicClient::new(args.api_key, args.api_url, args.model)?;
    let options = RunOptions {
        delay: args.delay,
        checkpoint_interval: args.save_interval as usize,
        ..RunOptions::new(args.output)
    };
    let runner = BatchRunner::new(fetcher, Summarizer::new(model), options);

    let results = runner.run(&urls).await.map_err(|e| {
        error!(error = %e, "Batch aborted");
        e
    })?;

    let elapsed = start_time.elapsed();
    info!(
        total = results.len(),
        succeeded = results.succeeded(),
        failed = results.failed(),
        ?elapsed,
        secs = elapsed.as_secs(),
        "Execution complete"
    );

    Ok(())
}
