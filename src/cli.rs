//! Command-line interface definitions.
//!
//! All options can be given as flags; the model settings and API key can
//! also come from the environment.

use crate::api::{DEFAULT_API_URL, DEFAULT_MODEL};
use crate::runner::DEFAULT_CHECKPOINT_INTERVAL;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Fetch news articles, summarize each in two lines and save the results as CSV.
///
/// # Examples
///
/// ```sh
/// # Defaults: urls.txt in, articles_summary.csv out
/// ANTHROPIC_API_KEY=... article_summarizer
///
/// # Faster pacing, checkpoint every 5 items
/// article_summarizer -u feeds/today.txt -o out/today.csv -d 0.5 -s 5
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// File with one article URL per line (blank lines are ignored)
    #[arg(short, long, default_value = "urls.txt")]
    pub urls: PathBuf,

    /// CSV file to write results to (rewritten at every checkpoint)
    #[arg(short, long, default_value = "articles_summary.csv")]
    pub output: PathBuf,

    /// Seconds to wait between articles
    #[arg(short, long, default_value = "1.5", value_parser = parse_seconds)]
    pub delay: Duration,

    /// Save the table after every N articles
    #[arg(short, long, default_value_t = DEFAULT_CHECKPOINT_INTERVAL as u32, value_parser = clap::value_parser!(u32).range(1..))]
    pub save_interval: u32,

    /// Page fetch timeout in seconds
    #[arg(long, default_value = "10", value_parser = parse_seconds)]
    pub timeout: Duration,

    /// Model used for summaries
    #[arg(long, env = "ANTHROPIC_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Messages API endpoint
    #[arg(long, env = "ANTHROPIC_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Anthropic API key
    #[arg(long, env = "ANTHROPIC_API_KEY", hide_env_values = true)]
    pub api_key: String,
}

/// Parse a non-negative, finite, representable number of seconds.
fn parse_seconds(raw: &str) -> Result<Duration, String> {
    let secs: f64 = raw
        .parse()
        .map_err(|_| format!("`{raw}` is not a number of seconds"))?;
    Duration::try_from_secs_f64(secs)
        .map_err(|e| format!("`{raw}` is not a usable number of seconds: {e}"))
}
