//! Sequential batch processing with incremental checkpoints.
//!
//! Each URL goes through fetch → extract → summarize and always ends up as
//! exactly one [`ResultRecord`], in input order. Failures are recorded and
//! never retried within a run. Between items the runner pauses for a fixed
//! delay (none after the last item). The whole table is rewritten every
//! `checkpoint_interval` items and once more at the end, so an interrupted run
//! loses at most `checkpoint_interval - 1` items.

use crate::api::AskAsync;
use crate::error::PipelineError;
use crate::extractor;
use crate::fetcher::FetchPage;
use crate::models::{Article, ResultRecord, ResultSet};
use crate::outputs::table;
use crate::summarizer::{Summarizer, Summary};
use crate::utils::{char_len, truncate_for_log};
use std::path::PathBuf;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, instrument, warn};

pub const DEFAULT_DELAY: Duration = Duration::from_millis(1500);
pub const DEFAULT_CHECKPOINT_INTERVAL: usize = 20;

/// Settings for one batch run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Table rewritten at every checkpoint.
    pub output: PathBuf,
    /// Pause between consecutive items.
    pub delay: Duration,
    /// Number of items between checkpoints; 0 is treated as 1.
    pub checkpoint_interval: usize,
}

impl RunOptions {
    pub fn new(output: impl Into<PathBuf>) -> Self {
        Self {
            output: output.into(),
            delay: DEFAULT_DELAY,
            checkpoint_interval: DEFAULT_CHECKPOINT_INTERVAL,
        }
    }
}

/// Drives the per-item pipeline over a URL list.
#[derive(Debug)]
pub struct BatchRunner<F, A> {
    fetcher: F,
    summarizer: Summarizer<A>,
    options: RunOptions,
}

impl<F, A> BatchRunner<F, A>
where
    F: FetchPage,
    A: AskAsync,
{
    pub fn new(fetcher: F, summarizer: Summarizer<A>, options: RunOptions) -> Self {
        Self {
            fetcher,
            summarizer,
            options,
        }
    }

    /// Process every URL in order and return the collected results.
    ///
    /// # Errors
    ///
    /// Only a failure to write the output table aborts the run; per-item
    /// failures become failed records.
    #[instrument(level = "info", skip_all, fields(total = urls.len(), output = %self.options.output.display()))]
    pub async fn run(&self, urls: &[String]) -> Result<ResultSet, PipelineError> {
        let total = urls.len();
        let interval = self.options.checkpoint_interval.max(1);
        let mut results = ResultSet::with_capacity(total);

        info!(total, "Starting batch");

        if urls.is_empty() {
            table::write_checkpoint(results.records(), &self.options.output).await?;
            return Ok(results);
        }

        for (idx, url) in urls.iter().enumerate() {
            let position = idx + 1;
            info!(position, total, %url, "Processing");

            results.push(self.process(url).await);

            if position % interval == 0 || position == total {
                table::write_checkpoint(results.records(), &self.options.output).await?;
                info!(
                    position,
                    total,
                    succeeded = results.succeeded(),
                    failed = results.failed(),
                    "Checkpoint saved"
                );
            }

            if position < total {
                sleep(self.options.delay).await;
            }
        }

        info!(
            total = results.len(),
            succeeded = results.succeeded(),
            failed = results.failed(),
            output = %self.options.output.display(),
            "Batch complete"
        );
        Ok(results)
    }

    /// Run a single URL through the pipeline. Never fails: every outcome is
    /// a record.
    async fn process(&self, url: &str) -> ResultRecord {
        let article = match self.fetch_and_extract(url).await {
            Ok(article) => article,
            Err(e) => {
                warn!(%url, stage = e.stage(), error = %e, "Item failed");
                return ResultRecord::failure(url, String::new(), String::new());
            }
        };
        info!(
            title = %truncate_for_log(&article.title, 50),
            chars = char_len(&article.content),
            "Article extracted"
        );

        match self
            .summarizer
            .summarize(&article.title, &article.content)
            .await
        {
            Summary::Completed(text) => ResultRecord::success(url, article.title, text),
            failed @ Summary::Failed => {
                warn!(%url, stage = "summarize", "Item failed");
                ResultRecord::failure(url, article.title, failed.into_text())
            }
        }
    }

    async fn fetch_and_extract(&self, url: &str) -> Result<Article, PipelineError> {
        let page = self.fetcher.fetch(url).await?;
        extractor::extract_page(&page)
    }
}
