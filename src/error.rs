//! Error taxonomy for the extraction-and-summarization pipeline.
//!
//! Fetch, extraction and model failures are item-local: the batch runner
//! records them as a failed row and moves on. Only the output errors
//! ([`PipelineError::Checkpoint`], [`PipelineError::Csv`]) abort a run.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with HTTP {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("no title candidate longer than {min_chars} characters")]
    MissingTitle { min_chars: usize },

    #[error("article body too short ({chars} characters, need at least {min_chars})")]
    BodyTooShort { chars: usize, min_chars: usize },

    #[error("model call failed: {0}")]
    Model(String),

    #[error("failed to write checkpoint {}: {source}", path.display())]
    Checkpoint {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode CSV: {0}")]
    Csv(#[from] csv::Error),
}

impl PipelineError {
    /// Name of the pipeline stage that produced the error, for log fields.
    pub fn stage(&self) -> &'static str {
        match self {
            PipelineError::InvalidUrl { .. }
            | PipelineError::Request { .. }
            | PipelineError::HttpStatus { .. } => "fetch",
            PipelineError::MissingTitle { .. } | PipelineError::BodyTooShort { .. } => "extract",
            PipelineError::Model(_) => "summarize",
            PipelineError::Checkpoint { .. } | PipelineError::Csv(_) => "output",
        }
    }
}
