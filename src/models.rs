//! Data models for extracted articles and per-URL results.
//!
//! - [`Article`]: title and body pulled out of a fetched page
//! - [`ResultRecord`]: one output row per input URL
//! - [`ResultSet`]: the ordered rows of a single batch run
//!
//! Records serialize straight into the CSV row layout, so the serde renames
//! below double as the localized column labels.

use chrono::{DateTime, Local};
use serde::{Serialize, Serializer};

/// Format used for the timestamp column.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Header row of the output table, in column order.
pub const CSV_HEADERS: [&str; 5] = ["URL", "제목", "요약", "처리시간", "상태"];

/// An article as extracted from a fetched page.
///
/// Both fields are non-empty; `content` holds at least the fallback minimum
/// number of characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    /// The resolved headline.
    pub title: String,
    /// Newline-joined body text.
    pub content: String,
}

/// Outcome of processing a single URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Status {
    #[serde(rename = "성공")]
    Success,
    #[serde(rename = "실패")]
    Failure,
}

/// One row of the output table.
///
/// Created once per input URL after that URL is processed and never mutated.
#[derive(Debug, Clone, Serialize)]
pub struct ResultRecord {
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(rename = "제목")]
    pub title: String,
    #[serde(rename = "요약")]
    pub summary: String,
    #[serde(rename = "처리시간", serialize_with = "serialize_timestamp")]
    pub timestamp: DateTime<Local>,
    #[serde(rename = "상태")]
    pub status: Status,
}

impl ResultRecord {
    /// A successful row carrying the article title and its summary.
    pub fn success(url: &str, title: String, summary: String) -> Self {
        Self {
            url: url.to_string(),
            title,
            summary,
            timestamp: Local::now(),
            status: Status::Success,
        }
    }

    /// A failed row. Fetch and extraction failures leave both text fields empty.
    pub fn failure(url: &str, title: String, summary: String) -> Self {
        Self {
            url: url.to_string(),
            title,
            summary,
            timestamp: Local::now(),
            status: Status::Failure,
        }
    }
}

fn serialize_timestamp<S>(ts: &DateTime<Local>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&ts.format(TIMESTAMP_FORMAT))
}

/// Ordered results of one batch run, in input URL order.
///
/// The success and failure counts are derived from the records on demand.
#[derive(Debug, Default, Clone)]
pub struct ResultSet {
    records: Vec<ResultRecord>,
}

impl ResultSet {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, record: ResultRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[ResultRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn succeeded(&self) -> usize {
        self.count(Status::Success)
    }

    pub fn failed(&self) -> usize {
        self.count(Status::Failure)
    }

    fn count(&self, status: Status) -> usize {
        self.records.iter().filter(|r| r.status == status).count()
    }
}
