//! CSV output for the result table.
//!
//! The table is always written whole: a checkpoint encodes every record
//! collected so far and replaces the previous file. The new table goes to a
//! sibling temporary file that is then renamed over the target, so a crash
//! mid-write leaves the last complete checkpoint in place. The file starts with a
//! UTF-8 byte-order mark so spreadsheet tools pick the right encoding for
//! the Korean column labels.

use crate::error::PipelineError;
use crate::models::{CSV_HEADERS, ResultRecord};
use csv::WriterBuilder;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, instrument};

pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Encode `records` as a BOM-prefixed CSV document with a header row.
pub fn encode(records: &[ResultRecord]) -> Result<Vec<u8>, PipelineError> {
    let mut buf = UTF8_BOM.to_vec();
    {
        let mut writer = WriterBuilder::new().has_headers(false).from_writer(&mut buf);
        writer.write_record(CSV_HEADERS)?;
        for record in records {
            writer.serialize(record)?;
        }
        writer.flush().map_err(csv::Error::from)?;
    }
    Ok(buf)
}

/// `out.csv` -> `out.csv.tmp`, in the same directory.
fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Replace the file at `path` with the full table of `records`.
#[instrument(level = "info", skip_all, fields(path = %path.display(), rows = records.len()))]
pub async fn write_checkpoint(records: &[ResultRecord], path: &Path) -> Result<(), PipelineError> {
    let bytes = encode(records)?;
    let staging = staging_path(path);

    let written = match fs::write(&staging, bytes).await {
        Ok(()) => fs::rename(&staging, path).await,
        Err(e) => Err(e),
    };
    if let Err(source) = written {
        if let Err(e) = fs::remove_file(&staging).await {
            debug!(path = %staging.display(), error = %e, "No staging file to clean up");
        }
        return Err(PipelineError::Checkpoint {
            path: path.to_path_buf(),
            source,
        });
    }

    info!("Wrote result table");
    Ok(())
}
