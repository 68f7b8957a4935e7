//! Helpers for string length handling, URL-list loading and output-path checks.
//!
//! - Character-based length and truncation (article text is frequently
//!   non-ASCII, so byte offsets are never used to cut strings)
//! - Reading the URL list file
//! - File system validation for the output location

use std::error::Error;
use std::fs as stdfs;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Number of characters (Unicode scalar values) in `s`.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Keep at most `max` characters of `s`.
///
/// Returns the untouched input when it is short enough, otherwise the
/// longest prefix with exactly `max` characters.
pub fn take_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut to `max` characters with an ellipsis and a count
/// of the dropped characters appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 chars)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    let head = take_chars(s, max);
    if head.len() == s.len() {
        s.to_string()
    } else {
        format!("{}…(+{} chars)", head, char_len(s) - max)
    }
}

/// Read the URL list: one URL per line, surrounding whitespace trimmed,
/// blank lines ignored.
///
/// # Errors
///
/// Fails if the file cannot be read or contains no URLs.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn load_urls(path: &Path) -> Result<Vec<String>, Box<dyn Error>> {
    let raw = fs::read_to_string(path)
        .await
        .map_err(|e| format!("cannot read URL list {}: {}", path.display(), e))?;
    let urls = parse_url_list(&raw);
    if urls.is_empty() {
        return Err(format!("URL list {} is empty", path.display()).into());
    }
    info!(count = urls.len(), "Loaded URL list");
    Ok(urls)
}

fn parse_url_list(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Ensure the directory that will hold `file` exists and is writable.
///
/// This function creates the directory if it doesn't exist, then performs
/// a write test by creating and immediately deleting a probe file.
///
/// # Errors
///
/// Returns an error if:
/// - The directory cannot be created
/// - The directory is not writable (permission denied, read-only filesystem, etc.)
#[instrument(level = "info", skip_all, fields(file = %file.display()))]
pub async fn ensure_parent_writable(file: &Path) -> Result<(), Box<dyn Error>> {
    let dir = match file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).await?;
    // Try a small sync write using std fs (simpler error surface)
    let probe_path = dir.join("..__probe_write__");
    match stdfs::File::create(&probe_path) {
        Ok(_) => {
            let _ = stdfs::remove_file(&probe_path);
            info!(dir = %dir.display(), "Output directory is writable");
            Ok(())
        }
        Err(e) => Err(Box::new(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_for_log_short_string() {
        let s = "Hello, world!";
        assert_eq!(truncate_for_log(s, 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 chars)"));
    }

    #[test]
    fn test_truncate_for_log_multibyte() {
        let s = "중대재해법 시행과 정부 특별감독";
        assert_eq!(truncate_for_log(s, 5), "중대재해법…(+12 chars)");
    }

    #[test]
    fn test_take_chars() {
        assert_eq!(take_chars("abc", 5), "abc");
        assert_eq!(take_chars("abc", 3), "abc");
        assert_eq!(take_chars("abcdef", 3), "abc");
        assert_eq!(take_chars("가나다라", 2), "가나");
        assert_eq!(take_chars("", 0), "");
    }

    #[test]
    fn test_char_len_counts_characters() {
        assert_eq!(char_len("요약 실패"), 5);
        assert_eq!(char_len("abc"), 3);
    }

    #[test]
    fn test_parse_url_list_skips_blank_lines() {
        let raw = "https://a.example/1\n\n   \n  https://b.example/2  \r\nhttps://c.example/3";
        assert_eq!(
            parse_url_list(raw),
            [
                "https://a.example/1",
                "https://b.example/2",
                "https://c.example/3"
            ]
        );
    }

    #[tokio::test]
    async fn test_load_urls_rejects_missing_and_empty_files() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.txt");
        assert!(load_urls(&missing).await.is_err());

        let empty = dir.path().join("empty.txt");
        std::fs::write(&empty, "\n  \n").unwrap();
        assert!(load_urls(&empty).await.is_err());

        let good = dir.path().join("urls.txt");
        std::fs::write(&good, "https://good.example/a\n\nhttps://bad.example/b\n").unwrap();
        let urls = load_urls(&good).await.unwrap();
        assert_eq!(urls, ["https://good.example/a", "https://bad.example/b"]);
    }

    #[tokio::test]
    async fn test_ensure_parent_writable_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("nested").join("out.csv");
        ensure_parent_writable(&file).await.unwrap();
        assert!(dir.path().join("nested").is_dir());
        assert!(!dir.path().join("nested").join("..__probe_write__").exists());
    }
}
